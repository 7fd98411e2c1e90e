use std::io::Write;

use tracing::warn;

use super::surface::{MetricDisplay, RenderSurface, VerificationDisplay};
use crate::models::Metric;
use crate::utils::number::{format_amount, format_grouped};
use crate::utils::table::{Align, Table};

/// Renders counters as a status line rewritten in place, and verification
/// results as separate lines.
pub struct TerminalSurface<W: Write> {
    out: W,
    currency_label: String,
    cells: [String; 5],
    line_open: bool,
}

impl TerminalSurface<std::io::Stdout> {
    pub fn stdout(currency_label: impl Into<String>) -> Self {
        Self::new(std::io::stdout(), currency_label)
    }
}

impl<W: Write> TerminalSurface<W> {
    pub fn new(out: W, currency_label: impl Into<String>) -> Self {
        Self {
            out,
            currency_label: currency_label.into(),
            cells: Default::default(),
            line_open: false,
        }
    }

    pub fn cell(&self, metric: Metric) -> &str {
        &self.cells[metric.index()]
    }

    /// Summary of the current cells
    pub fn render_table(&self) -> String {
        let mut table = Table::new(vec!["Metric", "Value"]).align(1, Align::Right);
        for metric in Metric::ALL {
            table.add_row(vec![metric.label().to_string(), self.cell(metric).to_string()]);
        }
        table.render()
    }

    /// End the in-place status line and print the summary table
    pub fn print_table(&mut self) -> std::io::Result<()> {
        self.close_line()?;
        let table = self.render_table();
        write!(self.out, "{}", table)?;
        self.out.flush()
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn format(&self, metric: Metric, display: MetricDisplay) -> String {
        let number = match display {
            MetricDisplay::Value(v) => format_amount(v),
            MetricDisplay::Frame(f) => format_grouped(f),
            MetricDisplay::Error => return "Error".to_string(),
        };
        if metric.is_amount() {
            format!("{} {}", self.currency_label, number)
        } else {
            number
        }
    }

    fn status_line(&self) -> String {
        format!(
            "Transactions: {} | Donations: {} ({}) | Expenses: {} ({})",
            self.cell(Metric::TotalCount),
            self.cell(Metric::DonationCount),
            self.cell(Metric::DonationAmount),
            self.cell(Metric::ExpenseCount),
            self.cell(Metric::ExpenseAmount),
        )
    }

    fn close_line(&mut self) -> std::io::Result<()> {
        if self.line_open {
            writeln!(self.out)?;
            self.line_open = false;
        }
        Ok(())
    }

    fn write_status(&mut self) -> std::io::Result<()> {
        let line = self.status_line();
        // \x1b[2K clears whatever a longer previous frame left behind
        write!(self.out, "\r\x1b[2K{}", line)?;
        self.line_open = true;
        self.out.flush()
    }

    fn write_verification(&mut self, display: VerificationDisplay) -> std::io::Result<()> {
        self.close_line()?;
        writeln!(self.out, "{}", display.headline())?;
        if let Some(detail) = display.detail() {
            writeln!(self.out, "   {}", detail)?;
        }
        self.out.flush()
    }
}

impl<W: Write> RenderSurface for TerminalSurface<W> {
    fn show_metric(&mut self, metric: Metric, display: MetricDisplay) {
        let text = self.format(metric, display);
        self.cells[metric.index()] = text;
    }

    fn show_verification(&mut self, display: VerificationDisplay) {
        if let Err(e) = self.write_verification(display) {
            warn!("Failed to write verification result: {}", e);
        }
    }

    fn flush(&mut self) {
        if let Err(e) = self.write_status() {
            warn!("Failed to write status line: {}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::VerificationOutcome;

    fn surface() -> TerminalSurface<Vec<u8>> {
        TerminalSurface::new(Vec::new(), "KSh")
    }

    #[test]
    fn test_cells_format_by_metric_kind() {
        let mut s = surface();
        s.show_metric(Metric::TotalCount, MetricDisplay::Value(1200.0));
        s.show_metric(Metric::DonationAmount, MetricDisplay::Value(1500.25));
        s.show_metric(Metric::ExpenseAmount, MetricDisplay::Frame(999));
        s.show_metric(Metric::ExpenseCount, MetricDisplay::Error);

        assert_eq!(s.cell(Metric::TotalCount), "1,200");
        assert_eq!(s.cell(Metric::DonationAmount), "KSh 1,500.25");
        assert_eq!(s.cell(Metric::ExpenseAmount), "KSh 999");
        assert_eq!(s.cell(Metric::ExpenseCount), "Error");
    }

    #[test]
    fn test_each_metric_has_its_own_cell() {
        let mut s = surface();
        for (i, metric) in Metric::ALL.into_iter().enumerate() {
            s.show_metric(metric, MetricDisplay::Frame(i as i64 + 1));
        }
        s.flush();

        let out = String::from_utf8(s.into_inner()).unwrap();
        assert!(out.ends_with("Transactions: 1 | Donations: 2 (KSh 3) | Expenses: 4 (KSh 5)"));
    }

    #[test]
    fn test_flush_rewrites_status_line() {
        let mut s = surface();
        s.show_metric(Metric::TotalCount, MetricDisplay::Frame(1));
        s.flush();
        s.show_metric(Metric::TotalCount, MetricDisplay::Frame(2));
        s.flush();

        let out = String::from_utf8(s.into_inner()).unwrap();
        assert_eq!(out.matches('\r').count(), 2);
        assert!(!out.contains('\n'));
        assert!(out.ends_with("Transactions: 2 | Donations:  () | Expenses:  ()"));
    }

    #[test]
    fn test_verification_starts_on_fresh_line() {
        let mut s = surface();
        s.flush();
        s.show_verification(VerificationDisplay::Outcome(VerificationOutcome::Pending));

        let out = String::from_utf8(s.into_inner()).unwrap();
        assert!(out.contains("\n⚠️ Transaction Found, Pending Verification\n"));
        assert!(out.contains("not yet confirmed on-chain."));
    }

    #[test]
    fn test_summary_table_lists_every_metric() {
        let mut s = surface();
        for metric in Metric::ALL {
            s.show_metric(metric, MetricDisplay::Value(3.0));
        }
        let table = s.render_table();
        for metric in Metric::ALL {
            assert!(table.contains(metric.label()));
        }
        assert!(table.contains("KSh 3"));
    }
}
