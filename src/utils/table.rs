/// Column alignment inside a [`Table`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    Left,
    Right,
}

/// A simple text-based table generator for terminal summaries
pub struct Table {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
    col_widths: Vec<usize>,
    alignments: Vec<Align>,
}

impl Table {
    /// Create a new table with the given headers, every column left-aligned
    pub fn new(headers: Vec<&str>) -> Self {
        let col_widths = headers.iter().map(|h| h.chars().count()).collect();
        let alignments = vec![Align::Left; headers.len()];
        let headers = headers.iter().map(|h| h.to_string()).collect();
        Table {
            headers,
            rows: Vec::new(),
            col_widths,
            alignments,
        }
    }

    /// Set the alignment of one column; out-of-range columns are ignored
    pub fn align(mut self, column: usize, align: Align) -> Self {
        if let Some(slot) = self.alignments.get_mut(column) {
            *slot = align;
        }
        self
    }

    /// Add a row to the table
    pub fn add_row(&mut self, row: Vec<String>) {
        // Update column widths if needed
        for (i, col) in row.iter().enumerate() {
            if i < self.col_widths.len() {
                self.col_widths[i] = self.col_widths[i].max(col.chars().count());
            }
        }

        self.rows.push(row);
    }

    /// Render the table as a formatted string for the terminal
    pub fn render(&self) -> String {
        let mut output = String::new();

        output.push_str(&self.render_row(&self.headers));
        output.push('\n');

        output.push_str(&self.render_separator());
        output.push('\n');

        for row in &self.rows {
            output.push_str(&self.render_row(row));
            output.push('\n');
        }

        output
    }

    /// Render a single row with proper spacing
    fn render_row(&self, row: &[String]) -> String {
        let mut line = String::new();
        for (i, col) in row.iter().enumerate() {
            if i < self.col_widths.len() {
                let width = self.col_widths[i];
                match self.alignments[i] {
                    Align::Left => line.push_str(&format!("{:<width$}", col, width = width)),
                    Align::Right => line.push_str(&format!("{:>width$}", col, width = width)),
                }
                if i < row.len() - 1 {
                    line.push_str(" | ");
                }
            }
        }
        line.trim_end().to_string()
    }

    /// Render a separator line
    fn render_separator(&self) -> String {
        let mut line = String::new();
        for (i, &width) in self.col_widths.iter().enumerate() {
            line.push_str(&"-".repeat(width));
            if i < self.col_widths.len() - 1 {
                line.push_str("-+-");
            }
        }
        line
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_table() {
        let mut table = Table::new(vec!["Metric", "Value"]);
        table.add_row(vec!["Donations".to_string(), "12".to_string()]);
        table.add_row(vec!["Expenses".to_string(), "3".to_string()]);

        let rendered = table.render();
        assert!(rendered.contains("Metric"));
        assert!(rendered.contains("Donations | 12"));
        assert!(rendered.contains("Expenses  | 3"));
    }

    #[test]
    fn test_right_aligned_column() {
        let mut table = Table::new(vec!["Metric", "Value"]).align(1, Align::Right);
        table.add_row(vec!["Total".to_string(), "1,200".to_string()]);
        table.add_row(vec!["Count".to_string(), "7".to_string()]);

        let rendered = table.render();
        let lines: Vec<&str> = rendered.lines().collect();
        assert_eq!(lines[0], "Metric | Value");
        assert_eq!(lines[1], "-------+------");
        assert_eq!(lines[2], "Total  | 1,200");
        assert_eq!(lines[3], "Count  |     7");
    }
}
