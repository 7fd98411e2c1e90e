pub mod number;
pub mod table;

pub use number::{format_amount, format_grouped, parse_float_prefix};
pub use table::{Align, Table};
