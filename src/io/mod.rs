//! Reading and writing matrices as whitespace-delimited text.
pub mod text;

pub use text::format_value;
