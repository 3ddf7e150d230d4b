pub mod date_pattern;
pub mod number;
