pub mod convert;
pub mod rows;
