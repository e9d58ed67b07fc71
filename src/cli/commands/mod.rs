pub mod quote;
pub mod swap;
