pub mod date;
pub mod product;

pub use date::{format_expiration, parse_expiration, DateError};
pub use product::*;
