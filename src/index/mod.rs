pub mod catalog;

pub use catalog::{ProductIndex, QueryError};
