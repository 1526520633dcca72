pub mod loader;

pub use loader::{LoadError, RecordLoader};
