pub mod envelope;
pub mod server;

pub use envelope::*;
pub use server::*;
