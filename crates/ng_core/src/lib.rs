pub mod error;
pub mod fetch;
pub mod types;

pub use error::{Error, Result};
pub use fetch::Fetcher;
pub use types::Report;
