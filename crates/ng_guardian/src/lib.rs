pub mod cli;
pub mod http;
pub mod loader;
pub mod logging;
pub mod parser;
pub mod pipeline;
pub mod query;

pub use cli::{handle_command, QueryArgs, ReportCommands};
pub use http::HttpFetcher;
pub use loader::{LoadState, ReportLoader};
pub use parser::parse_reports;
pub use pipeline::{fetch_report_data, fetch_reports};
pub use query::{GuardianQuery, OrderBy};

pub mod prelude {
    pub use super::http::HttpFetcher;
    pub use super::loader::{LoadState, ReportLoader};
    pub use ng_core::{Error, Fetcher, Report, Result};
}
