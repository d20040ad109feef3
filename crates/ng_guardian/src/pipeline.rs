use ng_core::{Fetcher, Report, Result};
use tracing::{debug, error};

use crate::parser::parse_reports;

/// Fetches `url` and decodes the body into reports.
///
/// A failed fetch is returned as-is; the parser only runs on a body that was
/// actually received.
pub async fn fetch_reports(fetcher: &dyn Fetcher, url: &str) -> Result<Vec<Report>> {
    let body = fetcher.fetch(url).await?;
    let reports = parse_reports(&body)?;
    debug!("Decoded {} reports from {}", reports.len(), url);
    Ok(reports)
}

/// Collapsed variant of [`fetch_reports`]: any failure is logged and turned
/// into `None`, so callers cannot tell an error from a missing payload.
pub async fn fetch_report_data(fetcher: &dyn Fetcher, url: &str) -> Option<Vec<Report>> {
    match fetch_reports(fetcher, url).await {
        Ok(reports) => Some(reports),
        Err(e) => {
            error!("Problem loading reports from {}: {}", url, e);
            None
        }
    }
}
