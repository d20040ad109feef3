use std::sync::Arc;

use ng_core::{Error, Fetcher, Report, Result};
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use crate::pipeline::fetch_reports;

/// What a consumer currently has to display.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum LoadState {
    /// Nothing has completed yet.
    #[default]
    Idle,
    Loaded(Vec<Report>),
    Failed(String),
}

/// Runs the fetch-and-decode pipeline for one query URL.
pub struct ReportLoader {
    fetcher: Arc<dyn Fetcher>,
    url: String,
}

impl ReportLoader {
    pub fn new(fetcher: Arc<dyn Fetcher>, url: impl Into<String>) -> Self {
        Self {
            fetcher,
            url: url.into(),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Runs the pipeline once on the current task.
    pub async fn load(&self) -> Result<Vec<Report>> {
        fetch_reports(self.fetcher.as_ref(), &self.url).await
    }

    /// Runs the pipeline on its own task and replaces the contents of `slot`
    /// with the outcome.
    ///
    /// Nothing is delivered once `token` is cancelled or every receiver of
    /// `slot` has been dropped; the task then finishes with
    /// [`Error::Cancelled`].
    pub fn spawn(
        self,
        token: CancellationToken,
        slot: watch::Sender<LoadState>,
    ) -> JoinHandle<Result<()>> {
        tokio::spawn(async move {
            let outcome = tokio::select! {
                _ = token.cancelled() => None,
                _ = slot.closed() => None,
                outcome = self.load() => Some(outcome),
            };

            let Some(outcome) = outcome else {
                debug!("Load of {} abandoned before completion", self.url);
                return Err(Error::Cancelled);
            };
            if token.is_cancelled() {
                return Err(Error::Cancelled);
            }

            let state = match outcome {
                Ok(reports) => {
                    info!("Loaded {} reports", reports.len());
                    LoadState::Loaded(reports)
                }
                Err(e) => LoadState::Failed(e.to_string()),
            };

            slot.send(state).map_err(|_| Error::Cancelled)
        })
    }
}
