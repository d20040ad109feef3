use std::time::Duration;

use async_trait::async_trait;
use ng_core::{Error, Fetcher, Result};
use reqwest::{Client, StatusCode};
use tokio::time::timeout;
use tracing::{debug, warn};
use url::Url;

/// Upper bound for establishing the TCP (and TLS) connection.
pub const CONNECT_TIMEOUT: Duration = Duration::from_millis(15_000);

/// Upper bound for any single wait on the server once connected: the
/// response head, then every body chunk.
pub const READ_TIMEOUT: Duration = Duration::from_millis(10_000);

/// Fetches response bodies over HTTP(S) with a single, non-retried GET.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
    read_timeout: Duration,
}

impl HttpFetcher {
    pub fn new() -> Result<Self> {
        Self::with_timeouts(CONNECT_TIMEOUT, READ_TIMEOUT)
    }

    pub(crate) fn with_timeouts(connect_timeout: Duration, read_timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .connect_timeout(connect_timeout)
            .user_agent(concat!("news2go/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| Error::Network(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { client, read_timeout })
    }

    async fn read_body(&self, url: &Url, mut response: reqwest::Response) -> Result<String> {
        let mut body = Vec::new();
        loop {
            let chunk = timeout(self.read_timeout, response.chunk())
                .await
                .map_err(|_| {
                    Error::Network(format!(
                        "Timed out reading body from '{}' (no data for {} ms)",
                        url,
                        self.read_timeout.as_millis()
                    ))
                })?
                .map_err(|e| network_error(url, e))?;

            match chunk {
                Some(bytes) => body.extend_from_slice(&bytes),
                None => break,
            }
        }

        Ok(String::from_utf8_lossy(&body).into_owned())
    }
}

#[async_trait]
impl Fetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<String> {
        let url = parse_url(url)?;
        debug!("Requesting {}", url);

        // The client caps connection setup at `connect_timeout`; the wait for
        // the response head never exceeds `read_timeout`.
        let response = timeout(self.read_timeout, self.client.get(url.clone()).send())
            .await
            .map_err(|_| {
                Error::Network(format!(
                    "Timed out waiting for a response from '{}' (no data for {} ms)",
                    url,
                    self.read_timeout.as_millis()
                ))
            })?
            .map_err(|e| network_error(&url, e))?;

        let status = response.status();
        if status != StatusCode::OK {
            warn!("Error response code {} from {}", status.as_u16(), url);
            return Err(Error::HttpStatus(status.as_u16()));
        }

        let body = self.read_body(&url, response).await?;
        debug!("Received {} bytes from {}", body.len(), url);
        Ok(body)
    }
}

pub(crate) fn parse_url(url: &str) -> Result<Url> {
    let parsed = Url::parse(url)?;
    match parsed.scheme() {
        "http" | "https" => Ok(parsed),
        scheme => Err(Error::InvalidUrl(format!("Unsupported scheme '{}' in {}", scheme, url))),
    }
}

fn network_error(url: &Url, e: reqwest::Error) -> Error {
    let message = if e.is_timeout() {
        format!("Timeout fetching '{}'", url)
    } else if e.is_connect() {
        format!("Connection failed for '{}': {}", url, e)
    } else {
        format!("Failed to fetch '{}': {}", url, e)
    };
    Error::Network(message)
}
