use async_trait::async_trait;
use crate::Result;

#[async_trait]
pub trait Fetcher: Send + Sync {
    /// Perform a single GET against `url` and return the body as text
    async fn fetch(&self, url: &str) -> Result<String>;
}
