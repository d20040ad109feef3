use std::path::PathBuf;
use std::sync::Arc;

use clap::{Args, Subcommand};
use ng_core::{Error, Fetcher, Result};
use tokio::sync::watch;
use tokio_util::sync::CancellationToken;
use tracing::info;

use crate::loader::{LoadState, ReportLoader};
use crate::parser::parse_reports;
use crate::query::{GuardianQuery, OrderBy, DEFAULT_API_KEY, DEFAULT_ENDPOINT, DEFAULT_SEARCH_TERM};

#[derive(Args, Debug, Clone)]
pub struct QueryArgs {
    /// Search term
    #[arg(short, long, default_value = DEFAULT_SEARCH_TERM)]
    pub query: String,
    /// API key sent with the request
    #[arg(long, env = "GUARDIAN_API_KEY", default_value = DEFAULT_API_KEY, hide_env_values = true)]
    pub api_key: String,
    /// Sort order: newest, oldest or relevance
    #[arg(long)]
    pub order_by: Option<OrderBy>,
    /// Tag types to include, e.g. contributor
    #[arg(long, default_value = "contributor")]
    pub tags: String,
    /// Search endpoint
    #[arg(long, default_value = DEFAULT_ENDPOINT)]
    pub endpoint: String,
}

impl QueryArgs {
    pub fn to_query(&self) -> GuardianQuery {
        GuardianQuery::new()
            .with_endpoint(self.endpoint.clone())
            .with_search_term(self.query.clone())
            .with_api_key(self.api_key.clone())
            .with_order_by(self.order_by)
            .with_show_tags(Some(self.tags.clone()))
    }
}

#[derive(Subcommand, Debug, Clone)]
pub enum ReportCommands {
    /// Search for reports
    Search(QueryArgs),
    /// Fetch reports from a prebuilt query URL
    Url {
        url: String,
    },
    /// Decode a saved search response
    Parse {
        file: PathBuf,
    },
}

/// Runs `command` and returns what should be displayed.
///
/// Remote loads run on their own task and are abandoned when `token` fires.
pub async fn handle_command(
    command: ReportCommands,
    fetcher: Arc<dyn Fetcher>,
    token: CancellationToken,
) -> Result<LoadState> {
    match command {
        ReportCommands::Search(args) => {
            let url = args.to_query().to_url()?;
            info!("🔎 Searching for '{}'", args.query);
            load_remote(fetcher, url.as_str(), token).await
        }
        ReportCommands::Url { url } => load_remote(fetcher, &url, token).await,
        ReportCommands::Parse { file } => {
            let body = tokio::fs::read_to_string(&file).await?;
            Ok(match parse_reports(&body) {
                Ok(reports) => LoadState::Loaded(reports),
                Err(e) => LoadState::Failed(e.to_string()),
            })
        }
    }
}

async fn load_remote(fetcher: Arc<dyn Fetcher>, url: &str, token: CancellationToken) -> Result<LoadState> {
    let (tx, rx) = watch::channel(LoadState::Idle);
    ReportLoader::new(fetcher, url)
        .spawn(token, tx)
        .await
        .map_err(|e| Error::External(e.into()))??;

    let state = rx.borrow().clone();
    Ok(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::HttpFetcher;
    use std::io::Write;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const BODY: &str = r#"{"response":{"results":[{"sectionName":"Politics","webPublicationDate":"2021-01-01T00:00:00Z","webTitle":"T","webUrl":"https://x","tags":[{"firstName":"A","lastName":"B"}]}]}}"#;

    fn fetcher() -> Arc<dyn Fetcher> {
        Arc::new(HttpFetcher::new().unwrap())
    }

    fn query_args(endpoint: String) -> QueryArgs {
        QueryArgs {
            query: "politics".to_string(),
            api_key: "test".to_string(),
            order_by: Some(OrderBy::Newest),
            tags: "contributor".to_string(),
            endpoint,
        }
    }

    #[tokio::test]
    async fn test_search_command() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/search"))
            .and(query_param("q", "politics"))
            .and(query_param("order-by", "newest"))
            .and(query_param("show-tags", "contributor"))
            .and(query_param("api-key", "test"))
            .respond_with(ResponseTemplate::new(200).set_body_string(BODY))
            .expect(1)
            .mount(&mock_server)
            .await;

        let command = ReportCommands::Search(query_args(format!("{}/search", mock_server.uri())));
        let state = handle_command(command, fetcher(), CancellationToken::new()).await.unwrap();
        match state {
            LoadState::Loaded(reports) => {
                assert_eq!(reports.len(), 1);
                assert_eq!(reports[0].author().as_deref(), Some("A B"));
            }
            other => panic!("unexpected state: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_url_command_non_200() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&mock_server)
            .await;

        let command = ReportCommands::Url { url: mock_server.uri() };
        let state = handle_command(command, fetcher(), CancellationToken::new()).await.unwrap();
        assert!(matches!(state, LoadState::Failed(msg) if msg.contains("500")));
    }

    #[tokio::test]
    async fn test_cancelled_command() {
        let token = CancellationToken::new();
        token.cancel();
        let command = ReportCommands::Url { url: "http://127.0.0.1:1/search".to_string() };
        let result = handle_command(command, fetcher(), token).await;
        assert!(matches!(result, Err(Error::Cancelled)));
    }

    #[tokio::test]
    async fn test_parse_command() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(BODY.as_bytes()).unwrap();

        let command = ReportCommands::Parse { file: file.path().to_path_buf() };
        let state = handle_command(command, fetcher(), CancellationToken::new()).await.unwrap();
        assert!(matches!(state, LoadState::Loaded(reports) if reports[0].title() == "T"));

        let missing = ReportCommands::Parse { file: PathBuf::from("/definitely/not/here.json") };
        let result = handle_command(missing, fetcher(), CancellationToken::new()).await;
        assert!(matches!(result, Err(Error::Io(_))));
    }
}
