use std::fmt;
use std::str::FromStr;

use ng_core::{Error, Result};
use url::Url;

pub const DEFAULT_ENDPOINT: &str = "https://content.guardianapis.com/search";
pub const DEFAULT_SEARCH_TERM: &str = "politics";
pub const DEFAULT_API_KEY: &str = "test";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderBy {
    Newest,
    Oldest,
    Relevance,
}

impl OrderBy {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderBy::Newest => "newest",
            OrderBy::Oldest => "oldest",
            OrderBy::Relevance => "relevance",
        }
    }
}

impl fmt::Display for OrderBy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OrderBy {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "newest" => Ok(OrderBy::Newest),
            "oldest" => Ok(OrderBy::Oldest),
            "relevance" => Ok(OrderBy::Relevance),
            other => Err(format!("Invalid sort order: {} (expected newest, oldest or relevance)", other)),
        }
    }
}

/// Parameters of a content search request.
#[derive(Debug, Clone)]
pub struct GuardianQuery {
    endpoint: String,
    search_term: String,
    api_key: String,
    order_by: Option<OrderBy>,
    show_tags: Option<String>,
}

impl Default for GuardianQuery {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            search_term: DEFAULT_SEARCH_TERM.to_string(),
            api_key: DEFAULT_API_KEY.to_string(),
            order_by: None,
            show_tags: None,
        }
    }
}

impl GuardianQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    pub fn with_search_term(mut self, term: impl Into<String>) -> Self {
        self.search_term = term.into();
        self
    }

    pub fn with_api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = key.into();
        self
    }

    pub fn with_order_by(mut self, order_by: Option<OrderBy>) -> Self {
        self.order_by = order_by;
        self
    }

    /// Tag types to include in results, e.g. `contributor` for author names.
    pub fn with_show_tags(mut self, tags: Option<String>) -> Self {
        self.show_tags = tags.filter(|t| !t.trim().is_empty());
        self
    }

    /// Builds the request URL, appending parameters to any query the
    /// endpoint already carries.
    pub fn to_url(&self) -> Result<Url> {
        let mut url = Url::parse(&self.endpoint)?;
        if url.cannot_be_a_base() {
            return Err(Error::InvalidUrl(format!("Not a usable endpoint: {}", self.endpoint)));
        }

        {
            let mut pairs = url.query_pairs_mut();
            if !self.search_term.trim().is_empty() {
                pairs.append_pair("q", self.search_term.trim());
            }
            if let Some(order_by) = self.order_by {
                pairs.append_pair("order-by", order_by.as_str());
            }
            if let Some(tags) = &self.show_tags {
                pairs.append_pair("show-tags", tags.trim());
            }
            pairs.append_pair("api-key", &self.api_key);
        }

        Ok(url)
    }
}
