use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single news report as listed by the search endpoint.
///
/// The publication timestamp is kept exactly as delivered; use
/// [`Report::published_at_utc`] when a structured date is needed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Report {
    first_name: String,
    last_name: String,
    title: String,
    section: String,
    published_at: String,
    url: String,
}

impl Report {
    pub fn new(
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        title: impl Into<String>,
        section: impl Into<String>,
        published_at: impl Into<String>,
        url: impl Into<String>,
    ) -> Self {
        Self {
            first_name: first_name.into(),
            last_name: last_name.into(),
            title: title.into(),
            section: section.into(),
            published_at: published_at.into(),
            url: url.into(),
        }
    }

    pub fn first_name(&self) -> &str {
        &self.first_name
    }

    pub fn last_name(&self) -> &str {
        &self.last_name
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn section(&self) -> &str {
        &self.section
    }

    pub fn published_at(&self) -> &str {
        &self.published_at
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Returns the contributor's name, or `None` when neither name part is known.
    pub fn author(&self) -> Option<String> {
        let name = [self.first_name.trim(), self.last_name.trim()]
            .iter()
            .filter(|part| !part.is_empty())
            .copied()
            .collect::<Vec<_>>()
            .join(" ");
        if name.is_empty() {
            None
        } else {
            Some(name)
        }
    }

    pub fn published_at_utc(&self) -> Option<DateTime<Utc>> {
        DateTime::parse_from_rfc3339(&self.published_at)
            .ok()
            .map(|date| date.with_timezone(&Utc))
    }
}
