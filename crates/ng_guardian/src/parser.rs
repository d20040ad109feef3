//! Decoding of search responses into [`Report`]s.
//!
//! The expected document looks like
//! `{"response": {"results": [{"sectionName": .., "webPublicationDate": ..,
//! "webTitle": .., "webUrl": .., "tags": [{"firstName": .., "lastName": ..}]}]}}`.
//! The four `web*`/`sectionName` fields are mandatory for every result; a single
//! missing one rejects the whole document.

use ng_core::{Error, Report, Result};
use serde::{Deserialize, Deserializer};
use serde_json::Value;

#[derive(Debug, Deserialize)]
struct SearchEnvelope {
    response: SearchResponse,
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    results: Vec<SearchResult>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SearchResult {
    section_name: String,
    web_publication_date: String,
    web_title: String,
    web_url: String,
    #[serde(default)]
    tags: Option<Vec<Value>>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Contributor {
    #[serde(default, deserialize_with = "lenient_string")]
    first_name: String,
    #[serde(default, deserialize_with = "lenient_string")]
    last_name: String,
}

impl SearchResult {
    fn into_report(self) -> Result<Report> {
        // Only the first tag names the contributor.
        let contributor = match self.tags.as_deref() {
            Some([first, ..]) => Contributor::deserialize(first)?,
            _ => Contributor::default(),
        };

        Ok(Report::new(
            contributor.first_name,
            contributor.last_name,
            self.web_title,
            self.section_name,
            self.web_publication_date,
            self.web_url,
        ))
    }
}

/// Reads an optional name field: `null` becomes empty, scalars are taken
/// by their text form.
fn lenient_string<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Null => String::new(),
        Value::String(s) => s,
        other => other.to_string(),
    })
}

/// Decodes a search response body into reports, preserving result order.
///
/// An empty body yields [`Error::EmptyBody`]; a body that decodes to zero
/// results yields an empty list.
pub fn parse_reports(json: &str) -> Result<Vec<Report>> {
    if json.trim().is_empty() {
        return Err(Error::EmptyBody);
    }

    let envelope: SearchEnvelope = serde_json::from_str(json)?;
    envelope
        .response
        .results
        .into_iter()
        .map(SearchResult::into_report)
        .collect()
}
