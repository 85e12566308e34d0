//! Client for the Semantic Scholar Academic Graph API.
//!
//! This module provides the two network operations in the pipeline:
//! resolving a tagged identifier query to a canonical paper id, and
//! fetching a full paper record (metadata plus nested references) for
//! that id. Both are single GET requests against the graph's REST
//! endpoint with a bounded timeout; there is no retry, caching, or
//! pagination.
//!
//! The free tier needs no credentials. When `SEMANTIC_SCHOLAR_API_KEY`
//! is set it is sent as the `x-api-key` header, which raises the rate
//! limits.

use std::time::Duration;

use super::*;

/// Base URL of the graph API.
const BASE_URL: &str = "https://api.semanticscholar.org/graph/v1";

/// Per-request timeout. Requests exceeding this surface as
/// [`CitescopeError::Timeout`]; there is no retry.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Environment variable holding an optional API key.
const API_KEY_VAR: &str = "SEMANTIC_SCHOLAR_API_KEY";

/// Fields requested with a paper record, covering the dashboard summary
/// and every reference sub-field the table builder consumes.
const PAPER_FIELDS: &str = "title,year,abstract,tldr,citationCount,referenceCount,fieldsOfStudy,\
                            authors.name,authors.url,authors.paperCount,authors.citationCount,\
                            authors.hIndex,references.paperId,references.title,references.url,\
                            references.year,references.publicationDate,references.venue,\
                            references.publicationVenue,references.referenceCount,\
                            references.citationCount,references.influentialCitationCount,\
                            references.authors,references.openAccessPdf";

/// Minimal response shape for a resolution request.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Resolved {
  /// The canonical identifier, absent when the API could not match the
  /// query
  #[serde(default)]
  paper_id: Option<String>,
}

/// Client for the Semantic Scholar graph.
///
/// Holds one `reqwest::Client` reused across requests, configured with
/// the request timeout and, when available, the API key.
pub struct SemanticScholarClient {
  /// Internal web client used to connect to the API.
  client:   reqwest::Client,
  /// The base URL to use for the client.
  base_url: String,
  /// Optional API key sent as `x-api-key`.
  api_key:  Option<String>,
}

impl SemanticScholarClient {
  /// Creates a client against the public API endpoint, picking up the
  /// API key from the environment when present.
  pub fn new() -> Self { Self::with_base_url(BASE_URL) }

  /// Creates a client against a custom endpoint. Used for tests and
  /// self-hosted mirrors.
  pub fn with_base_url(base_url: impl Into<String>) -> Self {
    Self {
      client:   reqwest::Client::builder().timeout(REQUEST_TIMEOUT).build().unwrap(),
      base_url: base_url.into(),
      api_key:  std::env::var(API_KEY_VAR).ok(),
    }
  }

  /// Resolves a domain-qualified query to the canonical paper id.
  ///
  /// One GET request, no caching. The API answers resolution queries
  /// with a (possibly partial) paper record; a response without a
  /// `paperId` field fails with [`CitescopeError::UnresolvedId`].
  ///
  /// # Errors
  ///
  /// - [`CitescopeError::NotFound`] when the API returns 404
  /// - [`CitescopeError::Timeout`] when the request exceeds the budget
  /// - [`CitescopeError::UnresolvedId`] when the response lacks an id
  pub async fn resolve(&self, query: &PaperQuery) -> Result<PaperId, CitescopeError> {
    let url = format!("{}/paper/{}?fields=paperId", self.base_url, query);
    debug!("Resolving paper id via: {url}");

    let body = self.get(&url).await?;
    parse_resolved(&body)
  }

  /// Fetches the full paper record for a canonical id.
  ///
  /// One GET request carrying the full field list; the raw record comes
  /// back untouched, reference order preserved. Null normalization is
  /// the table builder's job, not the fetcher's.
  ///
  /// # Errors
  ///
  /// - [`CitescopeError::NotFound`] when the paper does not exist
  /// - [`CitescopeError::Timeout`] when the request exceeds the budget
  /// - [`CitescopeError::MissingField`] when the payload fails schema
  ///   validation
  pub async fn fetch_paper(&self, id: &PaperId) -> Result<Paper, CitescopeError> {
    let url = format!("{}/paper/{}?fields={}", self.base_url, id, PAPER_FIELDS);
    debug!("Fetching paper via: {url}");

    let body = self.get(&url).await?;
    parse_paper(&body)
  }

  /// Performs one GET request and returns the response body, mapping
  /// transport failures and non-success statuses to library errors.
  async fn get(&self, url: &str) -> Result<String, CitescopeError> {
    let mut request = self.client.get(url);
    if let Some(key) = &self.api_key {
      request = request.header("x-api-key", key);
    }

    let response = request.send().await.map_err(from_transport)?;
    let status = response.status();
    debug!("API response status: {status}");

    let body = response.text().await.map_err(from_transport)?;

    if status == reqwest::StatusCode::NOT_FOUND {
      return Err(CitescopeError::NotFound);
    }
    if !status.is_success() {
      return Err(CitescopeError::Api(status.as_u16(), body));
    }
    Ok(body)
  }
}

impl Default for SemanticScholarClient {
  fn default() -> Self { Self::new() }
}

/// Maps a transport failure, distinguishing the bounded-timeout abort
/// from other network errors.
fn from_transport(err: reqwest::Error) -> CitescopeError {
  if err.is_timeout() {
    CitescopeError::Timeout
  } else {
    CitescopeError::Network(err)
  }
}

/// Extracts the canonical id from a resolution response body.
fn parse_resolved(body: &str) -> Result<PaperId, CitescopeError> {
  let resolved: Resolved = serde_json::from_str(body)
    .map_err(|e| CitescopeError::MissingField(e.to_string()))?;
  resolved.paper_id.map(PaperId).ok_or(CitescopeError::UnresolvedId)
}

/// Validates and decodes a paper response body.
fn parse_paper(body: &str) -> Result<Paper, CitescopeError> {
  serde_json::from_str(body).map_err(|e| CitescopeError::MissingField(e.to_string()))
}

#[cfg(test)]
mod tests {
  use tracing_test::traced_test;

  use super::*;

  #[traced_test]
  #[tokio::test]
  async fn test_resolve_traces_request_url() {
    // Nothing listens on the discard port, so the request fails at the
    // transport layer after the request URL has been logged.
    let client = SemanticScholarClient::with_base_url("http://127.0.0.1:9");
    let query = PaperQuery::new("2301.07041", IdKind::Arxiv).unwrap();

    let err = client.resolve(&query).await.unwrap_err();
    assert!(matches!(err, CitescopeError::Network(_)));
    assert!(logs_contain("Resolving paper id via"));
  }

  #[test]
  fn test_parse_resolved() {
    let id = parse_resolved(r#"{"paperId": "649def34f8be52c8b66281af98ae884c09aef38b"}"#).unwrap();
    assert_eq!(id.as_str(), "649def34f8be52c8b66281af98ae884c09aef38b");
  }

  #[test]
  fn test_parse_resolved_without_id() {
    let err = parse_resolved(r#"{"title": "a paper but no id"}"#).unwrap_err();
    assert!(matches!(err, CitescopeError::UnresolvedId));

    let err = parse_resolved(r#"{"paperId": null}"#).unwrap_err();
    assert!(matches!(err, CitescopeError::UnresolvedId));
  }

  #[test]
  fn test_parse_paper_requires_id() {
    let err = parse_paper(r#"{"title": "no id here"}"#).unwrap_err();
    assert!(matches!(err, CitescopeError::MissingField(_)));
  }

  #[test]
  fn test_parse_paper_tolerates_sparse_references() {
    let body = r#"{
      "paperId": "abc",
      "references": [
        {"paperId": "r1", "citationCount": 3},
        {"paperId": null, "publicationVenue": null, "citationCount": null}
      ]
    }"#;
    let paper = parse_paper(body).unwrap();
    assert_eq!(paper.references.len(), 2);
    assert_eq!(paper.references[1].flatten().citation_count, 0);
  }

  #[test]
  fn test_request_urls_embed_tagged_query() {
    let client = SemanticScholarClient::with_base_url("http://localhost:9");
    let query = PaperQuery::new("10.1145/1327452.1327492", IdKind::Doi).unwrap();
    // The query string lands in the path segment with its literal tag.
    let url = format!("{}/paper/{}?fields=paperId", client.base_url, query);
    assert_eq!(url, "http://localhost:9/paper/DOI:10.1145/1327452.1327492?fields=paperId");
  }
}
