//! Error types for the citescope library.
//!
//! This module provides a single error type covering every failure mode of
//! the resolve → fetch → build pipeline:
//! - Identifier validation (unsupported source domains, malformed URLs)
//! - Network and API failures while talking to Semantic Scholar
//! - Payload validation (missing required fields)
//!
//! The pipeline is atomic: any of these errors aborts the whole
//! fetch-and-build step, so callers never see a partially built table.

use thiserror::Error;

/// Errors that can occur when resolving, fetching, or tabulating a paper.
///
/// Transport-level failures are wrapped transparently so the underlying
/// `reqwest`/`url` messages reach the user; domain failures carry enough
/// context to render a one-line explanation.
#[derive(Error, Debug)]
pub enum CitescopeError {
  /// A URL identifier whose host is not one of the recognized paper
  /// sources (semanticscholar.org, arxiv.org, aclweb.org, acm.org,
  /// biorxiv.org).
  #[error("Unsupported source: {0}")]
  UnsupportedSource(String),

  /// Failed to parse a user-supplied URL identifier.
  #[error(transparent)]
  InvalidUrl(#[from] url::ParseError),

  /// The API answered, but the response carried no `paperId` field, so
  /// the input could not be resolved to a canonical identifier.
  #[error("API response has no paper identifier")]
  UnresolvedId,

  /// The requested paper does not exist (HTTP 404).
  ///
  /// The identifier was well-formed but the graph has no record for it,
  /// or the record has been withdrawn.
  #[error("Paper not found")]
  NotFound,

  /// The request exceeded the 10 second budget.
  ///
  /// There is no retry; the caller decides whether to try again.
  #[error("Request timed out")]
  Timeout,

  /// Any other transport failure (DNS, TLS, connection reset, ...).
  #[error(transparent)]
  Network(#[from] reqwest::Error),

  /// The API returned a non-success status other than 404.
  ///
  /// Carries the HTTP status code and the response body for debugging.
  #[error("API error ({0}): {1}")]
  Api(u16, String),

  /// The payload failed schema validation: a field the data model
  /// requires was absent or had the wrong shape.
  ///
  /// Deserialization is the single validation step at the API boundary;
  /// nullable citation counts are *not* reported through this variant,
  /// they are deliberately coerced to zero during flattening.
  #[error("Invalid paper payload: {0}")]
  MissingField(String),
}
