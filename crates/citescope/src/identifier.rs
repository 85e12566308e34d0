//! Identifier resolution for the Semantic Scholar graph.
//!
//! The API addresses papers either by its own hash identifier or by a
//! tagged external identifier such as `DOI:10.1145/3292500` or
//! `ARXIV:2301.07041`. This module turns a user-supplied string plus an
//! [`IdKind`] into the domain-qualified query string the API expects,
//! validating URL inputs against the set of recognized paper sources.
//!
//! # Examples
//!
//! ```
//! use citescope::{IdKind, PaperQuery};
//!
//! let query = PaperQuery::new("10.1145/1327452.1327492", IdKind::Doi)?;
//! assert_eq!(query.as_str(), "DOI:10.1145/1327452.1327492");
//!
//! let query = PaperQuery::new("https://arxiv.org/abs/2301.07041", IdKind::Url)?;
//! assert_eq!(query.as_str(), "URL:https://arxiv.org/abs/2301.07041");
//! # Ok::<(), citescope::CitescopeError>(())
//! ```

use std::str::FromStr;

use url::Url;

use super::*;

/// Website hosts the API accepts inside a `URL:` query.
pub const RECOGNIZED_DOMAINS: [&str; 5] =
  ["semanticscholar.org", "arxiv.org", "aclweb.org", "acm.org", "biorxiv.org"];

/// The kind of identifier the user supplied.
///
/// Each non-URL kind corresponds to a literal tag the API understands;
/// the identifier body is passed through untouched. URL inputs are the
/// exception: their host must belong to [`RECOGNIZED_DOMAINS`].
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
pub enum IdKind {
  /// A paper landing-page URL from a recognized source website
  Url,
  /// A Digital Object Identifier
  Doi,
  /// An arxiv.org identifier (e.g., 2301.07041)
  Arxiv,
  /// A Microsoft Academic Graph identifier
  Mag,
  /// An ACL Anthology identifier
  Acl,
  /// A PubMed identifier
  Pmid,
  /// A PubMed Central identifier
  Pmcid,
}

impl IdKind {
  /// Every kind, in the order the front-end offers them.
  pub const ALL: [IdKind; 7] =
    [IdKind::Url, IdKind::Doi, IdKind::Arxiv, IdKind::Mag, IdKind::Acl, IdKind::Pmid, IdKind::Pmcid];

  /// The literal tag prefixed to the identifier in the API path.
  pub fn api_tag(&self) -> &'static str {
    match self {
      IdKind::Url => "URL:",
      IdKind::Doi => "DOI:",
      IdKind::Arxiv => "ARXIV:",
      IdKind::Mag => "MAG:",
      IdKind::Acl => "ACL:",
      IdKind::Pmid => "PMID:",
      IdKind::Pmcid => "PMCID:",
    }
  }
}

impl std::fmt::Display for IdKind {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match self {
      IdKind::Url => write!(f, "URL"),
      IdKind::Doi => write!(f, "DOI"),
      IdKind::Arxiv => write!(f, "ARXIV"),
      IdKind::Mag => write!(f, "MAG"),
      IdKind::Acl => write!(f, "ACL"),
      IdKind::Pmid => write!(f, "PMID"),
      IdKind::Pmcid => write!(f, "PMCID"),
    }
  }
}

impl FromStr for IdKind {
  type Err = CitescopeError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match &s.to_lowercase() as &str {
      "url" => Ok(IdKind::Url),
      "doi" => Ok(IdKind::Doi),
      "arxiv" => Ok(IdKind::Arxiv),
      "mag" => Ok(IdKind::Mag),
      "acl" => Ok(IdKind::Acl),
      "pmid" => Ok(IdKind::Pmid),
      "pmcid" => Ok(IdKind::Pmcid),
      s => Err(CitescopeError::UnsupportedSource(s.to_owned())),
    }
  }
}

/// A canonical Semantic Scholar paper identifier, as returned by
/// [`SemanticScholarClient::resolve`](crate::SemanticScholarClient::resolve)
/// or lifted straight from a reference row for drill-down.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct PaperId(pub String);

impl PaperId {
  /// The identifier as a path segment.
  pub fn as_str(&self) -> &str { &self.0 }
}

impl std::fmt::Display for PaperId {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result { write!(f, "{}", self.0) }
}

/// A validated, domain-qualified query string for the paper lookup
/// endpoint. Construction is pure; no network call happens until the
/// query is handed to a client.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct PaperQuery(String);

impl PaperQuery {
  /// Builds the query for `input` interpreted as `kind`.
  ///
  /// For [`IdKind::Url`] the input must parse as a URL and its host must
  /// end with one of [`RECOGNIZED_DOMAINS`]; anything else fails with
  /// [`CitescopeError::UnsupportedSource`]. All other kinds prefix their
  /// API tag without validating the identifier's shape, mirroring what
  /// the API itself accepts.
  pub fn new(input: &str, kind: IdKind) -> Result<Self, CitescopeError> {
    if kind == IdKind::Url {
      let url = Url::parse(input)?;
      let host = url.host_str().unwrap_or_default();
      if !recognized_host(host) {
        return Err(CitescopeError::UnsupportedSource(host.to_owned()));
      }
    }
    Ok(Self(format!("{}{}", kind.api_tag(), input)))
  }

  /// The query as a path segment.
  pub fn as_str(&self) -> &str { &self.0 }
}

impl std::fmt::Display for PaperQuery {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result { write!(f, "{}", self.0) }
}

/// Whether `host` is one of the recognized source websites, including
/// subdomains like `www.arxiv.org` or `dl.acm.org`.
fn recognized_host(host: &str) -> bool {
  RECOGNIZED_DOMAINS
    .iter()
    .any(|domain| host == *domain || host.ends_with(&format!(".{domain}")))
}
