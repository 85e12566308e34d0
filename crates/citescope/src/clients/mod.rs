//! Client implementations for the paper metadata APIs citescope talks to.
//!
//! Currently a single client exists, for the Semantic Scholar Academic
//! Graph. It handles both halves of a lookup:
//! - Resolving a tagged identifier query to a canonical paper id
//! - Fetching the paper record with its nested reference list
//!
//! # Examples
//!
//! ```no_run
//! use citescope::{clients::SemanticScholarClient, IdKind, PaperQuery};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = SemanticScholarClient::new();
//!
//! let query = PaperQuery::new("2301.07041", IdKind::Arxiv)?;
//! let id = client.resolve(&query).await?;
//! let paper = client.fetch_paper(&id).await?;
//!
//! println!("Title: {}", paper.title_or_default());
//! println!("References: {}", paper.references.len());
//! # Ok(())
//! # }
//! ```

pub mod semantic_scholar;

pub use semantic_scholar::SemanticScholarClient;

use super::*;
