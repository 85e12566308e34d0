//! A library for exploring a paper's citation graph through the Semantic
//! Scholar API: resolve an identifier, fetch the paper with its reference
//! list, and reshape the references into a table ready for a timeline
//! visualization.
//!
//! # Example
//! ```rust,no_run
//! use citescope::{IdKind, PaperQuery, SemanticScholarClient, TableMode};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!   let client = SemanticScholarClient::new();
//!
//!   let query = PaperQuery::new("https://arxiv.org/abs/2301.07041", IdKind::Url)?;
//!   let id = client.resolve(&query).await?;
//!   let paper = client.fetch_paper(&id).await?;
//!
//!   let table = citescope::table::ReferenceTable::build(&paper.references, TableMode::default());
//!   println!("{} references across {} venues", table.rows.len(), table.venue_count());
//!
//!   Ok(())
//! }
//! ```

#![warn(missing_docs, clippy::missing_docs_in_private_items)]

use serde::{Deserialize, Serialize};
use tracing::debug;

pub mod clients;
pub mod errors;
pub mod identifier;
pub mod paper;
pub mod table;

pub use clients::SemanticScholarClient;
pub use errors::CitescopeError;
pub use identifier::{IdKind, PaperId, PaperQuery};
pub use paper::{Author, Paper, Reference};
pub use table::{Metric, ReferenceTable, TableMode};
