//! Error types for the citescope CLI.
//!
//! A thin transparent wrapper over the library's error type plus the IO
//! failures a terminal front-end can hit, so `main` can use `?` freely
//! while the underlying messages still reach the user unchanged.

use thiserror::Error;

/// Errors that can occur while running the CLI.
#[derive(Error, Debug)]
pub enum CitescopeCliError {
  /// Errors from the underlying citescope library
  #[error(transparent)]
  Citescope(#[from] citescope::CitescopeError),

  /// File system and IO operation errors
  #[error(transparent)]
  IO(#[from] std::io::Error),
}
