//! Error types for `gazette-core`.
//!
//! Every accessor failure is one of a small taxonomy. The HTTP layer maps
//! each variant to a status code; the store layer maps driver errors into it.

use thiserror::Error;

/// What a [`Error::NotFound`] failed to find.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Missing {
  /// A row addressed by a well-formed identifier.
  Row,
  /// A topic used as a listing filter.
  Topic,
  /// A known topic that no article references.
  ArticlesForTopic,
  /// A page past the last page of a listing.
  Page,
}

impl Missing {
  pub fn message(self) -> &'static str {
    match self {
      Missing::Row | Missing::Page => "Not found",
      Missing::Topic => "Topic not found",
      Missing::ArticlesForTopic => "No articles found with this topic",
    }
  }
}

/// The foreign key a write referenced but which has no row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reference {
  Author,
  Topic,
  Article,
  /// Reported by the database without telling us which key.
  Unknown,
}

impl Reference {
  pub fn message(self) -> &'static str {
    match self {
      Reference::Author => "Author not found",
      Reference::Topic => "Topic not found",
      Reference::Article | Reference::Unknown => "Not found",
    }
  }
}

#[derive(Debug, Error)]
pub enum Error {
  #[error("invalid input: {0}")]
  InvalidInput(String),

  #[error("{}", .0.message())]
  NotFound(Missing),

  #[error("{}", .0.message())]
  ReferentialViolation(Reference),

  #[error("duplicate key: {0}")]
  DuplicateKey(String),

  #[error("store error: {0}")]
  Store(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl Error {
  pub fn invalid(detail: impl Into<String>) -> Self {
    Error::InvalidInput(detail.into())
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
