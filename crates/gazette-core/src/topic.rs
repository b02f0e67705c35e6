//! Topics: the category an article is filed under.

use serde::{Deserialize, Serialize};

/// A topic row. `slug` is the primary key and is never updated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Topic {
  pub slug:        String,
  pub description: String,
}
