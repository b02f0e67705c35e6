use serde::{Deserialize, Serialize};

/// A registered author. Articles and comments reference `username`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
  pub username:   String,
  pub name:       String,
  pub avatar_url: String,
}
