//! A complete dataset for resetting a store.
//!
//! Articles are numbered from 1 in the order they appear; comments refer to
//! them by that number.

use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::{id::ArticleId, topic::Topic, user::User};

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SeedData {
  #[serde(default)]
  pub topics:   Vec<Topic>,
  #[serde(default)]
  pub users:    Vec<User>,
  #[serde(default)]
  pub articles: Vec<SeedArticle>,
  #[serde(default)]
  pub comments: Vec<SeedComment>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SeedArticle {
  pub title:           String,
  pub topic:           String,
  pub author:          String,
  pub body:            String,
  pub created_at:      DateTime<Utc>,
  #[serde(default)]
  pub votes:           i64,
  pub article_img_url: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SeedComment {
  pub article_id: ArticleId,
  pub author:     String,
  pub body:       String,
  #[serde(default)]
  pub votes:      i64,
  pub created_at: DateTime<Utc>,
}

impl SeedData {
  pub fn from_json(s: &str) -> crate::Result<Self> {
    serde_json::from_str(s).map_err(|e| crate::Error::invalid(format!("seed data: {e}")))
  }
}
