//! Article read models and the insert payload.
//!
//! The store never hands out a bare article row: reads always carry the
//! derived `comment_count`. Listings use [`ArticleSummary`], which drops the
//! body.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::id::ArticleId;

/// Image used when an article is created without `article_img_url`.
pub const DEFAULT_ARTICLE_IMG_URL: &str =
  "https://images.pexels.com/photos/97050/pexels-photo-97050.jpeg?w=700&h=700";

/// A single article, including its body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Article {
  pub article_id:      ArticleId,
  pub author:          String,
  pub title:           String,
  pub body:            String,
  pub topic:           String,
  pub created_at:      DateTime<Utc>,
  pub votes:           i64,
  pub article_img_url: String,
  pub comment_count:   i64,
}

/// An article as it appears in a listing: everything except `body`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArticleSummary {
  pub article_id:      ArticleId,
  pub author:          String,
  pub title:           String,
  pub topic:           String,
  pub created_at:      DateTime<Utc>,
  pub votes:           i64,
  pub article_img_url: String,
  pub comment_count:   i64,
}

/// Validated input for [`NewsStore::add_article`](crate::store::NewsStore::add_article).
///
/// `created_at` and `votes` are always assigned by the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewArticle {
  pub author:          String,
  pub title:           String,
  pub body:            String,
  pub topic:           String,
  pub article_img_url: String,
}
