//! Comment rows and the insert payload.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::id::{ArticleId, CommentId};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
  pub comment_id: CommentId,
  pub article_id: ArticleId,
  pub author:     String,
  pub body:       String,
  pub votes:      i64,
  pub created_at: DateTime<Utc>,
}

/// Validated input for [`NewsStore::add_comment`](crate::store::NewsStore::add_comment).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewComment {
  pub author: String,
  pub body:   String,
}
