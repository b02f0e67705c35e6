//! Encoding and decoding helpers between Rust domain types and the plain-text
//! representations stored in SQLite columns.
//!
//! Timestamps are stored as RFC 3339 strings with millisecond precision and a
//! `Z` suffix, so lexical order in SQL is chronological order.

use chrono::{DateTime, SecondsFormat, Utc};
use gazette_core::{
  article::{Article, ArticleSummary},
  comment::Comment,
  id::{ArticleId, CommentId},
  topic::Topic,
  user::User,
};

use crate::{Error, Result};

// ─── DateTime<Utc>
// ────────────────────────────────────────────────────────────

pub fn encode_dt(dt: DateTime<Utc>) -> String {
  dt.to_rfc3339_opts(SecondsFormat::Millis, true)
}

pub fn decode_dt(s: &str) -> Result<DateTime<Utc>> {
  DateTime::parse_from_rfc3339(s)
    .map(|dt| dt.with_timezone(&Utc))
    .map_err(|e| Error::DateParse(e.to_string()))
}

// ─── Row types ───────────────────────────────────────────────────────────────

pub const ARTICLE_COLUMNS: &str = "a.article_id, a.author, a.title, a.body, a.topic,
       a.created_at, a.votes, a.article_img_url,
       COUNT(c.comment_id) AS comment_count";

pub const SUMMARY_COLUMNS: &str = "a.article_id, a.author, a.title, a.topic,
       a.created_at, a.votes, a.article_img_url,
       COUNT(c.comment_id) AS comment_count";

pub const COMMENT_COLUMNS: &str =
  "comment_id, article_id, author, body, votes, created_at";

/// Raw values read from an `articles` row joined with its comment count.
pub struct RawArticle {
  pub article_id:      i64,
  pub author:          String,
  pub title:           String,
  pub body:            String,
  pub topic:           String,
  pub created_at:      String,
  pub votes:           i64,
  pub article_img_url: String,
  pub comment_count:   i64,
}

impl RawArticle {
  /// Reads a row selected with [`ARTICLE_COLUMNS`].
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      article_id:      row.get(0)?,
      author:          row.get(1)?,
      title:           row.get(2)?,
      body:            row.get(3)?,
      topic:           row.get(4)?,
      created_at:      row.get(5)?,
      votes:           row.get(6)?,
      article_img_url: row.get(7)?,
      comment_count:   row.get(8)?,
    })
  }

  pub fn into_article(self) -> Result<Article> {
    Ok(Article {
      article_id:      ArticleId(self.article_id),
      author:          self.author,
      title:           self.title,
      body:            self.body,
      topic:           self.topic,
      created_at:      decode_dt(&self.created_at)?,
      votes:           self.votes,
      article_img_url: self.article_img_url,
      comment_count:   self.comment_count,
    })
  }
}

/// Raw values read from a listing row (no body).
pub struct RawSummary {
  pub article_id:      i64,
  pub author:          String,
  pub title:           String,
  pub topic:           String,
  pub created_at:      String,
  pub votes:           i64,
  pub article_img_url: String,
  pub comment_count:   i64,
}

impl RawSummary {
  /// Reads a row selected with [`SUMMARY_COLUMNS`].
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      article_id:      row.get(0)?,
      author:          row.get(1)?,
      title:           row.get(2)?,
      topic:           row.get(3)?,
      created_at:      row.get(4)?,
      votes:           row.get(5)?,
      article_img_url: row.get(6)?,
      comment_count:   row.get(7)?,
    })
  }

  pub fn into_summary(self) -> Result<ArticleSummary> {
    Ok(ArticleSummary {
      article_id:      ArticleId(self.article_id),
      author:          self.author,
      title:           self.title,
      topic:           self.topic,
      created_at:      decode_dt(&self.created_at)?,
      votes:           self.votes,
      article_img_url: self.article_img_url,
      comment_count:   self.comment_count,
    })
  }
}

/// Raw values read from a `comments` row.
pub struct RawComment {
  pub comment_id: i64,
  pub article_id: i64,
  pub author:     String,
  pub body:       String,
  pub votes:      i64,
  pub created_at: String,
}

impl RawComment {
  /// Reads a row selected with [`COMMENT_COLUMNS`].
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      comment_id: row.get(0)?,
      article_id: row.get(1)?,
      author:     row.get(2)?,
      body:       row.get(3)?,
      votes:      row.get(4)?,
      created_at: row.get(5)?,
    })
  }

  pub fn into_comment(self) -> Result<Comment> {
    Ok(Comment {
      comment_id: CommentId(self.comment_id),
      article_id: ArticleId(self.article_id),
      author:     self.author,
      body:       self.body,
      votes:      self.votes,
      created_at: decode_dt(&self.created_at)?,
    })
  }
}

pub fn topic_from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Topic> {
  Ok(Topic { slug: row.get(0)?, description: row.get(1)? })
}

pub fn user_from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<User> {
  Ok(User {
    username:   row.get(0)?,
    name:       row.get(1)?,
    avatar_url: row.get(2)?,
  })
}
