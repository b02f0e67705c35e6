//! Listing parameters: sort allowlist, order, and pagination.
//!
//! Everything here is validated on construction. Storage backends turn a
//! [`SortColumn`] or [`SortOrder`] into SQL only through their `as_str`
//! fragments, never by echoing caller input.

use std::str::FromStr;

use serde::Serialize;

use crate::{Error, Missing, Result, validate::positive_or};

// ─── Sort column ─────────────────────────────────────────────────────────────

/// Columns an article listing may be sorted by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortColumn {
  Author,
  Title,
  ArticleId,
  Topic,
  #[default]
  CreatedAt,
  Votes,
  ArticleImgUrl,
  CommentCount,
}

impl SortColumn {
  pub const ALL: [SortColumn; 8] = [
    SortColumn::Author,
    SortColumn::Title,
    SortColumn::ArticleId,
    SortColumn::Topic,
    SortColumn::CreatedAt,
    SortColumn::Votes,
    SortColumn::ArticleImgUrl,
    SortColumn::CommentCount,
  ];

  pub fn as_str(self) -> &'static str {
    match self {
      SortColumn::Author => "author",
      SortColumn::Title => "title",
      SortColumn::ArticleId => "article_id",
      SortColumn::Topic => "topic",
      SortColumn::CreatedAt => "created_at",
      SortColumn::Votes => "votes",
      SortColumn::ArticleImgUrl => "article_img_url",
      SortColumn::CommentCount => "comment_count",
    }
  }
}

impl FromStr for SortColumn {
  type Err = Error;

  fn from_str(s: &str) -> Result<Self> {
    SortColumn::ALL
      .into_iter()
      .find(|c| c.as_str() == s)
      .ok_or_else(|| Error::invalid(format!("cannot sort by {s:?}")))
  }
}

// ─── Sort order ──────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
  Asc,
  #[default]
  Desc,
}

impl SortOrder {
  pub fn as_str(self) -> &'static str {
    match self {
      SortOrder::Asc => "ASC",
      SortOrder::Desc => "DESC",
    }
  }
}

impl FromStr for SortOrder {
  type Err = Error;

  fn from_str(s: &str) -> Result<Self> {
    if s.eq_ignore_ascii_case("asc") {
      Ok(SortOrder::Asc)
    } else if s.eq_ignore_ascii_case("desc") {
      Ok(SortOrder::Desc)
    } else {
      Err(Error::invalid(format!("unknown sort order {s:?}")))
    }
  }
}

// ─── Pagination ──────────────────────────────────────────────────────────────

pub const DEFAULT_LIMIT: u32 = 10;

/// A one-based page of `limit` rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
  pub limit: u32,
  pub page:  u32,
}

impl Default for PageRequest {
  fn default() -> Self {
    Self { limit: DEFAULT_LIMIT, page: 1 }
  }
}

impl PageRequest {
  /// Build from the raw `limit` and `p` query parameters.
  pub fn parse(limit: Option<&str>, page: Option<&str>) -> Result<Self> {
    Ok(Self {
      limit: positive_or("limit", limit, DEFAULT_LIMIT)?,
      page:  positive_or("p", page, 1)?,
    })
  }

  pub fn offset(&self) -> u64 {
    u64::from(self.page - 1) * u64::from(self.limit)
  }

  /// Fail with [`Missing::Page`] when this page starts past `total` rows.
  ///
  /// The first page is always in range so an empty collection lists as empty.
  pub fn ensure_within(&self, total: u64) -> Result<()> {
    if self.page > 1 && self.offset() >= total {
      return Err(Error::NotFound(Missing::Page));
    }
    Ok(())
  }
}

/// One page of results plus the number of rows matching before pagination.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Page<T> {
  pub items:       Vec<T>,
  pub total_count: u64,
}

// ─── Article listing ─────────────────────────────────────────────────────────

/// Parameters for [`NewsStore::list_articles`](crate::store::NewsStore::list_articles).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArticleQuery {
  /// Restrict to articles filed under this topic slug.
  pub topic:   Option<String>,
  pub sort_by: SortColumn,
  pub order:   SortOrder,
  pub page:    PageRequest,
}

impl ArticleQuery {
  /// Validate the raw query-string values of `GET /articles`.
  pub fn parse(
    topic: Option<String>,
    sort_by: Option<&str>,
    order: Option<&str>,
    limit: Option<&str>,
    page: Option<&str>,
  ) -> Result<Self> {
    Ok(Self {
      topic,
      sort_by: sort_by.map(str::parse::<SortColumn>).transpose()?.unwrap_or_default(),
      order: order.map(str::parse::<SortOrder>).transpose()?.unwrap_or_default(),
      page: PageRequest::parse(limit, page)?,
    })
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn defaults_to_newest_first_page_of_ten() {
    let q = ArticleQuery::parse(None, None, None, None, None).unwrap();
    assert_eq!(q.sort_by, SortColumn::CreatedAt);
    assert_eq!(q.order, SortOrder::Desc);
    assert_eq!(q.page, PageRequest { limit: 10, page: 1 });
  }

  #[test]
  fn every_allowlisted_column_parses() {
    for col in SortColumn::ALL {
      assert_eq!(col.as_str().parse::<SortColumn>().unwrap(), col);
    }
  }

  #[test]
  fn rejects_columns_outside_allowlist() {
    for bad in ["body", "votes; DROP TABLE articles", "VOTES", ""] {
      assert!(matches!(bad.parse::<SortColumn>(), Err(Error::InvalidInput(_))));
    }
  }

  #[test]
  fn order_is_case_insensitive() {
    assert_eq!("ASC".parse::<SortOrder>().unwrap(), SortOrder::Asc);
    assert_eq!("desc".parse::<SortOrder>().unwrap(), SortOrder::Desc);
    assert!("up".parse::<SortOrder>().is_err());
  }

  #[test]
  fn page_range_checks() {
    let p = PageRequest { limit: 5, page: 3 };
    assert_eq!(p.offset(), 10);
    assert!(p.ensure_within(11).is_ok());
    assert!(matches!(p.ensure_within(10), Err(Error::NotFound(Missing::Page))));
    assert!(PageRequest::default().ensure_within(0).is_ok());
  }

  #[test]
  fn parse_propagates_invalid_pagination() {
    assert!(ArticleQuery::parse(None, None, None, Some("0"), None).is_err());
    assert!(ArticleQuery::parse(None, None, None, None, Some("two")).is_err());
  }
}
