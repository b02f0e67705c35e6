//! SQL assembly for the article listing.
//!
//! The only text spliced into a statement comes from [`SortColumn::as_str`]
//! and [`SortOrder::as_str`] (via [`order_expr`]). The topic filter, `LIMIT`
//! and `OFFSET` are always bound parameters.

use gazette_core::query::{ArticleQuery, SortColumn};
use rusqlite::types::Value;

use crate::encode::SUMMARY_COLUMNS;

/// A prepared pair of statements for one listing request.
#[derive(Debug, Clone, PartialEq)]
pub struct Listing {
  /// Counts every matching row, ignoring pagination. Binds `filter`.
  pub count_sql: String,
  /// Selects one page. Binds `filter`, then limit, then offset.
  pub page_sql:  String,
  pub filter:    Vec<Value>,
  pub limit:     i64,
  pub offset:    i64,
}

impl Listing {
  /// Parameters for [`Listing::page_sql`].
  pub fn page_params(&self) -> Vec<Value> {
    let mut params = self.filter.clone();
    params.push(Value::Integer(self.limit));
    params.push(Value::Integer(self.offset));
    params
  }
}

fn order_expr(col: SortColumn) -> &'static str {
  match col {
    SortColumn::Author => "a.author",
    SortColumn::Title => "a.title",
    SortColumn::ArticleId => "a.article_id",
    SortColumn::Topic => "a.topic",
    SortColumn::CreatedAt => "a.created_at",
    SortColumn::Votes => "a.votes",
    SortColumn::ArticleImgUrl => "a.article_img_url",
    SortColumn::CommentCount => "comment_count",
  }
}

pub fn article_listing(query: &ArticleQuery) -> Listing {
  let mut conds: Vec<&'static str> = vec![];
  let mut filter = vec![];

  if let Some(topic) = &query.topic {
    conds.push("a.topic = ?");
    filter.push(Value::Text(topic.clone()));
  }

  let where_clause = if conds.is_empty() {
    String::new()
  } else {
    format!("WHERE {}", conds.join(" AND "))
  };

  let dir = query.order.as_str();
  let tie_break = if query.sort_by == SortColumn::ArticleId {
    String::new()
  } else {
    format!(", a.article_id {dir}")
  };

  let count_sql = format!("SELECT COUNT(*) FROM articles a {where_clause}");

  let page_sql = format!(
    "SELECT {SUMMARY_COLUMNS}
     FROM articles a
     LEFT JOIN comments c ON c.article_id = a.article_id
     {where_clause}
     GROUP BY a.article_id
     ORDER BY {} {dir}{tie_break}
     LIMIT ? OFFSET ?",
    order_expr(query.sort_by),
  );

  Listing {
    count_sql,
    page_sql,
    filter,
    limit: i64::from(query.page.limit),
    offset: i64::try_from(query.page.offset()).unwrap_or(i64::MAX),
  }
}

#[cfg(test)]
mod tests {
  use gazette_core::query::{PageRequest, SortOrder};

  use super::*;

  fn placeholders(sql: &str) -> usize { sql.matches('?').count() }

  #[test]
  fn default_listing_is_newest_first_without_filter() {
    let listing = article_listing(&ArticleQuery::default());
    assert!(listing.page_sql.contains("ORDER BY a.created_at DESC, a.article_id DESC"));
    assert!(!listing.page_sql.contains("WHERE"));
    assert!(listing.filter.is_empty());
    assert_eq!(listing.limit, 10);
    assert_eq!(listing.offset, 0);
  }

  #[test]
  fn topic_filter_is_bound_not_interpolated() {
    let query = ArticleQuery {
      topic: Some("mitch' OR 1=1 --".into()),
      ..Default::default()
    };
    let listing = article_listing(&query);
    assert!(!listing.page_sql.contains("mitch"));
    assert!(!listing.count_sql.contains("mitch"));
    assert_eq!(listing.filter, vec![Value::Text("mitch' OR 1=1 --".into())]);
    assert_eq!(placeholders(&listing.count_sql), listing.filter.len());
    assert_eq!(placeholders(&listing.page_sql), listing.page_params().len());
  }

  #[test]
  fn sorts_by_derived_comment_count() {
    let query = ArticleQuery {
      sort_by: SortColumn::CommentCount,
      order: SortOrder::Asc,
      ..Default::default()
    };
    let listing = article_listing(&query);
    assert!(listing.page_sql.contains("ORDER BY comment_count ASC, a.article_id ASC"));
  }

  #[test]
  fn article_id_sort_needs_no_tie_break() {
    let query = ArticleQuery { sort_by: SortColumn::ArticleId, ..Default::default() };
    let listing = article_listing(&query);
    assert!(listing.page_sql.contains("ORDER BY a.article_id DESC\n"));
  }

  #[test]
  fn pagination_offsets() {
    let query = ArticleQuery {
      page: PageRequest { limit: 5, page: 3 },
      ..Default::default()
    };
    let listing = article_listing(&query);
    assert_eq!(listing.page_params(), vec![Value::Integer(5), Value::Integer(10)]);
  }
}
