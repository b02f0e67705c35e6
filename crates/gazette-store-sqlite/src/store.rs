//! [`SqliteStore`], the SQLite implementation of [`NewsStore`].

use std::path::Path;

use chrono::Utc;
use rusqlite::OptionalExtension as _;

use gazette_core::{
  Missing, Reference,
  article::{Article, ArticleSummary, NewArticle},
  comment::{Comment, NewComment},
  id::{ArticleId, CommentId},
  query::{ArticleQuery, Page, PageRequest},
  store::NewsStore,
  topic::Topic,
  user::User,
};

use crate::{
  Error, Result,
  encode::{
    ARTICLE_COLUMNS, COMMENT_COLUMNS, RawArticle, RawComment, RawSummary, encode_dt,
    topic_from_row, user_from_row,
  },
  listing::article_listing,
  schema::SCHEMA,
};

type CoreError = gazette_core::Error;

// ─── Store ───────────────────────────────────────────────────────────────────

/// A Gazette store backed by a single SQLite file.
///
/// Clones share one background connection.
#[derive(Clone)]
pub struct SqliteStore {
  pub(crate) conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open a private in-memory store.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  async fn fetch_article(&self, id: ArticleId) -> Result<Option<Article>> {
    let raw: Option<RawArticle> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              &format!(
                "SELECT {ARTICLE_COLUMNS}
                 FROM articles a
                 LEFT JOIN comments c ON c.article_id = a.article_id
                 WHERE a.article_id = ?1
                 GROUP BY a.article_id"
              ),
              rusqlite::params![id.get()],
              RawArticle::from_row,
            )
            .optional()?,
        )
      })
      .await?;

    raw.map(RawArticle::into_article).transpose()
  }
}

/// `true` if `sql` (a `SELECT 1 ... WHERE key = ?1`) yields a row for `key`.
fn row_exists(
  conn: &rusqlite::Connection,
  sql: &str,
  key: impl rusqlite::ToSql,
) -> rusqlite::Result<bool> {
  Ok(conn.query_row(sql, [key], |_| Ok(())).optional()?.is_some())
}

const ARTICLE_EXISTS: &str = "SELECT 1 FROM articles WHERE article_id = ?1";
const USER_EXISTS: &str = "SELECT 1 FROM users WHERE username = ?1";
const TOPIC_EXISTS: &str = "SELECT 1 FROM topics WHERE slug = ?1";

/// Statements reading and writing the `votes` counter of one table.
struct Votes {
  select: &'static str,
  update: &'static str,
}

const ARTICLE_VOTES: Votes = Votes {
  select: "SELECT votes FROM articles WHERE article_id = ?1",
  update: "UPDATE articles SET votes = ?1 WHERE article_id = ?2",
};

const COMMENT_VOTES: Votes = Votes {
  select: "SELECT votes FROM comments WHERE comment_id = ?1",
  update: "UPDATE comments SET votes = ?1 WHERE comment_id = ?2",
};

/// Add `delta` to the votes of row `id` in one transaction.
///
/// A sum outside the `i64` range is `InvalidInput` and leaves the row as it
/// was. SQLite would store such a sum as REAL.
fn add_votes(
  conn: &mut rusqlite::Connection,
  table: &Votes,
  id: i64,
  delta: i64,
) -> rusqlite::Result<std::result::Result<i64, CoreError>> {
  let tx = conn.transaction()?;
  let Some(votes) = tx
    .query_row(table.select, [id], |r| r.get::<_, i64>(0))
    .optional()?
  else {
    return Ok(Err(CoreError::NotFound(Missing::Row)));
  };
  let Some(total) = votes.checked_add(delta) else {
    return Ok(Err(CoreError::invalid(format!(
      "inc_votes {delta} takes votes {votes} out of range"
    ))));
  };
  tx.execute(table.update, rusqlite::params![total, id])?;
  tx.commit()?;
  Ok(Ok(total))
}

// ─── NewsStore impl ──────────────────────────────────────────────────────────

impl NewsStore for SqliteStore {
  type Error = Error;

  // ── Topics ────────────────────────────────────────────────────────────────

  async fn list_topics(&self) -> Result<Vec<Topic>> {
    let topics = self
      .conn
      .call(|conn| {
        let mut stmt = conn.prepare("SELECT slug, description FROM topics ORDER BY slug")?;
        let rows = stmt
          .query_map([], topic_from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;
    Ok(topics)
  }

  async fn get_topic(&self, slug: &str) -> Result<Option<Topic>> {
    let slug = slug.to_owned();
    let topic = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              "SELECT slug, description FROM topics WHERE slug = ?1",
              rusqlite::params![slug],
              topic_from_row,
            )
            .optional()?,
        )
      })
      .await?;
    Ok(topic)
  }

  async fn add_topic(&self, topic: Topic) -> Result<Topic> {
    let row = topic.clone();
    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO topics (slug, description) VALUES (?1, ?2)",
          rusqlite::params![row.slug, row.description],
        )?;
        Ok(())
      })
      .await?;
    Ok(topic)
  }

  // ── Users ─────────────────────────────────────────────────────────────────

  async fn list_users(&self) -> Result<Vec<User>> {
    let users = self
      .conn
      .call(|conn| {
        let mut stmt =
          conn.prepare("SELECT username, name, avatar_url FROM users ORDER BY username")?;
        let rows = stmt
          .query_map([], user_from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;
    Ok(users)
  }

  async fn get_user(&self, username: &str) -> Result<Option<User>> {
    let username = username.to_owned();
    let user = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              "SELECT username, name, avatar_url FROM users WHERE username = ?1",
              rusqlite::params![username],
              user_from_row,
            )
            .optional()?,
        )
      })
      .await?;
    Ok(user)
  }

  // ── Articles ──────────────────────────────────────────────────────────────

  async fn list_articles(&self, query: &ArticleQuery) -> Result<Page<ArticleSummary>> {
    if let Some(slug) = &query.topic
      && self.get_topic(slug).await?.is_none()
    {
      return Err(CoreError::NotFound(Missing::Topic).into());
    }

    let listing = article_listing(query);
    let page_params = listing.page_params();
    let count_sql = listing.count_sql;
    let page_sql = listing.page_sql;
    let filter = listing.filter;
    tracing::debug!(sql = %page_sql, "listing articles");

    let total: i64 = self
      .conn
      .call(move |conn| {
        Ok(conn.query_row(&count_sql, rusqlite::params_from_iter(filter), |r| r.get(0))?)
      })
      .await?;
    let total_count = u64::try_from(total).unwrap_or_default();

    if total_count == 0 && query.topic.is_some() {
      return Err(CoreError::NotFound(Missing::ArticlesForTopic).into());
    }
    query.page.ensure_within(total_count)?;

    let raws: Vec<RawSummary> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(&page_sql)?;
        let rows = stmt
          .query_map(rusqlite::params_from_iter(page_params), RawSummary::from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    let items = raws
      .into_iter()
      .map(RawSummary::into_summary)
      .collect::<Result<_>>()?;
    Ok(Page { items, total_count })
  }

  async fn get_article(&self, id: ArticleId) -> Result<Article> {
    self
      .fetch_article(id)
      .await?
      .ok_or(CoreError::NotFound(Missing::Row).into())
  }

  async fn add_article(&self, input: NewArticle) -> Result<Article> {
    let created_at = encode_dt(Utc::now());

    let inserted: std::result::Result<i64, Reference> = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;
        if !row_exists(&tx, USER_EXISTS, &input.author)? {
          return Ok(Err(Reference::Author));
        }
        if !row_exists(&tx, TOPIC_EXISTS, &input.topic)? {
          return Ok(Err(Reference::Topic));
        }
        tx.execute(
          "INSERT INTO articles (title, topic, author, body, created_at, article_img_url)
           VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
          rusqlite::params![
            input.title,
            input.topic,
            input.author,
            input.body,
            created_at,
            input.article_img_url,
          ],
        )?;
        let id = tx.last_insert_rowid();
        tx.commit()?;
        Ok(Ok(id))
      })
      .await?;

    let id = inserted.map_err(CoreError::ReferentialViolation)?;
    tracing::debug!(article_id = id, "article created");
    self.get_article(ArticleId(id)).await
  }

  async fn adjust_article_votes(&self, id: ArticleId, delta: i64) -> Result<Article> {
    let applied = self
      .conn
      .call(move |conn| Ok(add_votes(conn, &ARTICLE_VOTES, id.get(), delta)?))
      .await?;

    applied?;
    self.get_article(id).await
  }

  async fn remove_article(&self, id: ArticleId) -> Result<()> {
    let removed = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;
        let comments = tx.execute(
          "DELETE FROM comments WHERE article_id = ?1",
          rusqlite::params![id.get()],
        )?;
        let articles = tx.execute(
          "DELETE FROM articles WHERE article_id = ?1",
          rusqlite::params![id.get()],
        )?;
        if articles == 0 {
          // Dropping the transaction rolls it back.
          return Ok(None);
        }
        tx.commit()?;
        Ok(Some(comments))
      })
      .await?;

    match removed {
      Some(comments) => {
        tracing::debug!(article_id = id.get(), comments, "article removed");
        Ok(())
      }
      None => Err(CoreError::NotFound(Missing::Row).into()),
    }
  }

  // ── Comments ──────────────────────────────────────────────────────────────

  async fn list_comments(
    &self,
    article_id: ArticleId,
    page: PageRequest,
  ) -> Result<Page<Comment>> {
    let total: Option<i64> = self
      .conn
      .call(move |conn| {
        if !row_exists(conn, ARTICLE_EXISTS, article_id.get())? {
          return Ok(None);
        }
        let n = conn.query_row(
          "SELECT COUNT(*) FROM comments WHERE article_id = ?1",
          rusqlite::params![article_id.get()],
          |r| r.get(0),
        )?;
        Ok(Some(n))
      })
      .await?;

    let total_count = match total {
      Some(n) => u64::try_from(n).unwrap_or_default(),
      None => return Err(CoreError::NotFound(Missing::Row).into()),
    };
    page.ensure_within(total_count)?;

    let limit = i64::from(page.limit);
    let offset = i64::try_from(page.offset()).unwrap_or(i64::MAX);

    let raws: Vec<RawComment> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(&format!(
          "SELECT {COMMENT_COLUMNS} FROM comments
           WHERE article_id = ?1
           ORDER BY created_at DESC, comment_id DESC
           LIMIT ?2 OFFSET ?3"
        ))?;
        let rows = stmt
          .query_map(
            rusqlite::params![article_id.get(), limit, offset],
            RawComment::from_row,
          )?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    let items = raws
      .into_iter()
      .map(RawComment::into_comment)
      .collect::<Result<_>>()?;
    Ok(Page { items, total_count })
  }

  async fn add_comment(&self, article_id: ArticleId, input: NewComment) -> Result<Comment> {
    let created_at = encode_dt(Utc::now());

    let raw: std::result::Result<RawComment, CoreError> = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;
        if !row_exists(&tx, ARTICLE_EXISTS, article_id.get())? {
          return Ok(Err(CoreError::NotFound(Missing::Row)));
        }
        if !row_exists(&tx, USER_EXISTS, &input.author)? {
          return Ok(Err(CoreError::ReferentialViolation(Reference::Author)));
        }
        let raw = tx.query_row(
          &format!(
            "INSERT INTO comments (article_id, author, body, created_at)
             VALUES (?1, ?2, ?3, ?4)
             RETURNING {COMMENT_COLUMNS}"
          ),
          rusqlite::params![article_id.get(), input.author, input.body, created_at],
          RawComment::from_row,
        )?;
        tx.commit()?;
        Ok(Ok(raw))
      })
      .await?;

    raw?.into_comment()
  }

  async fn adjust_comment_votes(&self, id: CommentId, delta: i64) -> Result<Comment> {
    let raw: std::result::Result<RawComment, CoreError> = self
      .conn
      .call(move |conn| {
        if let Err(e) = add_votes(conn, &COMMENT_VOTES, id.get(), delta)? {
          return Ok(Err(e));
        }
        let raw = conn.query_row(
          &format!("SELECT {COMMENT_COLUMNS} FROM comments WHERE comment_id = ?1"),
          rusqlite::params![id.get()],
          RawComment::from_row,
        )?;
        Ok(Ok(raw))
      })
      .await?;

    raw?.into_comment()
  }

  async fn remove_comment(&self, id: CommentId) -> Result<()> {
    let removed = self
      .conn
      .call(move |conn| {
        Ok(conn.execute(
          "DELETE FROM comments WHERE comment_id = ?1",
          rusqlite::params![id.get()],
        )?)
      })
      .await?;

    if removed == 0 {
      return Err(CoreError::NotFound(Missing::Row).into());
    }
    Ok(())
  }
}
