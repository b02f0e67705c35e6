//! The `NewsStore` trait: one validated accessor per resource operation.
//!
//! The trait is implemented by storage backends (e.g. `gazette-store-sqlite`).
//! The HTTP layer depends on this abstraction, not on any concrete backend.

use std::future::Future;

use crate::{
  article::{Article, ArticleSummary, NewArticle},
  comment::{Comment, NewComment},
  id::{ArticleId, CommentId},
  query::{ArticleQuery, Page, PageRequest},
  topic::Topic,
  user::User,
};

/// Abstraction over a Gazette storage backend.
///
/// Identifiers arrive already validated ([`ArticleId`] and [`CommentId`] can
/// only be built from positive integers). A well-formed identifier with no
/// row is reported as [`Error::NotFound`](crate::Error::NotFound).
///
/// Backend errors must convert into [`crate::Error`] so callers can classify
/// them without knowing the backend.
///
/// All methods return `Send` futures so the trait can be used in multi-threaded
/// async runtimes (e.g. tokio with `axum`).
pub trait NewsStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + Into<crate::Error> + 'static;

  // ── Topics ────────────────────────────────────────────────────────────

  fn list_topics(&self) -> impl Future<Output = Result<Vec<Topic>, Self::Error>> + Send + '_;

  /// Retrieve a topic by slug. Returns `None` if not found.
  fn get_topic<'a>(
    &'a self,
    slug: &'a str,
  ) -> impl Future<Output = Result<Option<Topic>, Self::Error>> + Send + 'a;

  /// Insert a topic. An existing slug is a duplicate-key failure.
  fn add_topic(
    &self,
    topic: Topic,
  ) -> impl Future<Output = Result<Topic, Self::Error>> + Send + '_;

  // ── Users ─────────────────────────────────────────────────────────────

  fn list_users(&self) -> impl Future<Output = Result<Vec<User>, Self::Error>> + Send + '_;

  /// Retrieve a user by username. Returns `None` if not found.
  fn get_user<'a>(
    &'a self,
    username: &'a str,
  ) -> impl Future<Output = Result<Option<User>, Self::Error>> + Send + 'a;

  // ── Articles ──────────────────────────────────────────────────────────

  /// Filter, sort and paginate articles.
  ///
  /// Fails with `NotFound` when the topic filter names an unknown topic, when
  /// a known topic has no articles, or when the page is past the last page.
  fn list_articles<'a>(
    &'a self,
    query: &'a ArticleQuery,
  ) -> impl Future<Output = Result<Page<ArticleSummary>, Self::Error>> + Send + 'a;

  fn get_article(
    &self,
    id: ArticleId,
  ) -> impl Future<Output = Result<Article, Self::Error>> + Send + '_;

  /// Insert an article. Author and topic must already exist; each missing
  /// reference is reported separately.
  fn add_article(
    &self,
    input: NewArticle,
  ) -> impl Future<Output = Result<Article, Self::Error>> + Send + '_;

  /// Add a signed `delta` to an article's votes and return the result.
  fn adjust_article_votes(
    &self,
    id: ArticleId,
    delta: i64,
  ) -> impl Future<Output = Result<Article, Self::Error>> + Send + '_;

  /// Delete an article and all of its comments in one transaction.
  fn remove_article(
    &self,
    id: ArticleId,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  // ── Comments ──────────────────────────────────────────────────────────

  /// Comments on an article, newest first. The article must exist.
  fn list_comments(
    &self,
    article_id: ArticleId,
    page: PageRequest,
  ) -> impl Future<Output = Result<Page<Comment>, Self::Error>> + Send + '_;

  /// Post a comment. The article must exist and `input.author` must be a
  /// known user.
  fn add_comment(
    &self,
    article_id: ArticleId,
    input: NewComment,
  ) -> impl Future<Output = Result<Comment, Self::Error>> + Send + '_;

  fn adjust_comment_votes(
    &self,
    id: CommentId,
    delta: i64,
  ) -> impl Future<Output = Result<Comment, Self::Error>> + Send + '_;

  fn remove_comment(
    &self,
    id: CommentId,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;
}
