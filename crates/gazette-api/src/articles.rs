//! Handlers for `/articles` endpoints.
//!
//! | Method   | Path | Notes |
//! |----------|------|-------|
//! | `GET`    | `/articles` | Optional `topic`, `sort_by`, `order`, `limit`, `p` |
//! | `POST`   | `/articles` | Body: [`CreateBody`]; returns 201 + article |
//! | `GET`    | `/articles/:article_id` | Includes `body` and `comment_count` |
//! | `PATCH`  | `/articles/:article_id` | Body: `{"inc_votes": <int>}` |
//! | `DELETE` | `/articles/:article_id` | 204; also removes the article's comments |

use std::sync::Arc;

use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use gazette_core::{
  article::{Article, ArticleSummary, DEFAULT_ARTICLE_IMG_URL, NewArticle},
  id::ArticleId,
  query::ArticleQuery,
  store::NewsStore,
  validate::{required, required_int},
};
use serde::{Deserialize, Serialize};

use crate::{
  error::ApiError,
  extract::{JsonBody, PathParam, QueryParams},
};

#[derive(Debug, Serialize)]
pub struct ArticlesEnvelope {
  pub articles:    Vec<ArticleSummary>,
  pub total_count: u64,
}

#[derive(Debug, Serialize)]
pub struct ArticleEnvelope {
  pub article: Article,
}

// ─── List ─────────────────────────────────────────────────────────────────────

/// Raw query string; every value is validated by [`ArticleQuery::parse`].
#[derive(Debug, Deserialize, Default)]
pub struct ListParams {
  pub topic:   Option<String>,
  pub sort_by: Option<String>,
  pub order:   Option<String>,
  pub limit:   Option<String>,
  pub p:       Option<String>,
}

/// `GET /articles[?topic=...][&sort_by=...][&order=asc|desc][&limit=...][&p=...]`
pub async fn list<S: NewsStore>(
  State(store): State<Arc<S>>,
  QueryParams(params): QueryParams<ListParams>,
) -> Result<Json<ArticlesEnvelope>, ApiError> {
  let query = ArticleQuery::parse(
    params.topic,
    params.sort_by.as_deref(),
    params.order.as_deref(),
    params.limit.as_deref(),
    params.p.as_deref(),
  )?;
  let page = store.list_articles(&query).await.map_err(ApiError::from_store)?;
  Ok(Json(ArticlesEnvelope {
    articles:    page.items,
    total_count: page.total_count,
  }))
}

// ─── Create ───────────────────────────────────────────────────────────────────

/// JSON body accepted by `POST /articles`.
#[derive(Debug, Deserialize)]
pub struct CreateBody {
  pub author:          Option<String>,
  pub title:           Option<String>,
  pub body:            Option<String>,
  pub topic:           Option<String>,
  pub article_img_url: Option<String>,
}

impl TryFrom<CreateBody> for NewArticle {
  type Error = gazette_core::Error;

  fn try_from(b: CreateBody) -> Result<Self, Self::Error> {
    Ok(NewArticle {
      author:          required("author", b.author)?,
      title:           required("title", b.title)?,
      body:            required("body", b.body)?,
      topic:           required("topic", b.topic)?,
      article_img_url: b
        .article_img_url
        .filter(|url| !url.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_ARTICLE_IMG_URL.to_owned()),
    })
  }
}

/// `POST /articles`, returning 201 and the stored article.
pub async fn create<S: NewsStore>(
  State(store): State<Arc<S>>,
  JsonBody(body): JsonBody<CreateBody>,
) -> Result<impl IntoResponse, ApiError> {
  let input = NewArticle::try_from(body)?;
  let article = store.add_article(input).await.map_err(ApiError::from_store)?;
  Ok((StatusCode::CREATED, Json(ArticleEnvelope { article })))
}

// ─── Get one ──────────────────────────────────────────────────────────────────

/// `GET /articles/:article_id`
pub async fn get_one<S: NewsStore>(
  State(store): State<Arc<S>>,
  PathParam(raw_id): PathParam<String>,
) -> Result<Json<ArticleEnvelope>, ApiError> {
  let id: ArticleId = raw_id.parse()?;
  let article = store.get_article(id).await.map_err(ApiError::from_store)?;
  Ok(Json(ArticleEnvelope { article }))
}

// ─── Votes ────────────────────────────────────────────────────────────────────

/// Body of every `PATCH` that adjusts votes.
#[derive(Debug, Deserialize)]
pub struct VotesBody {
  pub inc_votes: Option<i64>,
}

/// `PATCH /articles/:article_id`, body `{"inc_votes": <signed int>}`.
pub async fn update_votes<S: NewsStore>(
  State(store): State<Arc<S>>,
  PathParam(raw_id): PathParam<String>,
  JsonBody(body): JsonBody<VotesBody>,
) -> Result<Json<ArticleEnvelope>, ApiError> {
  let id: ArticleId = raw_id.parse()?;
  let delta = required_int("inc_votes", body.inc_votes)?;
  let article = store
    .adjust_article_votes(id, delta)
    .await
    .map_err(ApiError::from_store)?;
  Ok(Json(ArticleEnvelope { article }))
}

// ─── Delete ───────────────────────────────────────────────────────────────────

/// `DELETE /articles/:article_id`
pub async fn delete_one<S: NewsStore>(
  State(store): State<Arc<S>>,
  PathParam(raw_id): PathParam<String>,
) -> Result<StatusCode, ApiError> {
  let id: ArticleId = raw_id.parse()?;
  store.remove_article(id).await.map_err(ApiError::from_store)?;
  Ok(StatusCode::NO_CONTENT)
}
