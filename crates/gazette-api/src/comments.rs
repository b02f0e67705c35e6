//! Handlers for comment endpoints.
//!
//! | Method   | Path | Notes |
//! |----------|------|-------|
//! | `GET`    | `/articles/:article_id/comments` | Newest first; optional `limit`, `p` |
//! | `POST`   | `/articles/:article_id/comments` | Body: `{"username", "body"}`; 201 |
//! | `PATCH`  | `/comments/:comment_id` | Body: `{"inc_votes": <int>}` |
//! | `DELETE` | `/comments/:comment_id` | 204 |

use std::sync::Arc;

use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use gazette_core::{
  comment::{Comment, NewComment},
  id::{ArticleId, CommentId},
  query::PageRequest,
  store::NewsStore,
  validate::{required, required_int},
};
use serde::{Deserialize, Serialize};

use crate::{
  articles::VotesBody,
  error::ApiError,
  extract::{JsonBody, PathParam, QueryParams},
};

#[derive(Debug, Serialize)]
pub struct CommentsEnvelope {
  pub comments:    Vec<Comment>,
  pub total_count: u64,
}

#[derive(Debug, Serialize)]
pub struct CommentEnvelope {
  pub comment: Comment,
}

#[derive(Debug, Deserialize, Default)]
pub struct ListParams {
  pub limit: Option<String>,
  pub p:     Option<String>,
}

/// `GET /articles/:article_id/comments[?limit=...][&p=...]`
pub async fn list_for_article<S: NewsStore>(
  State(store): State<Arc<S>>,
  PathParam(raw_id): PathParam<String>,
  QueryParams(params): QueryParams<ListParams>,
) -> Result<Json<CommentsEnvelope>, ApiError> {
  let article_id: ArticleId = raw_id.parse()?;
  let page = PageRequest::parse(params.limit.as_deref(), params.p.as_deref())?;
  let page = store
    .list_comments(article_id, page)
    .await
    .map_err(ApiError::from_store)?;
  Ok(Json(CommentsEnvelope {
    comments:    page.items,
    total_count: page.total_count,
  }))
}

#[derive(Debug, Deserialize)]
pub struct CreateBody {
  pub username: Option<String>,
  pub body:     Option<String>,
}

/// `POST /articles/:article_id/comments`
pub async fn create_for_article<S: NewsStore>(
  State(store): State<Arc<S>>,
  PathParam(raw_id): PathParam<String>,
  JsonBody(body): JsonBody<CreateBody>,
) -> Result<impl IntoResponse, ApiError> {
  let article_id: ArticleId = raw_id.parse()?;
  let input = NewComment {
    author: required("username", body.username)?,
    body:   required("body", body.body)?,
  };
  let comment = store
    .add_comment(article_id, input)
    .await
    .map_err(ApiError::from_store)?;
  Ok((StatusCode::CREATED, Json(CommentEnvelope { comment })))
}

/// `PATCH /comments/:comment_id`
pub async fn update_votes<S: NewsStore>(
  State(store): State<Arc<S>>,
  PathParam(raw_id): PathParam<String>,
  JsonBody(body): JsonBody<VotesBody>,
) -> Result<Json<CommentEnvelope>, ApiError> {
  let id: CommentId = raw_id.parse()?;
  let delta = required_int("inc_votes", body.inc_votes)?;
  let comment = store
    .adjust_comment_votes(id, delta)
    .await
    .map_err(ApiError::from_store)?;
  Ok(Json(CommentEnvelope { comment }))
}

/// `DELETE /comments/:comment_id`
pub async fn delete_one<S: NewsStore>(
  State(store): State<Arc<S>>,
  PathParam(raw_id): PathParam<String>,
) -> Result<StatusCode, ApiError> {
  let id: CommentId = raw_id.parse()?;
  store.remove_comment(id).await.map_err(ApiError::from_store)?;
  Ok(StatusCode::NO_CONTENT)
}
