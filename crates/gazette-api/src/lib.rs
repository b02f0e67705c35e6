//! JSON REST API for Gazette.
//!
//! Exposes an axum [`Router`] backed by any [`gazette_core::store::NewsStore`].
//! TLS and transport concerns are the caller's responsibility.
//!
//! # Mounting
//!
//! ```rust,ignore
//! .nest("/api", gazette_api::api_router(store.clone()))
//! ```
//!
//! or use [`app`], which does exactly that and adds the JSON 404 fallback.

pub mod articles;
pub mod comments;
pub mod endpoints;
pub mod error;
pub mod extract;
pub mod topics;
pub mod users;

use std::sync::Arc;

use axum::{
  Json, Router,
  http::StatusCode,
  response::IntoResponse,
  routing::{get, patch},
};
use gazette_core::store::NewsStore;
use serde_json::json;

pub use error::ApiError;

/// Build a fully-materialised API router for `store`.
///
/// The returned `Router<()>` can be nested into any parent router regardless
/// of its own state type.
pub fn api_router<S>(store: Arc<S>) -> Router<()>
where
  S: NewsStore + 'static,
{
  Router::new()
    .route("/", get(endpoints::handler))
    // Topics
    .route("/topics", get(topics::list::<S>).post(topics::create::<S>))
    // Articles
    .route("/articles", get(articles::list::<S>).post(articles::create::<S>))
    .route(
      "/articles/{article_id}",
      get(articles::get_one::<S>)
        .patch(articles::update_votes::<S>)
        .delete(articles::delete_one::<S>),
    )
    .route(
      "/articles/{article_id}/comments",
      get(comments::list_for_article::<S>).post(comments::create_for_article::<S>),
    )
    // Comments
    .route(
      "/comments/{comment_id}",
      patch(comments::update_votes::<S>).delete(comments::delete_one::<S>),
    )
    // Users
    .route("/users", get(users::list::<S>))
    .route("/users/{username}", get(users::get_one::<S>))
    .with_state(store)
}

/// The complete application: the API under `/api` plus a JSON 404 for any
/// other path.
pub fn app<S>(store: Arc<S>) -> Router<()>
where
  S: NewsStore + 'static,
{
  Router::new()
    .nest("/api", api_router(store))
    .fallback(route_not_found)
}

async fn route_not_found() -> impl IntoResponse {
  (StatusCode::NOT_FOUND, Json(json!({ "msg": "Route not found" })))
}

#[cfg(test)]
mod tests;
