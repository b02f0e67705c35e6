//! API error type and [`axum::response::IntoResponse`] implementation.
//!
//! Every failure is rendered as `{"msg": "..."}`.

use axum::{
  Json,
  extract::rejection::{JsonRejection, PathRejection, QueryRejection},
  http::StatusCode,
  response::{IntoResponse, Response},
};
use gazette_core::Error as CoreError;
use serde_json::json;
use thiserror::Error;

/// An error returned by an API handler.
#[derive(Debug, Error)]
pub enum ApiError {
  #[error("bad request: {0}")]
  BadRequest(String),

  #[error("{0}")]
  NotFound(&'static str),

  #[error("duplicate key: {0}")]
  DuplicateKey(String),

  #[error("store error: {0}")]
  Store(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl ApiError {
  /// Classify a backend error through the core taxonomy.
  pub fn from_store<E: Into<CoreError>>(e: E) -> Self {
    let core: CoreError = e.into();
    Self::from(core)
  }
}

impl From<CoreError> for ApiError {
  fn from(e: CoreError) -> Self {
    match e {
      CoreError::InvalidInput(detail) => ApiError::BadRequest(detail),
      CoreError::NotFound(missing) => ApiError::NotFound(missing.message()),
      CoreError::ReferentialViolation(reference) => ApiError::NotFound(reference.message()),
      CoreError::DuplicateKey(detail) => ApiError::DuplicateKey(detail),
      CoreError::Store(e) => ApiError::Store(e),
    }
  }
}

impl From<JsonRejection> for ApiError {
  fn from(r: JsonRejection) -> Self { ApiError::BadRequest(r.body_text()) }
}

impl From<QueryRejection> for ApiError {
  fn from(r: QueryRejection) -> Self { ApiError::BadRequest(r.body_text()) }
}

impl From<PathRejection> for ApiError {
  fn from(r: PathRejection) -> Self { ApiError::BadRequest(r.body_text()) }
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    let (status, message) = match &self {
      ApiError::BadRequest(detail) => {
        tracing::debug!(%detail, "rejecting request");
        (StatusCode::BAD_REQUEST, "Bad request")
      }
      ApiError::NotFound(m) => (StatusCode::NOT_FOUND, *m),
      ApiError::DuplicateKey(detail) => {
        tracing::debug!(%detail, "duplicate key");
        (StatusCode::BAD_REQUEST, "Bad request (duplicate key)")
      }
      ApiError::Store(e) => {
        tracing::error!(error = %e, "unhandled store error");
        (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error")
      }
    };
    (status, Json(json!({ "msg": message }))).into_response()
  }
}
