//! Handlers for `/topics` endpoints.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET`  | `/topics` | `{"topics": [...]}` |
//! | `POST` | `/topics` | Body: `{"slug", "description"}`; 201, 400 on duplicate slug |

use std::sync::Arc;

use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use gazette_core::{store::NewsStore, topic::Topic, validate::required};
use serde::{Deserialize, Serialize};

use crate::{error::ApiError, extract::JsonBody};

#[derive(Debug, Serialize)]
pub struct TopicsEnvelope {
  pub topics: Vec<Topic>,
}

#[derive(Debug, Serialize)]
pub struct TopicEnvelope {
  pub topic: Topic,
}

/// `GET /topics`
pub async fn list<S: NewsStore>(
  State(store): State<Arc<S>>,
) -> Result<Json<TopicsEnvelope>, ApiError> {
  let topics = store.list_topics().await.map_err(ApiError::from_store)?;
  Ok(Json(TopicsEnvelope { topics }))
}

#[derive(Debug, Deserialize)]
pub struct CreateBody {
  pub slug:        Option<String>,
  pub description: Option<String>,
}

/// `POST /topics`
pub async fn create<S: NewsStore>(
  State(store): State<Arc<S>>,
  JsonBody(body): JsonBody<CreateBody>,
) -> Result<impl IntoResponse, ApiError> {
  let topic = Topic {
    slug:        required("slug", body.slug)?,
    description: required("description", body.description)?,
  };
  let topic = store.add_topic(topic).await.map_err(ApiError::from_store)?;
  Ok((StatusCode::CREATED, Json(TopicEnvelope { topic })))
}
