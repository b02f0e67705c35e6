//! Handlers for `/users` endpoints.

use std::sync::Arc;

use axum::{Json, extract::State};
use gazette_core::{Missing, store::NewsStore, user::User};
use serde::Serialize;

use crate::{error::ApiError, extract::PathParam};

#[derive(Debug, Serialize)]
pub struct UsersEnvelope {
  pub users: Vec<User>,
}

#[derive(Debug, Serialize)]
pub struct UserEnvelope {
  pub user: User,
}

/// `GET /users`
pub async fn list<S: NewsStore>(
  State(store): State<Arc<S>>,
) -> Result<Json<UsersEnvelope>, ApiError> {
  let users = store.list_users().await.map_err(ApiError::from_store)?;
  Ok(Json(UsersEnvelope { users }))
}

/// `GET /users/:username`
pub async fn get_one<S: NewsStore>(
  State(store): State<Arc<S>>,
  PathParam(username): PathParam<String>,
) -> Result<Json<UserEnvelope>, ApiError> {
  let user = store
    .get_user(&username)
    .await
    .map_err(ApiError::from_store)?
    .ok_or(ApiError::NotFound(Missing::Row.message()))?;
  Ok(Json(UserEnvelope { user }))
}
