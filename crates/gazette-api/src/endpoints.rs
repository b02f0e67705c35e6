//! `GET /api`: a static description of every endpoint.

use axum::{http::header, response::IntoResponse};

pub const ENDPOINTS_JSON: &str = include_str!("endpoints.json");

pub async fn handler() -> impl IntoResponse {
  ([(header::CONTENT_TYPE, "application/json")], ENDPOINTS_JSON)
}
