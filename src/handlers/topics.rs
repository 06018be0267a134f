//! Topic index: every topic with its words and sentences.

use axum::{
  extract::{Query, State},
  http::StatusCode,
  response::{IntoResponse, Response},
  Json,
};
use serde::Deserialize;

use super::error_response;
use crate::db;
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct TopicParams {
  /// Leave out topics with neither words nor sentences
  #[serde(default)]
  pub exclude_empty: bool,
}

/// GET /topics?exclude_empty=true
pub async fn topic_index(
  State(state): State<AppState>,
  Query(params): Query<TopicParams>,
) -> Response {
  let Ok(conn) = db::try_lock(&state.db) else {
    return error_response(StatusCode::INTERNAL_SERVER_ERROR, "Database unavailable");
  };

  match db::get_topics_with_items(&conn, params.exclude_empty) {
    Ok(topics) => (StatusCode::OK, Json(topics)).into_response(),
    Err(e) => {
      tracing::error!("Failed to load topics: {}", e);
      error_response(StatusCode::INTERNAL_SERVER_ERROR, "Database error")
    }
  }
}
