pub mod flashcards;
pub mod quiz;
pub mod topics;

use axum::{
  http::StatusCode,
  response::{IntoResponse, Response},
  routing::get,
  Json, Router,
};
use tower_http::services::ServeDir;

use crate::paths;
use crate::state::AppState;

pub use flashcards::flashcards_start;
pub use quiz::quiz_start;
pub use topics::topic_index;

/// JSON error body shared by every endpoint
pub(crate) fn error_response(status: StatusCode, message: &str) -> Response {
  (status, Json(serde_json::json!({ "error": message }))).into_response()
}

/// All routes of the service, with audio recordings under `/media`
pub fn router(state: AppState) -> Router {
  Router::new()
    .route("/topics", get(topic_index))
    .route("/flashcards", get(flashcards_start))
    .route("/quiz", get(quiz_start))
    .nest_service("/media", ServeDir::new(paths::media_dir()))
    .with_state(state)
}
