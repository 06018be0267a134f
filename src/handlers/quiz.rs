//! Quiz start endpoint.

use axum::{
  extract::{Query, State},
  http::StatusCode,
  response::{IntoResponse, Response},
  Json,
};
use chrono::{DateTime, Utc};
use rusqlite::Connection;
use serde::{Deserialize, Serialize};

use super::error_response;
use crate::config::QuizSettings;
use crate::db;
use crate::domain::QuizQuestion;
use crate::quiz::{self, QuizError};
use crate::state::AppState;

fn default_include_audio() -> bool {
  true
}

#[derive(Debug, Deserialize)]
pub struct QuizParams {
  pub question_count: usize,
  #[serde(default = "default_include_audio")]
  pub include_audio: bool,
}

#[derive(Debug, Serialize)]
pub struct QuizResponse {
  pub generated_at: DateTime<Utc>,
  pub questions: Vec<QuizQuestion>,
}

fn status_for(error: &QuizError) -> StatusCode {
  match error {
    QuizError::InvalidQuestionCount { .. } | QuizError::NotEnoughItems { .. } => StatusCode::BAD_REQUEST,
    QuizError::GenerationFailed { .. } => StatusCode::UNPROCESSABLE_ENTITY,
    QuizError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
  }
}

fn build_quiz(
  conn: &Connection,
  settings: &QuizSettings,
  params: &QuizParams,
) -> Result<Vec<QuizQuestion>, QuizError> {
  let available = db::count_items(conn)?.max(0) as usize;
  quiz::validate_question_count(params.question_count, available)?;

  let mut rng = rand::rng();
  quiz::generate_quiz(
    conn,
    &mut rng,
    settings,
    params.question_count,
    params.include_audio,
  )
}

/// Generate a new quiz.
///
/// GET /quiz?question_count=10&include_audio=true
pub async fn quiz_start(
  State(state): State<AppState>,
  Query(params): Query<QuizParams>,
) -> Response {
  let result = {
    let Ok(conn) = db::try_lock(&state.db) else {
      return error_response(StatusCode::INTERNAL_SERVER_ERROR, "Database unavailable");
    };
    build_quiz(&conn, &state.quiz, &params)
  };

  match result {
    Ok(questions) => {
      let response = QuizResponse {
        generated_at: Utc::now(),
        questions,
      };
      (StatusCode::OK, Json(response)).into_response()
    }
    Err(QuizError::Database(e)) => {
      tracing::error!("Quiz generation failed: {}", e);
      error_response(StatusCode::INTERNAL_SERVER_ERROR, "Database error")
    }
    Err(e) => {
      tracing::debug!("Quiz request rejected: {}", e);
      error_response(status_for(&e), &e.to_string())
    }
  }
}
