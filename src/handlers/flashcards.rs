//! Flashcard deck endpoint.

use axum::{
  extract::{Query, State},
  http::StatusCode,
  response::{IntoResponse, Response},
  Json,
};
use serde::Serialize;

use super::error_response;
use crate::db;
use crate::flashcards::{self, DeckSettings, Flashcard, FlashcardError};
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct DeckResponse {
  pub settings: DeckSettings,
  pub cards: Vec<Flashcard>,
}

fn status_for(error: &FlashcardError) -> StatusCode {
  match error {
    FlashcardError::UnknownTopic(_) | FlashcardError::NoWords | FlashcardError::NoSentences => {
      StatusCode::BAD_REQUEST
    }
    FlashcardError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
  }
}

/// Build a flashcard deck.
///
/// GET /flashcards?topic_id=1&randomise_order=true&items=both&starting_side=jyutping
pub async fn flashcards_start(
  State(state): State<AppState>,
  Query(settings): Query<DeckSettings>,
) -> Response {
  let result = {
    let Ok(conn) = db::try_lock(&state.db) else {
      return error_response(StatusCode::INTERNAL_SERVER_ERROR, "Database unavailable");
    };
    flashcards::build_deck(&conn, &mut rand::rng(), &settings)
  };

  match result {
    Ok(cards) => (StatusCode::OK, Json(DeckResponse { settings, cards })).into_response(),
    Err(FlashcardError::Database(e)) => {
      tracing::error!("Flashcard deck failed: {}", e);
      error_response(StatusCode::INTERNAL_SERVER_ERROR, "Database error")
    }
    Err(e) => {
      tracing::debug!("Flashcard request rejected: {}", e);
      error_response(status_for(&e), &e.to_string())
    }
  }
}
