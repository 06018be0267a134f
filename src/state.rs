//! Application state shared by all handlers.

use std::sync::Arc;

use crate::config::QuizSettings;
use crate::db::DbPool;

/// Application state passed to all handlers
#[derive(Clone)]
pub struct AppState {
    /// Shared learning database (topics, words, sentences)
    pub db: DbPool,

    /// Generator settings loaded at startup
    pub quiz: Arc<QuizSettings>,
}

impl AppState {
    pub fn new(db: DbPool, quiz: QuizSettings) -> Self {
        Self {
            db,
            quiz: Arc::new(quiz),
        }
    }
}
