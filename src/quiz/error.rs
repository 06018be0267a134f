use crate::config;

/// Why a single question could not be built.
#[derive(Debug, thiserror::Error)]
pub enum BuildError {
  /// Not enough qualifying words or sentences; the caller may try another question type
  #[error("no candidates left: {0}")]
  EmptyCandidatePool(&'static str),
  #[error("database error: {0}")]
  Database(#[from] rusqlite::Error),
}

/// Errors surfaced to the caller of the quiz generator.
#[derive(Debug, thiserror::Error)]
pub enum QuizError {
  #[error(
    "Could not generate a question after {attempts} attempts. Please add more words to the database."
  )]
  GenerationFailed { attempts: usize },
  #[error("Please choose a quiz length of {}.", format_choices())]
  InvalidQuestionCount { requested: usize },
  #[error(
    "You do not have enough words and sentences in the database for a quiz of this length \
     ({requested} questions, {available} items)."
  )]
  NotEnoughItems { requested: usize, available: usize },
  #[error("database error: {0}")]
  Database(#[from] rusqlite::Error),
}

fn format_choices() -> String {
  config::QUESTION_COUNT_CHOICES
    .iter()
    .map(|c| c.to_string())
    .collect::<Vec<_>>()
    .join(", ")
}
