//! Quiz generation: question type selection, sampling, building and retry.

pub mod builders;
pub mod context;
pub mod error;
pub mod generator;
pub mod jyutping;
pub mod sampler;
pub mod selector;

pub use context::{QuizContext, QuizExclusions, ResponseDirection};
pub use error::{BuildError, QuizError};
pub use generator::{generate_quiz, validate_question_count};
pub use selector::{choose_question_type, select_question_type, SelectorCounts, SelectorWeights};
