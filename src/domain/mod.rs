pub mod item;
pub mod question;

pub use item::{Item, ItemKind, Sentence, Topic, Word};
pub use question::{Answer, QuestionType, QuizOption, QuizQuestion};
