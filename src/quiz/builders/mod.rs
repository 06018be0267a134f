//! Question builders, one per question template.
//!
//! A builder draws its prompt and distractors through the sampler, records the
//! prompt in the quiz exclusions once the question is complete, and reports an
//! empty candidate pool so the generator can pick another template.

mod audio;
mod response;
mod structure;
mod topic;
mod translation;

use rand::Rng;
use rand::seq::SliceRandom;
use rusqlite::Connection;

use super::context::{QuizContext, QuizExclusions};
use super::error::BuildError;
use crate::domain::{Item, QuestionType, QuizOption, QuizQuestion};

/// Builds questions against one connection for the lifetime of a quiz.
pub struct QuestionBuilder<'a, R: Rng + ?Sized> {
  conn: &'a Connection,
  rng: &'a mut R,
  context: &'a QuizContext,
  exclusions: &'a mut QuizExclusions,
  include_audio: bool,
}

impl<'a, R: Rng + ?Sized> QuestionBuilder<'a, R> {
  pub fn new(
    conn: &'a Connection,
    rng: &'a mut R,
    context: &'a QuizContext,
    exclusions: &'a mut QuizExclusions,
    include_audio: bool,
  ) -> Self {
    Self {
      conn,
      rng,
      context,
      exclusions,
      include_audio,
    }
  }

  pub fn build(&mut self, question_type: QuestionType) -> Result<QuizQuestion, BuildError> {
    match question_type {
      QuestionType::JyutpingToEnglish => self.jyutping_to_english(),
      QuestionType::EnglishToJyutping => self.english_to_jyutping(),
      QuestionType::EnglishToJyutpingText => self.english_to_jyutping_text(),
      QuestionType::AudioToTone => self.audio_to_tone(),
      QuestionType::AudioToNotTone => self.audio_to_not_tone(),
      QuestionType::TopicExcludedWord => self.topic_excluded_word(),
      QuestionType::ResponseButtons => self.response_buttons(),
      QuestionType::ResponseText => self.response_text(),
      QuestionType::ResponseToButtons => self.response_to_buttons(),
      QuestionType::ResponseToText => self.response_to_text(),
      QuestionType::MissingWordButtons => self.missing_word_buttons(),
      QuestionType::MissingWordText => self.missing_word_text(),
      QuestionType::WordOrder => self.word_order(),
    }
  }

  /// Mark `item` as used so no later question prompts with it
  fn record_prompt(&mut self, item: &Item) {
    match item {
      Item::Word(w) => self.exclusions.add_word(w.id),
      Item::Sentence(s) => self.exclusions.add_sentence(s.id),
    }
  }

  /// Correct option first, then distractors, shuffled together
  fn shuffled(&mut self, mut options: Vec<QuizOption>) -> Vec<QuizOption> {
    options.shuffle(self.rng);
    options
  }
}

fn english_option(item: &Item, is_correct: bool) -> QuizOption {
  QuizOption::text(item.english(), is_correct)
}

fn jyutping_option(item: &Item, is_correct: bool) -> QuizOption {
  QuizOption {
    text: item.jyutping().to_string(),
    cantonese: item.cantonese().map(str::to_string),
    audio: item.audio().map(str::to_string),
    hide_text: false,
    is_correct,
  }
}

/// Recording only, the jyutping is revealed after answering
fn audio_option(item: &Item, is_correct: bool) -> QuizOption {
  QuizOption {
    hide_text: true,
    ..jyutping_option(item, is_correct)
  }
}
