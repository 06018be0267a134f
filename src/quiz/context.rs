//! Per-quiz state: cached dataset facts and the ids already used as prompts.

use rusqlite::{Connection, Result};
use std::collections::HashSet;

use super::selector::SelectorCounts;
use crate::config;
use crate::db;
use crate::domain::QuestionType;

/// Words and sentences already used as a prompt in this quiz.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QuizExclusions {
  pub word_ids: HashSet<i64>,
  pub sentence_ids: HashSet<i64>,
}

impl QuizExclusions {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn add_word(&mut self, id: i64) {
    self.word_ids.insert(id);
  }

  pub fn add_sentence(&mut self, id: i64) {
    self.sentence_ids.insert(id);
  }

  /// Sorted so generated SQL is stable between runs
  pub fn word_ids(&self) -> Vec<i64> {
    sorted(&self.word_ids)
  }

  pub fn sentence_ids(&self) -> Vec<i64> {
    sorted(&self.sentence_ids)
  }
}

fn sorted(ids: &HashSet<i64>) -> Vec<i64> {
  let mut ids: Vec<i64> = ids.iter().copied().collect();
  ids.sort_unstable();
  ids
}

/// Which side of the response relation a question asks about
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseDirection {
  /// Prompt sentence, answer is one of its responses
  Responses,
  /// Prompt sentence, answer is a sentence it responds to
  ResponseTo,
}

/// Dataset facts loaded once per quiz.
#[derive(Debug, Clone, Default)]
pub struct QuizContext {
  pub word_count: i64,
  pub sentence_count: i64,
  pub sentence_ids: Vec<i64>,
  pub without_responses: HashSet<i64>,
  pub without_response_to: HashSet<i64>,
  /// Sentences with so many responses that fewer than 3 distractors remain
  pub excessive_responses: HashSet<i64>,
  pub excessive_response_to: HashSet<i64>,
  pub audio_words: i64,
  pub single_token_audio_words: i64,
  pub multi_token_sentences: i64,
  /// Some topic has enough words and at least one word lives outside it
  pub has_topic_question: bool,
}

impl QuizContext {
  pub fn load(conn: &Connection) -> Result<Self> {
    let word_count = db::count_words(conn)?;
    let sentence_count = db::count_sentences(conn)?;

    // A relation this large leaves fewer than DISTRACTOR_COUNT other sentences
    let excessive = (sentence_count - config::DISTRACTOR_COUNT as i64).max(1);

    let has_topic_question = db::topics_with_min_words(conn, config::MIN_TOPIC_WORDS)?
      .iter()
      .any(|t| word_count > t.word_count);

    Ok(Self {
      word_count,
      sentence_count,
      sentence_ids: db::sentence_ids(conn)?,
      without_responses: db::sentence_ids_without_responses(conn)?.into_iter().collect(),
      without_response_to: db::sentence_ids_without_response_to(conn)?.into_iter().collect(),
      excessive_responses: db::sentence_ids_with_min_responses(conn, excessive)?
        .into_iter()
        .collect(),
      excessive_response_to: db::sentence_ids_with_min_response_to(conn, excessive)?
        .into_iter()
        .collect(),
      audio_words: db::count_audio_words(conn)?,
      single_token_audio_words: db::count_single_token_audio_words(conn)?,
      multi_token_sentences: db::count_multi_token_sentences(conn)?,
      has_topic_question,
    })
  }

  pub fn selector_counts(&self) -> SelectorCounts {
    SelectorCounts {
      word_count: self.word_count,
      sentence_count: self.sentence_count,
      sentences_without_responses: self.without_responses.len() as i64,
    }
  }

  /// Sentences that can prompt a response question, in id order
  pub fn eligible_response_prompts(
    &self,
    direction: ResponseDirection,
    exclusions: &QuizExclusions,
  ) -> Vec<i64> {
    let (lacking, excessive) = match direction {
      ResponseDirection::Responses => (&self.without_responses, &self.excessive_responses),
      ResponseDirection::ResponseTo => (&self.without_response_to, &self.excessive_response_to),
    };
    self
      .sentence_ids
      .iter()
      .copied()
      .filter(|id| {
        !lacking.contains(id) && !excessive.contains(id) && !exclusions.sentence_ids.contains(id)
      })
      .collect()
  }

  /// Whether the dataset can ever satisfy `question_type`.
  ///
  /// Infeasible types are swapped for a translation question before building
  /// instead of burning retries.
  pub fn is_feasible(&self, question_type: QuestionType, include_audio: bool) -> bool {
    match question_type {
      t if t.is_translation() => true,
      t if t.needs_audio() => include_audio && self.single_token_audio_words > 0,
      QuestionType::TopicExcludedWord => self.has_topic_question,
      QuestionType::MissingWordButtons
      | QuestionType::MissingWordText
      | QuestionType::WordOrder => self.multi_token_sentences > 0,
      // Response builders fall back on their own when no prompt is eligible
      t => t.needs_sentences() && self.sentence_count > 0,
    }
  }
}
