//! Weighted random choice of the next question type.
//!
//! Two-level dispatch: a fixed share of questions are general translation
//! questions; the rest is split between word and sentence questions in
//! proportion to how many of each exist, then narrowed to a concrete template
//! by a second draw.

use rand::Rng;
use serde::Deserialize;

use crate::domain::QuestionType;

/// Tunable probabilities of the selector. Thresholds are cumulative.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct SelectorWeights {
  /// Share of questions that are general translation questions
  pub general_probability: f64,
  pub jyutping_to_english_threshold: f64,
  pub english_to_jyutping_threshold: f64,
  /// Multiplier on the word count when audio questions are allowed
  pub audio_word_boost: f64,
  pub audio_to_tone_threshold: f64,
  pub audio_to_not_tone_threshold: f64,
  pub missing_word_buttons_threshold: f64,
  pub missing_word_text_threshold: f64,
}

impl Default for SelectorWeights {
  fn default() -> Self {
    Self {
      general_probability: 0.35,
      jyutping_to_english_threshold: 0.4,
      english_to_jyutping_threshold: 0.75,
      audio_word_boost: 2.0,
      audio_to_tone_threshold: 0.35,
      audio_to_not_tone_threshold: 0.7,
      missing_word_buttons_threshold: 0.35,
      missing_word_text_threshold: 0.7,
    }
  }
}

/// Live dataset counts the selector weighs by
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SelectorCounts {
  pub word_count: i64,
  pub sentence_count: i64,
  pub sentences_without_responses: i64,
}

/// `numerator / denominator`, treating an empty denominator as zero share
fn share(numerator: f64, denominator: f64) -> f64 {
  if denominator <= 0.0 {
    0.0
  } else {
    (numerator / denominator).clamp(0.0, 1.0)
  }
}

/// Map `x` from `[low, high)` back onto `[0, 1)`
fn rescale(x: f64, low: f64, high: f64) -> f64 {
  share(x - low, high - low)
}

/// Pure selection from two uniform draws in `[0, 1)`
pub fn select_question_type(
  weights: &SelectorWeights,
  counts: &SelectorCounts,
  include_audio: bool,
  r1: f64,
  r2: f64,
) -> QuestionType {
  let word_weight = if include_audio {
    counts.word_count as f64 * weights.audio_word_boost
  } else {
    counts.word_count as f64
  };
  let sentence_weight = counts.sentence_count as f64;
  let total_weight = word_weight + sentence_weight;

  if r1 < weights.general_probability || total_weight <= 0.0 {
    return select_general(weights, r2);
  }

  let x = rescale(r1, weights.general_probability, 1.0);
  if x < share(word_weight, total_weight) {
    select_word_question(weights, include_audio, r2)
  } else {
    select_sentence_question(weights, counts, r2)
  }
}

fn select_general(weights: &SelectorWeights, r2: f64) -> QuestionType {
  if r2 < weights.jyutping_to_english_threshold {
    QuestionType::JyutpingToEnglish
  } else if r2 < weights.english_to_jyutping_threshold {
    QuestionType::EnglishToJyutping
  } else {
    QuestionType::EnglishToJyutpingText
  }
}

fn select_word_question(weights: &SelectorWeights, include_audio: bool, r2: f64) -> QuestionType {
  if !include_audio {
    return QuestionType::TopicExcludedWord;
  }
  if r2 < weights.audio_to_tone_threshold {
    QuestionType::AudioToTone
  } else if r2 < weights.audio_to_not_tone_threshold {
    QuestionType::AudioToNotTone
  } else {
    QuestionType::TopicExcludedWord
  }
}

fn select_sentence_question(weights: &SelectorWeights, counts: &SelectorCounts, r2: f64) -> QuestionType {
  let without_responses = share(
    counts.sentences_without_responses as f64,
    counts.sentence_count as f64,
  );
  let response_share = 1.0 - without_responses;

  if r2 < response_share {
    // Four equally likely response templates
    let y = rescale(r2, 0.0, response_share);
    if y < 0.25 {
      QuestionType::ResponseButtons
    } else if y < 0.5 {
      QuestionType::ResponseText
    } else if y < 0.75 {
      QuestionType::ResponseToButtons
    } else {
      QuestionType::ResponseToText
    }
  } else {
    let y = rescale(r2, response_share, 1.0);
    if y < weights.missing_word_buttons_threshold {
      QuestionType::MissingWordButtons
    } else if y < weights.missing_word_text_threshold {
      QuestionType::MissingWordText
    } else {
      QuestionType::WordOrder
    }
  }
}

/// Draw two uniform numbers and select a question type
pub fn choose_question_type<R: Rng + ?Sized>(
  rng: &mut R,
  weights: &SelectorWeights,
  counts: &SelectorCounts,
  include_audio: bool,
) -> QuestionType {
  let r1: f64 = rng.random();
  let r2: f64 = rng.random();
  select_question_type(weights, counts, include_audio, r1, r2)
}
