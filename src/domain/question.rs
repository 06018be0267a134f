use serde::{Deserialize, Serialize};

/// Every quiz question template the generator can instantiate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestionType {
  JyutpingToEnglish,
  EnglishToJyutping,
  EnglishToJyutpingText,
  AudioToTone,
  AudioToNotTone,
  TopicExcludedWord,
  /// Prompt sentence -> one of its responses
  ResponseButtons,
  ResponseText,
  /// Prompt sentence -> one of the sentences it responds to
  ResponseToButtons,
  ResponseToText,
  MissingWordButtons,
  MissingWordText,
  WordOrder,
}

impl QuestionType {
  pub const ALL: [QuestionType; 13] = [
    Self::JyutpingToEnglish,
    Self::EnglishToJyutping,
    Self::EnglishToJyutpingText,
    Self::AudioToTone,
    Self::AudioToNotTone,
    Self::TopicExcludedWord,
    Self::ResponseButtons,
    Self::ResponseText,
    Self::ResponseToButtons,
    Self::ResponseToText,
    Self::MissingWordButtons,
    Self::MissingWordText,
    Self::WordOrder,
  ];

  pub fn as_str(&self) -> &'static str {
    match self {
      Self::JyutpingToEnglish => "jyutping_to_english",
      Self::EnglishToJyutping => "english_to_jyutping",
      Self::EnglishToJyutpingText => "english_to_jyutping_text",
      Self::AudioToTone => "audio_to_tone",
      Self::AudioToNotTone => "audio_to_not_tone",
      Self::TopicExcludedWord => "topic_excluded_word",
      Self::ResponseButtons => "response_buttons",
      Self::ResponseText => "response_text",
      Self::ResponseToButtons => "response_to_buttons",
      Self::ResponseToText => "response_to_text",
      Self::MissingWordButtons => "missing_word_buttons",
      Self::MissingWordText => "missing_word_text",
      Self::WordOrder => "word_order",
    }
  }

  /// Translation questions only need words or sentences with distinct glosses
  pub fn is_translation(&self) -> bool {
    matches!(
      self,
      Self::JyutpingToEnglish | Self::EnglishToJyutping | Self::EnglishToJyutpingText
    )
  }

  pub fn needs_audio(&self) -> bool {
    matches!(self, Self::AudioToTone | Self::AudioToNotTone)
  }

  pub fn needs_sentences(&self) -> bool {
    matches!(
      self,
      Self::ResponseButtons
        | Self::ResponseText
        | Self::ResponseToButtons
        | Self::ResponseToText
        | Self::MissingWordButtons
        | Self::MissingWordText
        | Self::WordOrder
    )
  }

  /// Question is answered by picking one of four options
  pub fn has_buttons(&self) -> bool {
    matches!(
      self,
      Self::JyutpingToEnglish
        | Self::EnglishToJyutping
        | Self::AudioToTone
        | Self::AudioToNotTone
        | Self::TopicExcludedWord
        | Self::ResponseButtons
        | Self::ResponseToButtons
        | Self::MissingWordButtons
    )
  }
}

/// The accepted answer(s) of a question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum Answer {
  Single(String),
  /// Any one of these values is accepted
  AnyOf(Vec<String>),
  /// Tokens in the order they must be arranged
  Ordered(Vec<String>),
}

impl Answer {
  pub fn accepts(&self, value: &str) -> bool {
    match self {
      Self::Single(v) => v == value,
      Self::AnyOf(values) => values.iter().any(|v| v == value),
      Self::Ordered(tokens) => tokens.join(" ") == value.split_whitespace().collect::<Vec<_>>().join(" "),
    }
  }
}

/// One of the four buttons of a multiple choice question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizOption {
  pub text: String,
  pub cantonese: Option<String>,
  pub audio: Option<String>,
  /// Only the recording is presented, the text is revealed after answering
  pub hide_text: bool,
  pub is_correct: bool,
}

impl QuizOption {
  pub fn text(text: impl Into<String>, is_correct: bool) -> Self {
    Self {
      text: text.into(),
      cantonese: None,
      audio: None,
      hide_text: false,
      is_correct,
    }
  }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizQuestion {
  pub question_type: QuestionType,
  pub question: String,
  /// The item shown to the learner (jyutping, English gloss, blanked sentence)
  pub prompt: Option<String>,
  pub hint: Option<String>,
  pub audio: Option<String>,
  pub answer: Answer,
  pub options: Option<Vec<QuizOption>>,
  /// Shuffled tokens for word ordering questions
  pub tiles: Option<Vec<String>>,
}

impl QuizQuestion {
  pub fn new(question_type: QuestionType, question: impl Into<String>, answer: Answer) -> Self {
    Self {
      question_type,
      question: question.into(),
      prompt: None,
      hint: None,
      audio: None,
      answer,
      options: None,
      tiles: None,
    }
  }

  pub fn with_prompt(mut self, prompt: impl Into<String>) -> Self {
    self.prompt = Some(prompt.into());
    self
  }

  pub fn with_hint(mut self, hint: Option<impl Into<String>>) -> Self {
    self.hint = hint.map(Into::into);
    self
  }

  pub fn with_audio(mut self, audio: Option<impl Into<String>>) -> Self {
    self.audio = audio.map(Into::into);
    self
  }

  pub fn with_options(mut self, options: Vec<QuizOption>) -> Self {
    self.options = Some(options);
    self
  }

  pub fn with_tiles(mut self, tiles: Vec<String>) -> Self {
    self.tiles = Some(tiles);
    self
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_question_type_names_are_unique() {
    let mut names: Vec<&str> = QuestionType::ALL.iter().map(|t| t.as_str()).collect();
    names.sort();
    names.dedup();
    assert_eq!(names.len(), 13);
  }

  #[test]
  fn test_serde_name_matches_as_str() {
    for question_type in QuestionType::ALL {
      let json = serde_json::to_string(&question_type).unwrap();
      assert_eq!(json, format!("\"{}\"", question_type.as_str()));
    }
  }

  #[test]
  fn test_answer_accepts() {
    assert!(Answer::Single("sik6".to_string()).accepts("sik6"));
    assert!(!Answer::Single("sik6".to_string()).accepts("sik1"));

    let any = Answer::AnyOf(vec!["hou2".to_string(), "hou2 aa3".to_string()]);
    assert!(any.accepts("hou2 aa3"));
    assert!(!any.accepts("hou3"));

    let ordered = Answer::Ordered(vec!["keoi5".to_string(), "sik6".to_string()]);
    assert!(ordered.accepts("keoi5  sik6"));
    assert!(!ordered.accepts("sik6 keoi5"));
  }

  #[test]
  fn test_answer_serializes_tagged() {
    let json = serde_json::to_value(Answer::Single("faan6".to_string())).unwrap();
    assert_eq!(json["kind"], "single");
    assert_eq!(json["value"], "faan6");
  }
}
