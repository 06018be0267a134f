use serde::{Deserialize, Serialize};

/// A named grouping of words and sentences, ordered by `loc` for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Topic {
  pub id: i64,
  pub topic_name: String,
  pub loc: i64,
  /// Display colour as a hex string, e.g. "#dddddd"
  pub colour: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemKind {
  Word,
  Sentence,
}

impl ItemKind {
  pub fn as_str(&self) -> &'static str {
    match self {
      Self::Word => "word",
      Self::Sentence => "sentence",
    }
  }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Word {
  pub id: i64,
  pub topic_id: i64,
  pub jyutping: String,
  pub english: String,
  pub cantonese: Option<String>,
  pub notes: String,
  pub loc: i64,
  /// Path of the recording relative to the media directory
  pub audio_file: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sentence {
  pub id: i64,
  pub topic_id: i64,
  pub jyutping: String,
  pub english: String,
  pub cantonese: Option<String>,
  pub notes: String,
  pub loc: i64,
}

/// Either kind of learning item, for code that only needs the shared fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Item {
  Word(Word),
  Sentence(Sentence),
}

impl Item {
  pub fn id(&self) -> i64 {
    match self {
      Self::Word(w) => w.id,
      Self::Sentence(s) => s.id,
    }
  }

  pub fn kind(&self) -> ItemKind {
    match self {
      Self::Word(_) => ItemKind::Word,
      Self::Sentence(_) => ItemKind::Sentence,
    }
  }

  pub fn topic_id(&self) -> i64 {
    match self {
      Self::Word(w) => w.topic_id,
      Self::Sentence(s) => s.topic_id,
    }
  }

  pub fn is_sentence(&self) -> bool {
    matches!(self, Self::Sentence(_))
  }

  pub fn jyutping(&self) -> &str {
    match self {
      Self::Word(w) => &w.jyutping,
      Self::Sentence(s) => &s.jyutping,
    }
  }

  pub fn english(&self) -> &str {
    match self {
      Self::Word(w) => &w.english,
      Self::Sentence(s) => &s.english,
    }
  }

  pub fn cantonese(&self) -> Option<&str> {
    match self {
      Self::Word(w) => w.cantonese.as_deref(),
      Self::Sentence(s) => s.cantonese.as_deref(),
    }
  }

  pub fn notes(&self) -> &str {
    match self {
      Self::Word(w) => &w.notes,
      Self::Sentence(s) => &s.notes,
    }
  }

  /// Audio recording, only words carry one
  pub fn audio(&self) -> Option<&str> {
    match self {
      Self::Word(w) => w.audio_file.as_deref().filter(|a| !a.is_empty()),
      Self::Sentence(_) => None,
    }
  }
}

impl From<Word> for Item {
  fn from(word: Word) -> Self {
    Self::Word(word)
  }
}

impl From<Sentence> for Item {
  fn from(sentence: Sentence) -> Self {
    Self::Sentence(sentence)
  }
}
