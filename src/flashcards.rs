//! Flashcard decks built from the notebook's topics.

use rand::Rng;
use rand::seq::SliceRandom;
use rusqlite::Connection;
use serde::{Deserialize, Serialize};

use crate::db::{self, TopicItems};
use crate::domain::{Item, ItemKind};

/// Which kinds of item go into the deck
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemSelection {
  #[default]
  Both,
  Words,
  Sentences,
}

impl ItemSelection {
  fn includes(&self, kind: ItemKind) -> bool {
    match self {
      Self::Both => true,
      Self::Words => kind == ItemKind::Word,
      Self::Sentences => kind == ItemKind::Sentence,
    }
  }
}

/// Side shown before the card is flipped
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StartingSide {
  #[default]
  Jyutping,
  English,
}

fn default_randomise_order() -> bool {
  true
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeckSettings {
  /// Restrict the deck to one topic; all topics when absent
  pub topic_id: Option<i64>,
  #[serde(default = "default_randomise_order")]
  pub randomise_order: bool,
  #[serde(default)]
  pub items: ItemSelection,
  #[serde(default)]
  pub starting_side: StartingSide,
}

impl Default for DeckSettings {
  fn default() -> Self {
    Self {
      topic_id: None,
      randomise_order: default_randomise_order(),
      items: ItemSelection::default(),
      starting_side: StartingSide::default(),
    }
  }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Flashcard {
  pub kind: ItemKind,
  pub id: i64,
  pub topic_id: i64,
  pub front: String,
  pub back: String,
  pub cantonese: Option<String>,
  pub audio: Option<String>,
  pub notes: String,
}

impl Flashcard {
  fn new(item: &Item, starting_side: StartingSide) -> Self {
    let (front, back) = match starting_side {
      StartingSide::Jyutping => (item.jyutping(), item.english()),
      StartingSide::English => (item.english(), item.jyutping()),
    };
    Self {
      kind: item.kind(),
      id: item.id(),
      topic_id: item.topic_id(),
      front: front.to_string(),
      back: back.to_string(),
      cantonese: item.cantonese().map(str::to_string),
      audio: item.audio().map(str::to_string),
      notes: item.notes().to_string(),
    }
  }
}

#[derive(Debug, thiserror::Error)]
pub enum FlashcardError {
  /// Missing topics and topics without items cannot be chosen
  #[error("Select a valid topic. That topic has no words or sentences.")]
  UnknownTopic(i64),
  #[error("The selected topic has no words.")]
  NoWords,
  #[error("The selected topic has no sentences.")]
  NoSentences,
  #[error("database error: {0}")]
  Database(#[from] rusqlite::Error),
}

fn selected_topic(
  conn: &Connection,
  topic_id: i64,
  items: ItemSelection,
) -> Result<TopicItems, FlashcardError> {
  let topic = db::get_topic_items(conn, topic_id)?
    .filter(|t| !t.is_empty())
    .ok_or(FlashcardError::UnknownTopic(topic_id))?;

  match items {
    ItemSelection::Words if topic.words.is_empty() => Err(FlashcardError::NoWords),
    ItemSelection::Sentences if topic.sentences.is_empty() => Err(FlashcardError::NoSentences),
    _ => Ok(topic),
  }
}

/// Build a deck of flashcards.
///
/// Without shuffling, cards follow topic order, then words before sentences,
/// then each item's position in its topic.
pub fn build_deck<R: Rng + ?Sized>(
  conn: &Connection,
  rng: &mut R,
  settings: &DeckSettings,
) -> Result<Vec<Flashcard>, FlashcardError> {
  let topics = match settings.topic_id {
    Some(topic_id) => vec![selected_topic(conn, topic_id, settings.items)?],
    None => db::get_topics_with_items(conn, true)?,
  };

  let mut deck: Vec<Flashcard> = topics
    .into_iter()
    .flat_map(TopicItems::into_items)
    .filter(|item| settings.items.includes(item.kind()))
    .map(|item| Flashcard::new(&item, settings.starting_side))
    .collect();

  if settings.randomise_order {
    deck.shuffle(rng);
  }

  tracing::debug!("Built deck of {} flashcards", deck.len());
  Ok(deck)
}
