//! Uniform random draws of words and sentences, and distractor sampling.

use rand::seq::IndexedRandom;
use rand::Rng;
use rusqlite::Connection;

use super::error::BuildError;
use crate::config;
use crate::db::{self, ItemFilter};
use crate::domain::{Item, ItemKind, Sentence, Word};

fn pick<T: Clone, R: Rng + ?Sized>(
  rng: &mut R,
  candidates: &[T],
  pool: &'static str,
) -> Result<T, BuildError> {
  candidates
    .choose(rng)
    .cloned()
    .ok_or(BuildError::EmptyCandidatePool(pool))
}

pub fn random_word<R: Rng + ?Sized>(
  conn: &Connection,
  rng: &mut R,
  filter: &ItemFilter,
) -> Result<Word, BuildError> {
  let words = db::find_words(conn, filter)?;
  pick(rng, &words, "words")
}

pub fn random_sentence<R: Rng + ?Sized>(
  conn: &Connection,
  rng: &mut R,
  filter: &ItemFilter,
) -> Result<Sentence, BuildError> {
  let sentences = db::find_sentences(conn, filter)?;
  pick(rng, &sentences, "sentences")
}

/// Draw from whichever pool `kind` names
pub fn random_item<R: Rng + ?Sized>(
  conn: &Connection,
  rng: &mut R,
  kind: ItemKind,
  filter: &ItemFilter,
) -> Result<Item, BuildError> {
  match kind {
    ItemKind::Word => random_word(conn, rng, filter).map(Item::from),
    ItemKind::Sentence => random_sentence(conn, rng, filter).map(Item::from),
  }
}

/// Uniform over every unused word and sentence together, so larger pools are
/// proportionally more likely.
pub fn random_word_or_sentence<R: Rng + ?Sized>(
  conn: &Connection,
  rng: &mut R,
  exclude_word_ids: &[i64],
  exclude_sentence_ids: &[i64],
) -> Result<Item, BuildError> {
  let words = db::find_words(conn, &ItemFilter::new().excluding_ids(exclude_word_ids.iter().copied()))?;
  let sentences = db::find_sentences(
    conn,
    &ItemFilter::new().excluding_ids(exclude_sentence_ids.iter().copied()),
  )?;

  let total = words.len() + sentences.len();
  if total == 0 {
    return Err(BuildError::EmptyCandidatePool("words and sentences"));
  }

  let index = rng.random_range(0..total);
  let item = match words.get(index) {
    Some(word) => Item::from(word.clone()),
    None => Item::from(sentences[index - words.len()].clone()),
  };
  Ok(item)
}

/// Three wrong answers of `kind`, drawn one at a time.
///
/// Each draw excludes the gloss and transcription of the correct item and of
/// every distractor picked so far, on top of whatever `base` already filters.
pub fn incorrect_items<R: Rng + ?Sized>(
  conn: &Connection,
  rng: &mut R,
  correct: Option<&Item>,
  kind: ItemKind,
  base: &ItemFilter,
) -> Result<Vec<Item>, BuildError> {
  let mut filter = base.clone();
  if let Some(correct) = correct {
    filter = filter.excluding_item(correct);
  }

  let mut distractors = Vec::with_capacity(config::DISTRACTOR_COUNT);
  for _ in 0..config::DISTRACTOR_COUNT {
    let item = random_item(conn, rng, kind, &filter)?;
    filter = filter.excluding_item(&item);
    distractors.push(item);
  }
  Ok(distractors)
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::testing::TestEnv;
  use rand::rngs::StdRng;
  use rand::SeedableRng;
  use std::collections::HashSet;

  #[test]
  fn test_random_word_empty_pool() {
    let env = TestEnv::new().unwrap();
    let mut rng = StdRng::seed_from_u64(1);
    let result = random_word(&env.conn, &mut rng, &ItemFilter::new());
    assert!(matches!(result, Err(BuildError::EmptyCandidatePool(_))));
  }

  #[test]
  fn test_random_word_respects_filter() {
    let env = TestEnv::new().unwrap();
    let ids = env.food_words(3);
    let mut rng = StdRng::seed_from_u64(1);
    let filter = ItemFilter::new().excluding_ids([ids[0], ids[1]]);
    for _ in 0..10 {
      assert_eq!(random_word(&env.conn, &mut rng, &filter).unwrap().id, ids[2]);
    }
  }

  #[test]
  fn test_random_word_or_sentence_covers_union() {
    let env = TestEnv::new().unwrap();
    let words = env.food_words(2);
    let topic = env.topic("Phrases");
    let sentence = env.sentence(topic, "keoi5 sik6 faan6", "he eats rice");

    let mut rng = StdRng::seed_from_u64(3);
    let mut seen = HashSet::new();
    for _ in 0..200 {
      let item = random_word_or_sentence(&env.conn, &mut rng, &[], &[]).unwrap();
      seen.insert((item.kind(), item.id()));
    }
    assert!(seen.contains(&(ItemKind::Word, words[0])));
    assert!(seen.contains(&(ItemKind::Word, words[1])));
    assert!(seen.contains(&(ItemKind::Sentence, sentence)));

    let item = random_word_or_sentence(&env.conn, &mut rng, &words, &[]).unwrap();
    assert_eq!(item.id(), sentence);
    assert!(item.is_sentence());

    let result = random_word_or_sentence(&env.conn, &mut rng, &words, &[sentence]);
    assert!(matches!(result, Err(BuildError::EmptyCandidatePool(_))));
  }

  #[test]
  fn test_incorrect_items_are_distinct_from_answer_and_each_other() {
    let env = TestEnv::new().unwrap();
    let topic = env.topic("Food");
    let rice = env.word(topic, "faan6", "rice");
    // Same gloss as the answer, never a valid distractor
    env.word(topic, "mai5", "rice");
    env.word(topic, "min6", "noodles");
    env.word(topic, "caa4", "tea");
    env.word(topic, "gai1", "chicken");

    let correct = Item::from(env.get_word(rice));
    for seed in 0..20 {
      let mut rng = StdRng::seed_from_u64(seed);
      let distractors =
        incorrect_items(&env.conn, &mut rng, Some(&correct), ItemKind::Word, &ItemFilter::new())
          .unwrap();
      assert_eq!(distractors.len(), 3);
      let glosses: HashSet<&str> = distractors.iter().map(|d| d.english()).collect();
      assert_eq!(glosses.len(), 3);
      assert!(!glosses.contains("rice"));
    }
  }

  #[test]
  fn test_incorrect_items_not_enough_candidates() {
    let env = TestEnv::new().unwrap();
    let ids = env.food_words(3);
    let correct = Item::from(env.get_word(ids[0]));
    let mut rng = StdRng::seed_from_u64(5);
    let result =
      incorrect_items(&env.conn, &mut rng, Some(&correct), ItemKind::Word, &ItemFilter::new());
    assert!(matches!(result, Err(BuildError::EmptyCandidatePool(_))));
  }

  #[test]
  fn test_incorrect_items_without_correct_item() {
    let env = TestEnv::new().unwrap();
    env.food_words(3);
    let mut rng = StdRng::seed_from_u64(5);
    let distractors =
      incorrect_items(&env.conn, &mut rng, None, ItemKind::Word, &ItemFilter::new()).unwrap();
    assert_eq!(distractors.len(), 3);
  }
}
