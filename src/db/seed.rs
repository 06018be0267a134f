//! Starter content so a fresh install can produce a quiz straight away.

use rusqlite::{Connection, Result};

use super::{add_response, count_items, insert_sentence, insert_topic, insert_word};
use crate::domain::{Sentence, Word};

struct SeedTopic {
  name: &'static str,
  colour: &'static str,
  /// (jyutping, cantonese, english)
  words: &'static [(&'static str, &'static str, &'static str)],
  sentences: &'static [(&'static str, &'static str, &'static str)],
  /// (response jyutping, jyutping of the sentence it responds to)
  responses: &'static [(&'static str, &'static str)],
}

const STARTER_TOPICS: [SeedTopic; 3] = [
  SeedTopic {
    name: "Greetings",
    colour: "#ffe4b5",
    words: &[
      ("zou2 san4", "早晨", "good morning"),
      ("m4 goi1", "唔該", "thank you (for a service)"),
      ("do1 ze6", "多謝", "thank you (for a gift)"),
      ("baai1 baai3", "拜拜", "bye"),
    ],
    sentences: &[
      ("nei5 hou2", "你好", "hello"),
      ("nei5 hou2 maa3?", "你好嗎？", "how are you?"),
      ("ngo5 hou2 hou2", "我好好", "I'm very well"),
      ("maa4 maa2 dei2", "麻麻地", "so-so"),
      ("nei5 giu3 me1 meng2 aa3?", "你叫咩名呀？", "what is your name?"),
      ("ngo5 giu3 aa3 ming4", "我叫阿明", "my name is Ming"),
    ],
    responses: &[
      ("ngo5 hou2 hou2", "nei5 hou2 maa3?"),
      ("maa4 maa2 dei2", "nei5 hou2 maa3?"),
      ("ngo5 giu3 aa3 ming4", "nei5 giu3 me1 meng2 aa3?"),
    ],
  },
  SeedTopic {
    name: "Food",
    colour: "#d1f2d1",
    words: &[
      ("faan6", "飯", "rice"),
      ("min6", "麵", "noodles"),
      ("caa4", "茶", "tea"),
      ("gai1", "雞", "chicken"),
      ("jyu2", "魚", "fish"),
      ("ngau4 juk6", "牛肉", "beef"),
      ("sik6", "食", "eat"),
      ("jam2", "飲", "drink"),
    ],
    sentences: &[
      ("keoi5 sik6 faan6", "佢食飯", "he eats rice"),
      ("ngo5 jam2 caa4", "我飲茶", "I drink tea"),
      ("nei5 sik6 zo2 faan6 mei6 aa3?", "你食咗飯未呀？", "have you eaten yet?"),
      ("sik6 zo2 laa3", "食咗喇", "I have eaten"),
    ],
    responses: &[("sik6 zo2 laa3", "nei5 sik6 zo2 faan6 mei6 aa3?")],
  },
  SeedTopic {
    name: "People",
    colour: "#d6e4ff",
    words: &[
      ("ngo5", "我", "I"),
      ("nei5", "你", "you"),
      ("keoi5", "佢", "he / she"),
      ("pang4 jau5", "朋友", "friend"),
    ],
    sentences: &[],
    responses: &[],
  },
];

/// Insert the starter topics when the database holds no words or sentences
pub fn seed_starter_content(conn: &Connection) -> Result<()> {
  if count_items(conn)? > 0 {
    return Ok(());
  }

  for (topic_loc, seed) in STARTER_TOPICS.iter().enumerate() {
    let topic_id = insert_topic(conn, seed.name, topic_loc as i64 + 1, Some(seed.colour))?;

    for (loc, (jyutping, cantonese, english)) in seed.words.iter().enumerate() {
      insert_word(
        conn,
        &Word {
          id: 0,
          topic_id,
          jyutping: jyutping.to_string(),
          english: english.to_string(),
          cantonese: Some(cantonese.to_string()),
          notes: String::new(),
          loc: loc as i64 + 1,
          audio_file: None,
        },
      )?;
    }

    let mut sentence_ids = Vec::with_capacity(seed.sentences.len());
    for (loc, (jyutping, cantonese, english)) in seed.sentences.iter().enumerate() {
      let id = insert_sentence(
        conn,
        &Sentence {
          id: 0,
          topic_id,
          jyutping: jyutping.to_string(),
          english: english.to_string(),
          cantonese: Some(cantonese.to_string()),
          notes: String::new(),
          loc: loc as i64 + 1,
        },
      )?;
      sentence_ids.push((*jyutping, id));
    }

    let lookup = |jyutping: &str| {
      sentence_ids
        .iter()
        .find(|(j, _)| *j == jyutping)
        .map(|(_, id)| *id)
    };
    for &(response, response_to) in seed.responses {
      if let (Some(a), Some(b)) = (lookup(response), lookup(response_to)) {
        add_response(conn, a, b)?;
      }
    }
  }

  tracing::info!("Seeded starter topics");
  Ok(())
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::db::{count_sentences, count_words, sentence_ids_without_responses};
  use crate::testing::TestEnv;

  #[test]
  fn test_seed_populates_empty_database() {
    let env = TestEnv::new().unwrap();
    seed_starter_content(&env.conn).unwrap();

    assert_eq!(count_words(&env.conn).unwrap(), 16);
    assert_eq!(count_sentences(&env.conn).unwrap(), 10);
    // 3 sentences have replies
    assert_eq!(sentence_ids_without_responses(&env.conn).unwrap().len(), 7);
  }

  #[test]
  fn test_seed_skips_populated_database() {
    let env = TestEnv::new().unwrap();
    let topic = env.topic("Mine");
    env.word(topic, "gau2", "dog");

    seed_starter_content(&env.conn).unwrap();
    assert_eq!(count_words(&env.conn).unwrap(), 1);
  }
}
