//! Test utilities for database setup.
//!
//! Provides a temporary database initialised with the authoritative schema
//! plus small fixture helpers, eliminating schema duplication in test code.

use rusqlite::Connection;
use tempfile::TempDir;

use crate::db::{self, ItemFilter};
use crate::domain::{Sentence, Word};

/// Test environment with a learning database using the authoritative schema.
///
/// The database lives in a temporary directory that is removed on drop.
pub struct TestEnv {
    /// Temporary directory (kept alive for database file persistence)
    pub temp: TempDir,
    /// Connection with the full schema (all migrations)
    pub conn: Connection,
}

impl TestEnv {
    /// Create a test environment with an empty, fully migrated database.
    pub fn new() -> rusqlite::Result<Self> {
        let temp =
            TempDir::new().map_err(|e| rusqlite::Error::ToSqlConversionFailure(Box::new(e)))?;

        let conn = Connection::open(temp.path().join("jyutping.db"))?;
        db::run_migrations(&conn)?;

        Ok(Self { temp, conn })
    }

    /// Create a topic ordered after the existing ones, returning its id
    pub fn topic(&self, name: &str) -> i64 {
        let loc = db::get_topics(&self.conn).unwrap().len() as i64 + 1;
        db::insert_topic(&self.conn, name, loc, None).unwrap()
    }

    pub fn word(&self, topic_id: i64, jyutping: &str, english: &str) -> i64 {
        self.insert_word(topic_id, jyutping, english, None)
    }

    pub fn word_with_audio(&self, topic_id: i64, jyutping: &str, english: &str, audio: &str) -> i64 {
        self.insert_word(topic_id, jyutping, english, Some(audio))
    }

    fn insert_word(&self, topic_id: i64, jyutping: &str, english: &str, audio: Option<&str>) -> i64 {
        db::insert_word(
            &self.conn,
            &Word {
                id: 0,
                topic_id,
                jyutping: jyutping.to_string(),
                english: english.to_string(),
                cantonese: None,
                notes: String::new(),
                loc: 1,
                audio_file: audio.map(|a| a.to_string()),
            },
        )
        .unwrap()
    }

    pub fn get_word(&self, id: i64) -> Word {
        db::find_words(&self.conn, &ItemFilter::new())
            .unwrap()
            .into_iter()
            .find(|w| w.id == id)
            .unwrap()
    }

    pub fn sentence(&self, topic_id: i64, jyutping: &str, english: &str) -> i64 {
        db::insert_sentence(
            &self.conn,
            &Sentence {
                id: 0,
                topic_id,
                jyutping: jyutping.to_string(),
                english: english.to_string(),
                cantonese: None,
                notes: String::new(),
                loc: 1,
            },
        )
        .unwrap()
    }

    /// Mark `sentence_id` as a response to `response_to_id`
    pub fn respond(&self, sentence_id: i64, response_to_id: i64) {
        db::add_response(&self.conn, sentence_id, response_to_id).unwrap();
    }

    /// One topic of `count` single-syllable words with distinct glosses
    pub fn food_words(&self, count: usize) -> Vec<i64> {
        const FOOD: [(&str, &str); 8] = [
            ("faan6", "rice"),
            ("min6", "noodles"),
            ("caa4", "tea"),
            ("gai1", "chicken"),
            ("jyu2", "fish"),
            ("ngau4", "cow"),
            ("coi3", "vegetable"),
            ("tong1", "soup"),
        ];
        assert!(count <= FOOD.len(), "only {} food words available", FOOD.len());
        let topic = self.topic("Food");
        FOOD[..count]
            .iter()
            .map(|(jyutping, english)| self.word(topic, jyutping, english))
            .collect()
    }
}
