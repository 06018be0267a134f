//! Topics and the words and sentences grouped under them.

use rusqlite::{params, Connection, OptionalExtension, Result, Row};
use serde::Serialize;

use super::items::{row_to_sentence, row_to_word};
use crate::domain::{Item, Sentence, Topic, Word};

/// A topic with its words and sentences in display order
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TopicItems {
    pub topic: Topic,
    pub words: Vec<Word>,
    pub sentences: Vec<Sentence>,
}

impl TopicItems {
    pub fn is_empty(&self) -> bool {
        self.words.is_empty() && self.sentences.is_empty()
    }

    /// Words first, then sentences, each in display order
    pub fn into_items(self) -> impl Iterator<Item = Item> {
        self.words
            .into_iter()
            .map(Item::from)
            .chain(self.sentences.into_iter().map(Item::from))
    }
}

pub fn insert_topic(conn: &Connection, topic_name: &str, loc: i64, colour: Option<&str>) -> Result<i64> {
    conn.execute(
        "INSERT INTO topics (topic_name, loc, colour) VALUES (?1, ?2, COALESCE(?3, '#dddddd'))",
        params![topic_name, loc, colour],
    )?;
    Ok(conn.last_insert_rowid())
}

fn row_to_topic(row: &Row) -> Result<Topic> {
    Ok(Topic {
        id: row.get(0)?,
        topic_name: row.get(1)?,
        loc: row.get(2)?,
        colour: row.get(3)?,
    })
}

pub fn get_topics(conn: &Connection) -> Result<Vec<Topic>> {
    let mut stmt = conn.prepare("SELECT id, topic_name, loc, colour FROM topics ORDER BY loc, id")?;
    let topics = stmt.query_map([], row_to_topic)?.collect::<Result<Vec<_>>>()?;
    Ok(topics)
}

pub fn get_topic(conn: &Connection, id: i64) -> Result<Option<Topic>> {
    conn.query_row(
        "SELECT id, topic_name, loc, colour FROM topics WHERE id = ?1",
        params![id],
        row_to_topic,
    )
    .optional()
}

fn topic_words(conn: &Connection, topic_id: i64) -> Result<Vec<Word>> {
    let mut stmt = conn.prepare(
        r#"
        SELECT id, topic_id, jyutping, english, cantonese, notes, loc, audio_file
        FROM words WHERE topic_id = ?1
        ORDER BY loc, id
        "#,
    )?;
    let words = stmt
        .query_map(params![topic_id], row_to_word)?
        .collect::<Result<Vec<_>>>()?;
    Ok(words)
}

fn topic_sentences(conn: &Connection, topic_id: i64) -> Result<Vec<Sentence>> {
    let mut stmt = conn.prepare(
        r#"
        SELECT id, topic_id, jyutping, english, cantonese, notes, loc
        FROM sentences WHERE topic_id = ?1
        ORDER BY loc, id
        "#,
    )?;
    let sentences = stmt
        .query_map(params![topic_id], row_to_sentence)?
        .collect::<Result<Vec<_>>>()?;
    Ok(sentences)
}

fn load_items(conn: &Connection, topic: Topic) -> Result<TopicItems> {
    Ok(TopicItems {
        words: topic_words(conn, topic.id)?,
        sentences: topic_sentences(conn, topic.id)?,
        topic,
    })
}

/// One topic with its items, or None if the topic does not exist
pub fn get_topic_items(conn: &Connection, topic_id: i64) -> Result<Option<TopicItems>> {
    get_topic(conn, topic_id)?
        .map(|topic| load_items(conn, topic))
        .transpose()
}

/// Every topic in display order with its words and sentences.
///
/// With `exclude_empty_topics`, topics owning neither words nor sentences
/// are left out.
pub fn get_topics_with_items(conn: &Connection, exclude_empty_topics: bool) -> Result<Vec<TopicItems>> {
    let mut grouped = Vec::new();
    for topic in get_topics(conn)? {
        let items = load_items(conn, topic)?;
        if exclude_empty_topics && items.is_empty() {
            continue;
        }
        grouped.push(items);
    }
    Ok(grouped)
}
