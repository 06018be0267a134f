use rusqlite::{params_from_iter, Connection, Result};

use super::items::SYLLABLES_SQL;
use crate::domain::Topic;

pub fn count_words(conn: &Connection) -> Result<i64> {
    conn.query_row("SELECT COUNT(*) FROM words", [], |row| row.get(0))
}

pub fn count_sentences(conn: &Connection) -> Result<i64> {
    conn.query_row("SELECT COUNT(*) FROM sentences", [], |row| row.get(0))
}

/// Words plus sentences, the upper bound on quiz length
pub fn count_items(conn: &Connection) -> Result<i64> {
    Ok(count_words(conn)? + count_sentences(conn)?)
}

/// Words that have a recording
pub fn count_audio_words(conn: &Connection) -> Result<i64> {
    conn.query_row(
        "SELECT COUNT(*) FROM words WHERE audio_file IS NOT NULL AND audio_file != ''",
        [],
        |row| row.get(0),
    )
}

/// Single syllable words that have a recording (usable for tone questions)
pub fn count_single_token_audio_words(conn: &Connection) -> Result<i64> {
    let sql = format!(
        r#"
        SELECT COUNT(*) FROM words
        WHERE audio_file IS NOT NULL AND audio_file != ''
            AND instr({}, ' ') = 0
        "#,
        SYLLABLES_SQL
    );
    conn.query_row(&sql, [], |row| row.get(0))
}

/// Sentences of at least two syllables (usable for missing word and word order)
pub fn count_multi_token_sentences(conn: &Connection) -> Result<i64> {
    let sql = format!("SELECT COUNT(*) FROM sentences WHERE instr({}, ' ') > 0", SYLLABLES_SQL);
    conn.query_row(&sql, [], |row| row.get(0))
}

fn collect_ids(conn: &Connection, sql: &str, threshold: Option<i64>) -> Result<Vec<i64>> {
    let mut stmt = conn.prepare(sql)?;
    let ids = stmt
        .query_map(params_from_iter(threshold), |row| row.get(0))?
        .collect::<Result<Vec<i64>>>()?;
    Ok(ids)
}

pub fn sentence_ids(conn: &Connection) -> Result<Vec<i64>> {
    collect_ids(conn, "SELECT id FROM sentences ORDER BY id", None)
}

/// Sentences nobody has replied to
pub fn sentence_ids_without_responses(conn: &Connection) -> Result<Vec<i64>> {
    collect_ids(
        conn,
        r#"
        SELECT id FROM sentences
        WHERE id NOT IN (SELECT response_to_id FROM sentence_responses)
        ORDER BY id
        "#,
        None,
    )
}

/// Sentences that are not a reply to anything
pub fn sentence_ids_without_response_to(conn: &Connection) -> Result<Vec<i64>> {
    collect_ids(
        conn,
        r#"
        SELECT id FROM sentences
        WHERE id NOT IN (SELECT sentence_id FROM sentence_responses)
        ORDER BY id
        "#,
        None,
    )
}

/// Sentences with at least `min_count` responses
pub fn sentence_ids_with_min_responses(conn: &Connection, min_count: i64) -> Result<Vec<i64>> {
    collect_ids(
        conn,
        r#"
        SELECT response_to_id FROM sentence_responses
        GROUP BY response_to_id
        HAVING COUNT(*) >= ?1
        ORDER BY response_to_id
        "#,
        Some(min_count),
    )
}

/// Sentences replying to at least `min_count` other sentences
pub fn sentence_ids_with_min_response_to(conn: &Connection, min_count: i64) -> Result<Vec<i64>> {
    collect_ids(
        conn,
        r#"
        SELECT sentence_id FROM sentence_responses
        GROUP BY sentence_id
        HAVING COUNT(*) >= ?1
        ORDER BY sentence_id
        "#,
        Some(min_count),
    )
}

/// Topic with the number of words (and recorded words) it owns
#[derive(Debug, Clone)]
pub struct TopicWordCount {
    pub topic: Topic,
    pub word_count: i64,
    pub audio_word_count: i64,
}

pub fn topic_word_counts(conn: &Connection) -> Result<Vec<TopicWordCount>> {
    let mut stmt = conn.prepare(
        r#"
        SELECT t.id, t.topic_name, t.loc, t.colour,
                      COUNT(w.id),
                      COALESCE(SUM(CASE WHEN w.audio_file IS NOT NULL AND w.audio_file != '' THEN 1 ELSE 0 END), 0)
        FROM topics t
        LEFT JOIN words w ON w.topic_id = t.id
        GROUP BY t.id
        ORDER BY t.loc, t.id
        "#,
    )?;

    let counts = stmt
        .query_map([], |row| {
            Ok(TopicWordCount {
                topic: Topic {
                    id: row.get(0)?,
                    topic_name: row.get(1)?,
                    loc: row.get(2)?,
                    colour: row.get(3)?,
                },
                word_count: row.get(4)?,
                audio_word_count: row.get(5)?,
            })
        })?
        .collect::<Result<Vec<_>>>()?;
    Ok(counts)
}

pub fn topics_with_min_words(conn: &Connection, min_words: i64) -> Result<Vec<TopicWordCount>> {
    Ok(
        topic_word_counts(conn)?
            .into_iter()
            .filter(|t| t.word_count >= min_words)
            .collect(),
    )
}
