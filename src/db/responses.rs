//! Directed "response to" edges between sentences.
//!
//! An edge (a, b) means sentence `a` is a reply to sentence `b`; seen from
//! `b`, `a` is one of its responses.

use rusqlite::{params, Connection, Result};

use super::items::row_to_sentence;
use crate::domain::Sentence;

/// Record that `sentence_id` is a response to `response_to_id`.
/// Self-references are rejected by the schema.
pub fn add_response(conn: &Connection, sentence_id: i64, response_to_id: i64) -> Result<()> {
    conn.execute(
        r#"
        INSERT INTO sentence_responses (sentence_id, response_to_id) VALUES (?1, ?2)
        ON CONFLICT (sentence_id, response_to_id) DO NOTHING
        "#,
        params![sentence_id, response_to_id],
    )?;
    Ok(())
}

/// Sentences replying to `sentence_id`
pub fn get_responses(conn: &Connection, sentence_id: i64) -> Result<Vec<Sentence>> {
    let mut stmt = conn.prepare(
        r#"
        SELECT s.id, s.topic_id, s.jyutping, s.english, s.cantonese, s.notes, s.loc
        FROM sentences s
        JOIN sentence_responses r ON r.sentence_id = s.id
        WHERE r.response_to_id = ?1
        ORDER BY s.id
        "#,
    )?;
    let sentences = stmt
        .query_map(params![sentence_id], row_to_sentence)?
        .collect::<Result<Vec<_>>>()?;
    Ok(sentences)
}

/// Sentences that `sentence_id` replies to
pub fn get_response_to(conn: &Connection, sentence_id: i64) -> Result<Vec<Sentence>> {
    let mut stmt = conn.prepare(
        r#"
        SELECT s.id, s.topic_id, s.jyutping, s.english, s.cantonese, s.notes, s.loc
        FROM sentences s
        JOIN sentence_responses r ON r.response_to_id = s.id
        WHERE r.sentence_id = ?1
        ORDER BY s.id
        "#,
    )?;
    let sentences = stmt
        .query_map(params![sentence_id], row_to_sentence)?
        .collect::<Result<Vec<_>>>()?;
    Ok(sentences)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::TestEnv;

    #[test]
    fn test_forward_and_reverse_lookups() {
        let env = TestEnv::new().unwrap();
        let topic = env.topic("Greetings");
        let how_are_you = env.sentence(topic, "nei5 hou2 maa3?", "how are you?");
        let fine = env.sentence(topic, "ngo5 hou2 hou2", "I'm very well");
        let so_so = env.sentence(topic, "maa4 maa2 dei2", "so-so");
        add_response(&env.conn, fine, how_are_you).unwrap();
        add_response(&env.conn, so_so, how_are_you).unwrap();

        let responses = get_responses(&env.conn, how_are_you).unwrap();
        assert_eq!(responses.iter().map(|s| s.id).collect::<Vec<_>>(), vec![fine, so_so]);

        let response_to = get_response_to(&env.conn, fine).unwrap();
        assert_eq!(response_to.len(), 1);
        assert_eq!(response_to[0].id, how_are_you);
        assert!(get_response_to(&env.conn, how_are_you).unwrap().is_empty());
    }

    #[test]
    fn test_self_reference_rejected() {
        let env = TestEnv::new().unwrap();
        let topic = env.topic("Greetings");
        let hello = env.sentence(topic, "nei5 hou2", "hello");
        assert!(add_response(&env.conn, hello, hello).is_err());
    }

    #[test]
    fn test_duplicate_edge_ignored() {
        let env = TestEnv::new().unwrap();
        let topic = env.topic("Greetings");
        let a = env.sentence(topic, "zou2 san4", "good morning");
        let b = env.sentence(topic, "zou2 san4 aa3", "good morning to you");
        add_response(&env.conn, b, a).unwrap();
        add_response(&env.conn, b, a).unwrap();
        assert_eq!(get_responses(&env.conn, a).unwrap().len(), 1);
    }
}
