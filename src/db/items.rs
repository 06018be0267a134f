//! Topics, words and sentences: inserts and filtered candidate queries.

use rusqlite::types::Value;
use rusqlite::{params, params_from_iter, Connection, OptionalExtension, Result, Row};

use crate::domain::{Item, Sentence, Word};

/// Jyutping without surrounding whitespace or a trailing question mark, so a
/// detached "?" is not counted as a syllable
pub(crate) const SYLLABLES_SQL: &str = "trim(rtrim(trim(jyutping), '?'))";

/// Restriction on the number of whitespace separated syllables in the jyutping
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TokenCount {
    #[default]
    Any,
    Single,
    Multiple,
}

/// Conjunctive filter over words or sentences.
///
/// Every populated field narrows the candidate set; the default filter
/// matches everything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ItemFilter {
    pub exclude_ids: Vec<i64>,
    pub exclude_english: Vec<String>,
    pub exclude_jyutping: Vec<String>,
    pub topic_id: Option<i64>,
    /// Tone digit that must appear somewhere in the jyutping
    pub tone: Option<char>,
    /// Only words with a recording (never matches sentences)
    pub audio_only: bool,
    pub tokens: TokenCount,
}

impl ItemFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn excluding_ids<I: IntoIterator<Item = i64>>(mut self, ids: I) -> Self {
        self.exclude_ids.extend(ids);
        self
    }

    /// Exclude anything sharing the gloss or the transcription of `item`
    pub fn excluding_item(mut self, item: &Item) -> Self {
        self.exclude_english.push(item.english().to_string());
        self.exclude_jyutping.push(item.jyutping().to_string());
        self
    }

    pub fn excluding_jyutping(mut self, jyutping: impl Into<String>) -> Self {
        self.exclude_jyutping.push(jyutping.into());
        self
    }

    pub fn in_topic(mut self, topic_id: i64) -> Self {
        self.topic_id = Some(topic_id);
        self
    }

    pub fn with_tone(mut self, tone: char) -> Self {
        self.tone = Some(tone);
        self
    }

    pub fn audio_only(mut self, audio_only: bool) -> Self {
        self.audio_only = audio_only;
        self
    }

    pub fn tokens(mut self, tokens: TokenCount) -> Self {
        self.tokens = tokens;
        self
    }

    /// Build the WHERE clause and its positional parameters
    fn to_sql(&self) -> (String, Vec<Value>) {
        let mut conditions: Vec<String> = vec!["1 = 1".to_string()];
        let mut values: Vec<Value> = Vec::new();

        if !self.exclude_ids.is_empty() {
            conditions.push(format!("id NOT IN ({})", placeholders(self.exclude_ids.len())));
            values.extend(self.exclude_ids.iter().map(|id| Value::Integer(*id)));
        }
        if !self.exclude_english.is_empty() {
            conditions.push(format!("english NOT IN ({})", placeholders(self.exclude_english.len())));
            values.extend(self.exclude_english.iter().map(|e| Value::Text(e.clone())));
        }
        if !self.exclude_jyutping.is_empty() {
            conditions.push(format!("jyutping NOT IN ({})", placeholders(self.exclude_jyutping.len())));
            values.extend(self.exclude_jyutping.iter().map(|j| Value::Text(j.clone())));
        }
        if let Some(topic_id) = self.topic_id {
            conditions.push("topic_id = ?".to_string());
            values.push(Value::Integer(topic_id));
        }
        if let Some(tone) = self.tone {
            conditions.push("instr(jyutping, ?) > 0".to_string());
            values.push(Value::Text(tone.to_string()));
        }
        if self.audio_only {
            conditions.push("audio_file IS NOT NULL AND audio_file != ''".to_string());
        }
        match self.tokens {
            TokenCount::Any => {}
            TokenCount::Single => conditions.push(format!("instr({}, ' ') = 0", SYLLABLES_SQL)),
            TokenCount::Multiple => conditions.push(format!("instr({}, ' ') > 0", SYLLABLES_SQL)),
        }

        (conditions.join(" AND "), values)
    }
}

fn placeholders(count: usize) -> String {
    vec!["?"; count].join(", ")
}

// ==================== Inserts ====================

/// Insert a word; `word.id` is ignored and the new id returned
pub fn insert_word(conn: &Connection, word: &Word) -> Result<i64> {
    conn.execute(
        r#"
        INSERT INTO words (topic_id, jyutping, english, cantonese, notes, loc, audio_file)
        VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
        "#,
        params![
            word.topic_id,
            word.jyutping,
            word.english,
            word.cantonese,
            word.notes,
            word.loc,
            word.audio_file,
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

/// Insert a sentence; `sentence.id` is ignored and the new id returned
pub fn insert_sentence(conn: &Connection, sentence: &Sentence) -> Result<i64> {
    conn.execute(
        r#"
        INSERT INTO sentences (topic_id, jyutping, english, cantonese, notes, loc)
        VALUES (?1, ?2, ?3, ?4, ?5, ?6)
        "#,
        params![
            sentence.topic_id,
            sentence.jyutping,
            sentence.english,
            sentence.cantonese,
            sentence.notes,
            sentence.loc,
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

// ==================== Queries ====================

const WORD_COLUMNS: &str = "id, topic_id, jyutping, english, cantonese, notes, loc, audio_file";
const SENTENCE_COLUMNS: &str = "id, topic_id, jyutping, english, cantonese, notes, loc";

pub(crate) fn row_to_word(row: &Row) -> Result<Word> {
    Ok(Word {
        id: row.get(0)?,
        topic_id: row.get(1)?,
        jyutping: row.get(2)?,
        english: row.get(3)?,
        cantonese: row.get(4)?,
        notes: row.get(5)?,
        loc: row.get(6)?,
        audio_file: row.get(7)?,
    })
}

pub(crate) fn row_to_sentence(row: &Row) -> Result<Sentence> {
    Ok(Sentence {
        id: row.get(0)?,
        topic_id: row.get(1)?,
        jyutping: row.get(2)?,
        english: row.get(3)?,
        cantonese: row.get(4)?,
        notes: row.get(5)?,
        loc: row.get(6)?,
    })
}

/// All words matching the filter, ordered by id
pub fn find_words(conn: &Connection, filter: &ItemFilter) -> Result<Vec<Word>> {
    let (where_clause, values) = filter.to_sql();
    let mut stmt = conn.prepare(&format!(
        "SELECT {} FROM words WHERE {} ORDER BY id",
        WORD_COLUMNS, where_clause
    ))?;
    let words = stmt
        .query_map(params_from_iter(values), row_to_word)?
        .collect::<Result<Vec<_>>>()?;
    Ok(words)
}

/// All sentences matching the filter, ordered by id
pub fn find_sentences(conn: &Connection, filter: &ItemFilter) -> Result<Vec<Sentence>> {
    // Sentences have no recordings
    if filter.audio_only {
        return Ok(Vec::new());
    }

    let (where_clause, values) = filter.to_sql();
    let mut stmt = conn.prepare(&format!(
        "SELECT {} FROM sentences WHERE {} ORDER BY id",
        SENTENCE_COLUMNS, where_clause
    ))?;
    let sentences = stmt
        .query_map(params_from_iter(values), row_to_sentence)?
        .collect::<Result<Vec<_>>>()?;
    Ok(sentences)
}

pub fn get_sentence(conn: &Connection, id: i64) -> Result<Option<Sentence>> {
    conn
        .query_row(
            &format!("SELECT {} FROM sentences WHERE id = ?1", SENTENCE_COLUMNS),
            params![id],
            row_to_sentence,
        )
        .optional()
}

/// Every distinct jyutping of a word or sentence glossed exactly as `english`
pub fn jyutping_for_english(conn: &Connection, english: &str) -> Result<Vec<String>> {
    let mut stmt = conn.prepare(
        r#"
        SELECT jyutping FROM words WHERE english = ?1
        UNION
        SELECT jyutping FROM sentences WHERE english = ?1
        ORDER BY jyutping
        "#,
    )?;
    let jyutping = stmt
        .query_map(params![english], |row| row.get(0))?
        .collect::<Result<Vec<String>>>()?;
    Ok(jyutping)
}

pub fn topic_word_ids(conn: &Connection, topic_id: i64) -> Result<Vec<i64>> {
    let mut stmt = conn.prepare("SELECT id FROM words WHERE topic_id = ?1 ORDER BY id")?;
    let ids = stmt
        .query_map(params![topic_id], |row| row.get(0))?
        .collect::<Result<Vec<i64>>>()?;
    Ok(ids)
}
