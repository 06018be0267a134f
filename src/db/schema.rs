use rusqlite::{Connection, Result};

pub fn run_migrations(conn: &Connection) -> Result<()> {
  // Create tables with COMPLETE schema for new databases
  // Migrations below handle upgrades for existing databases
  conn.execute_batch(
    r#"
    PRAGMA foreign_keys = ON;

    CREATE TABLE IF NOT EXISTS topics (
      id INTEGER PRIMARY KEY AUTOINCREMENT,
      topic_name TEXT NOT NULL UNIQUE,
      loc INTEGER NOT NULL,
      colour TEXT NOT NULL DEFAULT '#dddddd'
    );

    CREATE TABLE IF NOT EXISTS words (
      id INTEGER PRIMARY KEY AUTOINCREMENT,
      topic_id INTEGER NOT NULL,
      jyutping TEXT NOT NULL,
      english TEXT NOT NULL,
      cantonese TEXT,
      notes TEXT NOT NULL DEFAULT '',
      loc INTEGER NOT NULL,
      audio_file TEXT,
      UNIQUE (topic_id, jyutping),
      FOREIGN KEY (topic_id) REFERENCES topics(id) ON DELETE CASCADE
    );

    CREATE TABLE IF NOT EXISTS sentences (
      id INTEGER PRIMARY KEY AUTOINCREMENT,
      topic_id INTEGER NOT NULL,
      jyutping TEXT NOT NULL,
      english TEXT NOT NULL,
      cantonese TEXT,
      notes TEXT NOT NULL DEFAULT '',
      loc INTEGER NOT NULL,
      UNIQUE (topic_id, jyutping),
      FOREIGN KEY (topic_id) REFERENCES topics(id) ON DELETE CASCADE
    );

    -- sentence_id is a response to response_to_id
    CREATE TABLE IF NOT EXISTS sentence_responses (
      sentence_id INTEGER NOT NULL,
      response_to_id INTEGER NOT NULL,
      PRIMARY KEY (sentence_id, response_to_id),
      CHECK (sentence_id != response_to_id),
      FOREIGN KEY (sentence_id) REFERENCES sentences(id) ON DELETE CASCADE,
      FOREIGN KEY (response_to_id) REFERENCES sentences(id) ON DELETE CASCADE
    );

    -- Indexes
    CREATE INDEX IF NOT EXISTS idx_words_topic_id ON words(topic_id);
    CREATE INDEX IF NOT EXISTS idx_words_english ON words(english);
    CREATE INDEX IF NOT EXISTS idx_sentences_topic_id ON sentences(topic_id);
    CREATE INDEX IF NOT EXISTS idx_sentences_english ON sentences(english);
    CREATE INDEX IF NOT EXISTS idx_sentence_responses_response_to ON sentence_responses(response_to_id);
    "#,
  )?;

  // ============================================================
  // MIGRATIONS FOR EXISTING DATABASES
  // These are no-ops for new databases (columns already exist)
  // ============================================================

  // Migration: Native script rendering
  add_column_if_missing(conn, "words", "cantonese", "TEXT")?;
  add_column_if_missing(conn, "sentences", "cantonese", "TEXT")?;

  // Migration: Topic colour
  add_column_if_missing(conn, "topics", "colour", "TEXT NOT NULL DEFAULT '#dddddd'")?;

  Ok(())
}

/// Check if a column exists in a table
fn column_exists(conn: &Connection, table: &str, column: &str) -> bool {
  conn
    .prepare(&format!("SELECT {} FROM {} LIMIT 1", column, table))
    .is_ok()
}

/// Add a column if it doesn't already exist
fn add_column_if_missing(conn: &Connection, table: &str, column: &str, column_def: &str) -> Result<()> {
  if !column_exists(conn, table, column) {
    conn.execute(
      &format!("ALTER TABLE {} ADD COLUMN {} {}", table, column, column_def),
      [],
    )?;
  }
  Ok(())
}
