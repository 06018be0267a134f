//! Application configuration constants and loaders.
//!
//! Defaults live here as constants. `config.toml` and environment variables
//! (optionally from `.env`) can override the database location, the server
//! port and the quiz tuning knobs.

use serde::Deserialize;
use std::path::PathBuf;

use crate::paths;
use crate::quiz::SelectorWeights;

// ==================== File Configuration ====================

/// Configuration file structure for config.toml
#[derive(Debug, Default, Deserialize)]
struct AppConfig {
    database: Option<DatabaseConfig>,
    quiz: Option<QuizSettings>,
}

#[derive(Debug, Deserialize)]
struct DatabaseConfig {
    path: Option<String>,
}

const CONFIG_FILE: &str = "config.toml";

fn read_config_file() -> AppConfig {
    let Ok(contents) = std::fs::read_to_string(CONFIG_FILE) else {
        return AppConfig::default();
    };
    parse_config(&contents)
}

fn parse_config(contents: &str) -> AppConfig {
    match toml::from_str::<AppConfig>(contents) {
        Ok(config) => config,
        Err(e) => {
            tracing::warn!("Ignoring invalid {}: {}", CONFIG_FILE, e);
            AppConfig::default()
        }
    }
}

// ==================== Database Configuration ====================

/// Load database path with priority: config.toml > .env > default
pub fn load_database_path() -> PathBuf {
    // Load .env file if present
    let _ = dotenvy::dotenv();

    if let Some(path) = read_config_file().database.and_then(|db| db.path) {
        tracing::info!("Using database from {}: {}", CONFIG_FILE, path);
        return PathBuf::from(path);
    }

    if let Ok(path) = std::env::var("DATABASE_PATH") {
        tracing::info!("Using database from DATABASE_PATH env: {}", path);
        return PathBuf::from(path);
    }

    let default = PathBuf::from(paths::db_path());
    tracing::info!("Using default database path: {}", default.display());
    default
}

// ==================== Server Configuration ====================

/// Server address to bind to
pub const SERVER_ADDR: &str = "0.0.0.0";

/// Default server port, overridden by the PORT env var
pub const SERVER_PORT: u16 = 3000;

pub fn server_port() -> u16 {
    std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(SERVER_PORT)
}

/// Get the full server bind address
pub fn server_bind_addr() -> String {
    format!("{}:{}", SERVER_ADDR, server_port())
}

// ==================== Quiz Configuration ====================

/// Attempts per question slot before the whole quiz is abandoned
pub const MAX_BUILD_ATTEMPTS: usize = 5;

/// Number of incorrect options in a multiple choice question
pub const DISTRACTOR_COUNT: usize = 3;

/// Quiz lengths offered on the quiz start page
pub const QUESTION_COUNT_CHOICES: [usize; 3] = [10, 25, 50];

/// A topic needs this many words before "which word is not in this topic" is fair
pub const MIN_TOPIC_WORDS: i64 = 3;

/// Tunable parameters of the quiz generator.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct QuizSettings {
    pub max_attempts: usize,
    pub selector: SelectorWeights,
}

impl Default for QuizSettings {
    fn default() -> Self {
        Self {
            max_attempts: MAX_BUILD_ATTEMPTS,
            selector: SelectorWeights::default(),
        }
    }
}

/// Load quiz settings from the `[quiz]` table of config.toml, falling back to defaults
pub fn load_quiz_settings() -> QuizSettings {
    let settings = read_config_file().quiz.unwrap_or_default();
    if settings.max_attempts == 0 {
        tracing::warn!("quiz.max_attempts must be at least 1, using {}", MAX_BUILD_ATTEMPTS);
        return QuizSettings {
            max_attempts: MAX_BUILD_ATTEMPTS,
            ..settings
        };
    }
    settings
}
