use std::path::PathBuf;

use anyhow::{Context, Result};

/// Application configuration loaded from environment variables.
/// Every variable has a default; malformed numbers abort startup.
#[derive(Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    pub username: String,
    pub password: String,
    pub skills_path: PathBuf,
    pub lexicon_path: PathBuf,
    pub max_upload_bytes: usize,
    pub session_idle_minutes: i64,
    pub wordcloud_max_words: usize,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            port: parse_env("PORT", 8080)?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            username: env_or("REVIEW_USERNAME", "admin"),
            password: env_or("REVIEW_PASSWORD", "test123"),
            skills_path: PathBuf::from(env_or("SKILLS_PATH", "data/skill_list.txt")),
            lexicon_path: PathBuf::from(env_or("LEXICON_PATH", "data/lexicon.txt")),
            max_upload_bytes: parse_env("MAX_UPLOAD_BYTES", 10 * 1024 * 1024)?,
            session_idle_minutes: parse_env("SESSION_IDLE_MINUTES", 60)?,
            wordcloud_max_words: parse_env("WORDCLOUD_MAX_WORDS", 200)?,
        })
    }
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("port", &self.port)
            .field("rust_log", &self.rust_log)
            .field("username", &self.username)
            .field("skills_path", &self.skills_path)
            .field("lexicon_path", &self.lexicon_path)
            .field("max_upload_bytes", &self.max_upload_bytes)
            .field("session_idle_minutes", &self.session_idle_minutes)
            .field("wordcloud_max_words", &self.wordcloud_max_words)
            .finish_non_exhaustive()
    }
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

fn parse_env<T>(key: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .with_context(|| format!("{key} must be a valid number, got '{raw}'")),
        Err(_) => Ok(default),
    }
}
