use std::time::Duration;

use anyhow::{Context, Result};

const MEMORY_URL_PREFIX: &str = "memory:";

/// Application configuration loaded from environment variables.
/// Fails at startup if required variables are missing or malformed.
#[derive(Debug, Clone)]
pub struct Config {
    /// PostgreSQL connection string, or `memory:` for the in-process store.
    pub database_url: String,
    pub port: u16,
    pub rust_log: String,
    pub title_fetch_timeout: Duration,
    pub title_fetch_max_bytes: usize,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            database_url: require_env("DATABASE_URL")?,
            port: parse_env("PORT", 5000)?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            title_fetch_timeout: Duration::from_secs(parse_env("TITLE_FETCH_TIMEOUT_SECS", 5)?),
            title_fetch_max_bytes: parse_env("TITLE_FETCH_MAX_BYTES", 256 * 1024)?,
        })
    }

    pub fn uses_memory_store(&self) -> bool {
        self.database_url.starts_with(MEMORY_URL_PREFIX)
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
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

#[cfg(test)]
mod tests {
    use super::*;

    fn config(database_url: &str) -> Config {
        Config {
            database_url: database_url.to_string(),
            port: 5000,
            rust_log: "info".to_string(),
            title_fetch_timeout: Duration::from_secs(5),
            title_fetch_max_bytes: 1024,
        }
    }

    #[test]
    fn test_memory_url_selects_memory_store() {
        assert!(config("memory:").uses_memory_store());
        assert!(config("memory://demo").uses_memory_store());
    }

    #[test]
    fn test_postgres_url_selects_postgres() {
        assert!(!config("postgres://localhost/notemark").uses_memory_store());
    }

    #[test]
    fn test_parse_env_default_when_unset() {
        let value: u16 = parse_env("NOTEMARK_TEST_SURELY_UNSET_VAR", 5000).unwrap();
        assert_eq!(value, 5000);
    }
}
