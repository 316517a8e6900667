use std::time::Duration;

use anyhow::{anyhow, Context, Result};

use crate::render::template::PageSize;

/// Application configuration loaded from environment variables.
/// Startup fails if required variables are missing or malformed.
#[derive(Debug, Clone)]
pub struct Config {
    pub anthropic_api_key: String,
    pub port: u16,
    pub rust_log: String,
    pub page_size: PageSize,
    pub render_timeout: Duration,
    pub max_pages: u16,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from any key lookup; `from_env` passes the process
    /// environment.
    fn from_lookup(get: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let anthropic_api_key = get("ANTHROPIC_API_KEY")
            .filter(|v| !v.trim().is_empty())
            .context("Required environment variable 'ANTHROPIC_API_KEY' is not set")?;

        let port = get("PORT")
            .unwrap_or_else(|| "8080".to_string())
            .parse::<u16>()
            .context("PORT must be a valid port number")?;

        let page_size = get("PAGE_SIZE")
            .unwrap_or_else(|| "a4".to_string())
            .parse::<PageSize>()
            .map_err(|e| anyhow!(e))
            .context("PAGE_SIZE must be 'a4' or 'letter'")?;

        let render_timeout_secs = get("RENDER_TIMEOUT_SECS")
            .unwrap_or_else(|| "30".to_string())
            .parse::<u64>()
            .context("RENDER_TIMEOUT_SECS must be a whole number of seconds")?;
        if render_timeout_secs == 0 {
            return Err(anyhow!("RENDER_TIMEOUT_SECS must be at least 1"));
        }

        let max_pages = get("MAX_PAGES")
            .unwrap_or_else(|| "4".to_string())
            .parse::<u16>()
            .context("MAX_PAGES must be a positive integer")?;
        if max_pages == 0 {
            return Err(anyhow!("MAX_PAGES must be at least 1"));
        }

        Ok(Config {
            anthropic_api_key,
            port,
            rust_log: get("RUST_LOG").unwrap_or_else(|| "info".to_string()),
            page_size,
            render_timeout: Duration::from_secs(render_timeout_secs),
            max_pages,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn config(pairs: &[(&str, &str)]) -> Result<Config> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let cfg = config(&[("ANTHROPIC_API_KEY", "sk-test")]).unwrap();
        assert_eq!(cfg.port, 8080);
        assert_eq!(cfg.rust_log, "info");
        assert_eq!(cfg.page_size, PageSize::A4);
        assert_eq!(cfg.render_timeout, Duration::from_secs(30));
        assert_eq!(cfg.max_pages, 4);
    }

    #[test]
    fn test_missing_api_key_fails() {
        let err = config(&[]).unwrap_err();
        assert!(err.to_string().contains("ANTHROPIC_API_KEY"));
    }

    #[test]
    fn test_overrides() {
        let cfg = config(&[
            ("ANTHROPIC_API_KEY", "sk-test"),
            ("PORT", "9000"),
            ("PAGE_SIZE", "Letter"),
            ("RENDER_TIMEOUT_SECS", "5"),
            ("MAX_PAGES", "2"),
        ])
        .unwrap();
        assert_eq!(cfg.port, 9000);
        assert_eq!(cfg.page_size, PageSize::Letter);
        assert_eq!(cfg.render_timeout, Duration::from_secs(5));
        assert_eq!(cfg.max_pages, 2);
    }

    #[test]
    fn test_invalid_values_fail() {
        assert!(config(&[("ANTHROPIC_API_KEY", "k"), ("PAGE_SIZE", "legal")]).is_err());
        assert!(config(&[("ANTHROPIC_API_KEY", "k"), ("PORT", "http")]).is_err());
        assert!(config(&[("ANTHROPIC_API_KEY", "k"), ("MAX_PAGES", "0")]).is_err());
        assert!(config(&[("ANTHROPIC_API_KEY", "k"), ("RENDER_TIMEOUT_SECS", "0")]).is_err());
    }
}
