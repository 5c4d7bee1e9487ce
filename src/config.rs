//! Runtime configuration, read once from the environment at startup.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_OPENAI_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_OPENAI_MODEL: &str = "gpt-3.5-turbo";
pub const DEFAULT_TTS_URL: &str = "https://www.w3schools.com/html/horse.mp3";
pub const DEFAULT_IMAGE_URL: &str = "https://placekitten.com/400/300";

#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{name} has an invalid value '{value}'")]
    Invalid { name: &'static str, value: String },
}

#[derive(Debug, Clone)]
pub struct OpenAiConfig {
    pub api_key: Option<String>,
    pub base_url: String,
    pub model: String,
    pub timeout: Duration,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub database_path: PathBuf,
    pub upload_dir: PathBuf,
    pub static_dir: PathBuf,
    pub openai: OpenAiConfig,
    pub demo_tts_url: String,
    pub demo_image_url: String,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Builds a config from an arbitrary variable source. Empty values count
    /// as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str| lookup(name).filter(|v| !v.is_empty());
        let or = |name: &str, default: &str| var(name).unwrap_or_else(|| default.to_string());

        let port = parse_or(var("PORT"), "PORT", 3000u16)?;
        let timeout_secs = parse_or(var("OPENAI_TIMEOUT_SECS"), "OPENAI_TIMEOUT_SECS", 60u64)?;

        Ok(Self {
            host: or("HOST", "0.0.0.0"),
            port,
            database_path: or("DATABASE_PATH", "stories.db").into(),
            upload_dir: or("UPLOAD_DIR", "uploads").into(),
            static_dir: or("STATIC_DIR", "static").into(),
            openai: OpenAiConfig {
                api_key: var("OPENAI_API_KEY"),
                base_url: or("OPENAI_BASE_URL", DEFAULT_OPENAI_BASE_URL),
                model: or("OPENAI_MODEL", DEFAULT_OPENAI_MODEL),
                timeout: Duration::from_secs(timeout_secs),
            },
            demo_tts_url: or("DEMO_TTS_URL", DEFAULT_TTS_URL),
            demo_image_url: or("DEMO_IMAGE_URL", DEFAULT_IMAGE_URL),
        })
    }

    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .map_err(|_| ConfigError::Invalid {
                name: "HOST",
                value: self.host.clone(),
            })
    }
}

fn parse_or<T: std::str::FromStr>(
    raw: Option<String>,
    name: &'static str,
    default: T,
) -> Result<T, ConfigError> {
    match raw {
        Some(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid { name, value }),
        None => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn from_pairs(pairs: &[(&str, &str)]) -> Result<Config, ConfigError> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|name| map.get(name).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = from_pairs(&[]).unwrap();
        assert_eq!(config.port, 3000);
        assert_eq!(config.database_path, PathBuf::from("stories.db"));
        assert_eq!(config.upload_dir, PathBuf::from("uploads"));
        assert_eq!(config.openai.model, DEFAULT_OPENAI_MODEL);
        assert!(config.openai.api_key.is_none());
        assert_eq!(config.socket_addr().unwrap().port(), 3000);
    }

    #[test]
    fn test_overrides() {
        let config = from_pairs(&[
            ("PORT", "8080"),
            ("UPLOAD_DIR", "/tmp/intro"),
            ("OPENAI_API_KEY", "sk-test"),
            ("OPENAI_TIMEOUT_SECS", "5"),
        ])
        .unwrap();
        assert_eq!(config.port, 8080);
        assert_eq!(config.upload_dir, PathBuf::from("/tmp/intro"));
        assert_eq!(config.openai.api_key.as_deref(), Some("sk-test"));
        assert_eq!(config.openai.timeout, Duration::from_secs(5));
    }

    #[test]
    fn test_empty_value_is_unset() {
        let config = from_pairs(&[("OPENAI_API_KEY", ""), ("PORT", "")]).unwrap();
        assert!(config.openai.api_key.is_none());
        assert_eq!(config.port, 3000);
    }

    #[test]
    fn test_invalid_port() {
        let err = from_pairs(&[("PORT", "not-a-port")]).unwrap_err();
        assert_eq!(
            err,
            ConfigError::Invalid {
                name: "PORT",
                value: "not-a-port".into()
            }
        );
    }

    #[test]
    fn test_invalid_host() {
        let config = from_pairs(&[("HOST", "not a host")]).unwrap();
        assert!(config.socket_addr().is_err());
    }
}
