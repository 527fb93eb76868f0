//! Application configuration loaded from environment variables.
//!
//! A `.env` file is honoured for local development.

use std::env;
use std::path::PathBuf;
use std::str::FromStr;

/// Which document store backs the API.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageBackend {
    /// In-process store; data is lost on restart
    Memory,
    /// Google Cloud Firestore (or its emulator)
    Firestore,
}

impl FromStr for StorageBackend {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "memory" => Ok(StorageBackend::Memory),
            "firestore" => Ok(StorageBackend::Firestore),
            other => Err(ConfigError::Invalid("STORAGE_BACKEND", other.to_string())),
        }
    }
}

/// Application configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Frontend URL (CORS origin, cookie policy)
    pub frontend_url: String,
    /// Server port
    pub port: u16,
    /// Document store backend
    pub storage_backend: StorageBackend,
    /// GCP project ID (Firestore backend only)
    pub gcp_project_id: String,
    /// Optional JSON emission factor table
    pub emission_factors_path: Option<PathBuf>,
    /// JWT signing key for session tokens (raw bytes)
    pub jwt_signing_key: Vec<u8>,
    /// Session lifetime in seconds
    pub jwt_ttl_secs: u64,
}

impl Config {
    /// Default config for testing only.
    pub fn test_default() -> Self {
        Self {
            frontend_url: "http://localhost:3000".to_string(),
            port: 5000,
            storage_backend: StorageBackend::Memory,
            gcp_project_id: "test-project".to_string(),
            emission_factors_path: None,
            jwt_signing_key: b"test_jwt_key_32_bytes_minimum!!!".to_vec(),
            jwt_ttl_secs: 3600,
        }
    }

    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok(); // Load .env file if present

        Ok(Self {
            frontend_url: env::var("FRONTEND_URL")
                .unwrap_or_else(|_| "http://localhost:3000".to_string()),
            port: parse_or("PORT", 5000)?,
            storage_backend: env::var("STORAGE_BACKEND")
                .map(|v| v.parse())
                .unwrap_or(Ok(StorageBackend::Memory))?,
            gcp_project_id: env::var("GCP_PROJECT_ID").unwrap_or_else(|_| "local-dev".to_string()),
            emission_factors_path: env::var("EMISSION_FACTORS_PATH").ok().map(PathBuf::from),
            jwt_signing_key: jwt_signing_key(env::var("JWT_SECRET").ok())?,
            jwt_ttl_secs: parse_or("JWT_TTL_SECS", 3600)?,
        })
    }

    /// Whether session cookies may be sent over plain HTTP.
    pub fn is_local_frontend(&self) -> bool {
        self.frontend_url.starts_with("http://localhost")
            || self.frontend_url.starts_with("http://127.0.0.1")
    }
}

/// Shortest accepted HS256 secret, in bytes.
const MIN_JWT_SECRET_LEN: usize = 32;

fn jwt_signing_key(raw: Option<String>) -> Result<Vec<u8>, ConfigError> {
    let secret = raw.ok_or(ConfigError::Missing("JWT_SECRET"))?;
    let secret = secret.trim();
    if secret.len() < MIN_JWT_SECRET_LEN {
        return Err(ConfigError::Invalid(
            "JWT_SECRET",
            format!("must be at least {} bytes", MIN_JWT_SECRET_LEN),
        ));
    }
    Ok(secret.as_bytes().to_vec())
}

fn parse_or<T: FromStr>(name: &'static str, default: T) -> Result<T, ConfigError> {
    match env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid(name, raw)),
        Err(_) => Ok(default),
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    Missing(&'static str),

    #[error("Invalid value for {0}: {1}")]
    Invalid(&'static str, String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_from_env() {
        // Set required env vars for test
        env::set_var("JWT_SECRET", "test_jwt_key_32_bytes_minimum!!!");
        env::set_var("STORAGE_BACKEND", "Memory");
        env::remove_var("PORT");

        let config = Config::from_env().expect("Config should load");

        assert_eq!(config.jwt_signing_key, b"test_jwt_key_32_bytes_minimum!!!");
        assert_eq!(config.storage_backend, StorageBackend::Memory);
        assert_eq!(config.port, 5000);
        assert_eq!(config.jwt_ttl_secs, 3600);
    }

    #[test]
    fn test_jwt_secret_must_be_long_enough() {
        assert!(matches!(
            jwt_signing_key(None),
            Err(ConfigError::Missing("JWT_SECRET"))
        ));
        assert!(matches!(
            jwt_signing_key(Some(String::new())),
            Err(ConfigError::Invalid("JWT_SECRET", _))
        ));
        assert!(matches!(
            jwt_signing_key(Some("   ".to_string())),
            Err(ConfigError::Invalid("JWT_SECRET", _))
        ));
        assert!(matches!(
            jwt_signing_key(Some("short".to_string())),
            Err(ConfigError::Invalid("JWT_SECRET", _))
        ));

        let key = jwt_signing_key(Some(format!(" {} ", "k".repeat(32)))).unwrap();
        assert_eq!(key.len(), 32);
    }

    #[test]
    fn test_storage_backend_parse() {
        assert_eq!(
            "firestore".parse::<StorageBackend>().unwrap(),
            StorageBackend::Firestore
        );
        assert!("mongo".parse::<StorageBackend>().is_err());
    }

    #[test]
    fn test_local_frontend() {
        let mut config = Config::test_default();
        assert!(config.is_local_frontend());

        config.frontend_url = "https://carbon.example.com".to_string();
        assert!(!config.is_local_frontend());
    }
}
