//! Configuration module for postboard.
//!
//! All configuration is loaded from environment variables with sensible defaults.

use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;

use crate::errors::AppError;

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Path to the SQLite file backing the document store
    pub db_path: PathBuf,
    /// Directory holding uploaded blobs
    pub blob_dir: PathBuf,
    /// Externally reachable base URL, used to build public blob URLs
    pub public_url: String,
    /// Address to bind the server to
    pub bind_addr: SocketAddr,
    /// Log level (trace, debug, info, warn, error)
    pub log_level: String,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, AppError> {
        dotenvy::dotenv().ok();

        let db_path = env::var("POSTBOARD_DB_PATH")
            .unwrap_or_else(|_| "./data/posts.sqlite".to_string())
            .into();

        let blob_dir = env::var("POSTBOARD_BLOB_DIR")
            .unwrap_or_else(|_| "./data/blobs".to_string())
            .into();

        let public_url = env::var("POSTBOARD_PUBLIC_URL")
            .unwrap_or_else(|_| "http://127.0.0.1:8080".to_string())
            .trim_end_matches('/')
            .to_string();

        let raw_bind_addr =
            env::var("POSTBOARD_BIND_ADDR").unwrap_or_else(|_| "127.0.0.1:8080".to_string());
        let bind_addr = raw_bind_addr.parse().map_err(|e| {
            AppError::Internal(format!(
                "Invalid POSTBOARD_BIND_ADDR {:?}: {}",
                raw_bind_addr, e
            ))
        })?;

        let log_level = env::var("POSTBOARD_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        Ok(Self {
            db_path,
            blob_dir,
            public_url,
            bind_addr,
            log_level,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Both scenarios live in one test since they mutate the same process environment.
    #[test]
    fn test_config_from_env() {
        env::remove_var("POSTBOARD_DB_PATH");
        env::remove_var("POSTBOARD_BLOB_DIR");
        env::remove_var("POSTBOARD_PUBLIC_URL");
        env::remove_var("POSTBOARD_BIND_ADDR");
        env::remove_var("POSTBOARD_LOG_LEVEL");

        let config = Config::from_env().unwrap();

        assert_eq!(config.db_path, PathBuf::from("./data/posts.sqlite"));
        assert_eq!(config.blob_dir, PathBuf::from("./data/blobs"));
        assert_eq!(config.public_url, "http://127.0.0.1:8080");
        assert_eq!(config.bind_addr.to_string(), "127.0.0.1:8080");
        assert_eq!(config.log_level, "info");

        env::set_var("POSTBOARD_BIND_ADDR", "not-an-address");
        let result = Config::from_env();
        env::remove_var("POSTBOARD_BIND_ADDR");
        assert!(matches!(result, Err(AppError::Internal(_))));
    }
}
