//! Server configuration module.
//!
//! Configuration is loaded from environment variables with fallback to
//! defaults; the database path additionally falls back to the platform
//! app-data directory.

use std::env;
use std::path::PathBuf;

use directories::ProjectDirs;

/// Server configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// HTTP listen port
    pub http_port: u16,

    /// SQLite database file path
    pub database_path: PathBuf,

    /// JWT secret key for validating bearer tokens
    pub jwt_secret: String,
}

impl ServerConfig {
    /// Load configuration from environment variables.
    ///
    /// ## Environment Variables
    /// - `MONIS_HTTP_PORT`: listen port (default 8787)
    /// - `MONIS_DB_PATH`: database file (default: platform data dir)
    /// - `MONIS_JWT_SECRET`: token secret (dev default; set in production)
    pub fn load() -> Result<Self, ConfigError> {
        let config = ServerConfig {
            http_port: env::var("MONIS_HTTP_PORT")
                .unwrap_or_else(|_| "8787".to_string())
                .parse()
                .map_err(|_| ConfigError::InvalidValue("MONIS_HTTP_PORT".to_string()))?,

            database_path: match env::var("MONIS_DB_PATH") {
                Ok(path) => PathBuf::from(path),
                Err(_) => default_database_path()?,
            },

            jwt_secret: env::var("MONIS_JWT_SECRET").unwrap_or_else(|_| {
                // In production, this MUST be set via environment variable
                "monis-dev-secret-change-in-production".to_string()
            }),
        };

        Ok(config)
    }
}

/// Determines the default database file path.
///
/// ## Platform-Specific Paths
/// - **macOS**: `~/Library/Application Support/com.monis.rent/monis.db`
/// - **Windows**: `%APPDATA%\monis\rent\monis.db`
/// - **Linux**: `~/.local/share/monis-rent/monis.db`
fn default_database_path() -> Result<PathBuf, ConfigError> {
    let proj_dirs = ProjectDirs::from("com", "monis", "rent")
        .ok_or_else(|| ConfigError::MissingRequired("app data directory".to_string()))?;

    let data_dir = proj_dirs.data_dir();
    std::fs::create_dir_all(data_dir)
        .map_err(|e| ConfigError::InvalidValue(format!("data directory: {}", e)))?;

    Ok(data_dir.join("monis.db"))
}

/// Configuration error types.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}")]
    InvalidValue(String),

    #[error("Missing required configuration: {0}")]
    MissingRequired(String),
}
