//! Application Configuration
//!
//! Reads the model endpoint, MySQL connection settings and memory window
//! from the process environment (populated from `.env` by the binaries).

use crate::error::{QaError, Result};
use crate::schema;
use serde::{Deserialize, Serialize};

pub const DEFAULT_BASE_URL: &str = "http://localhost:11434";
pub const DEFAULT_MODEL_NAME: &str = "llama3:latest";
pub const DEFAULT_MYSQL_HOST: &str = "localhost";
pub const DEFAULT_MYSQL_PORT: u16 = 3306;
pub const DEFAULT_MYSQL_USER: &str = "root";
pub const DEFAULT_MYSQL_DATABASE: &str = schema::DATABASE_NAME;
pub const DEFAULT_MEMORY_WINDOW: usize = 10;

/// Language model endpoint settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LlmConfig {
    /// Base URL of the Ollama server
    pub base_url: String,

    /// Model tag, e.g. `llama3:latest`
    pub model: String,
}

/// MySQL connection settings
#[derive(Clone, PartialEq, Serialize, Deserialize)]
pub struct DatabaseConfig {
    pub host: String,
    pub port: u16,
    pub user: String,
    pub password: String,
    pub database: String,
}

impl std::fmt::Debug for DatabaseConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DatabaseConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("user", &self.user)
            .field("password", &"***")
            .field("database", &self.database)
            .finish()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    pub llm: LlmConfig,
    pub database: DatabaseConfig,

    /// Prior exchanges re-fed into prompts (0 = all of them)
    pub memory_window: usize,
}

impl AppConfig {
    /// Load configuration from the process environment
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        let port = match lookup("MYSQL_PORT") {
            Some(raw) => raw.trim().parse::<u16>().map_err(|e| {
                QaError::Config(format!("MYSQL_PORT must be a port number, got '{}': {}", raw, e))
            })?,
            None => DEFAULT_MYSQL_PORT,
        };

        let memory_window = match lookup("MEMORY_WINDOW") {
            Some(raw) => raw.trim().parse::<usize>().map_err(|e| {
                QaError::Config(format!("MEMORY_WINDOW must be a non-negative integer, got '{}': {}", raw, e))
            })?,
            None => DEFAULT_MEMORY_WINDOW,
        };

        Ok(Self {
            llm: LlmConfig {
                base_url: get("BASE_URL", DEFAULT_BASE_URL),
                model: get("MODEL_NAME", DEFAULT_MODEL_NAME),
            },
            database: DatabaseConfig {
                host: get("MYSQL_HOST", DEFAULT_MYSQL_HOST),
                port,
                user: get("MYSQL_USER", DEFAULT_MYSQL_USER),
                password: get("MYSQL_PASSWORD", ""),
                database: get("MYSQL_DATABASE", DEFAULT_MYSQL_DATABASE),
            },
            memory_window,
        })
    }

    /// Apply command-line overrides for the model endpoint
    pub fn with_overrides(mut self, base_url: Option<String>, model: Option<String>) -> Self {
        if let Some(base_url) = base_url {
            self.llm.base_url = base_url;
        }
        if let Some(model) = model {
            self.llm.model = model;
        }
        self
    }
}
