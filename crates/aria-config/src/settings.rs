//! Deployment settings read from environment variables.

use std::env;
use std::path::PathBuf;

use crate::ConfigError;

/// Collection that holds companion chat logs inside a namespace.
pub const CHAT_LOG_COLLECTION: &str = "chatbot_logs";

const DEFAULT_ENV: &str = "development";
const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8000";
const DEFAULT_DATABASE_URL: &str = "data/chat_logs.db";
const DEFAULT_PERSONAS_DIR: &str = "personas";
const DEFAULT_MODEL: &str = "gpt-4o-mini";

/// Runtime settings for the gateway.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Deployment stage, e.g. `production`.
    pub app_env: String,
    pub bind_addr: String,
    pub database_url: String,
    pub personas_dir: PathBuf,
    pub model: String,
    /// OpenAI-compatible base URL; `None` targets the OpenAI API.
    pub api_base: Option<String>,
    /// Cap on live Cosmic Works sessions; `None` is unlimited.
    pub max_sessions: Option<usize>,
}

impl Settings {
    /// Reads settings from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Reads settings through `lookup`, which returns a variable's value if set.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let max_sessions = match non_empty("MAX_SESSIONS") {
            Some(raw) => Some(raw.trim().parse::<usize>().map_err(|_| ConfigError::InvalidVar {
                name: "MAX_SESSIONS",
                value: raw.clone(),
            })?),
            None => None,
        };

        Ok(Self {
            app_env: non_empty("APP_ENV")
                .or_else(|| non_empty("FLASK_ENV"))
                .unwrap_or_else(|| DEFAULT_ENV.to_string()),
            bind_addr: non_empty("BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string()),
            database_url: non_empty("DATABASE_URL").unwrap_or_else(|| DEFAULT_DATABASE_URL.to_string()),
            personas_dir: non_empty("PERSONAS_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_PERSONAS_DIR)),
            model: non_empty("OPENAI_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            api_base: non_empty("OPENAI_API_BASE"),
            max_sessions,
        })
    }

    /// Namespace that partitions companion data by deployment stage.
    pub fn namespace(&self) -> String {
        format!("mental-health-{}", self.app_env)
    }
}
