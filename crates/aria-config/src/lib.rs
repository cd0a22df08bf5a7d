//! Persona scripts and runtime settings.
//!
//! - [`PersonaRegistry`] — Named persona scripts with built-in defaults and JSON overrides
//! - [`Persona`] — A single behavioral script handed verbatim to an agent
//! - [`Settings`] — Deployment settings read from the environment
//!
//! # Loading personas
//!
//! ```rust,ignore
//! use aria_config::PersonaRegistry;
//! use std::path::Path;
//!
//! let registry = PersonaRegistry::with_defaults().merge_dir(Path::new("personas"))?;
//! let script = registry.script(aria_config::WELCOME_PERSONA)?;
//! ```

mod persona;
mod settings;

pub use persona::{Persona, PersonaRegistry, COMPANION_PERSONA, WELCOME_PERSONA};
pub use settings::{Settings, CHAT_LOG_COLLECTION};

/// Errors that can occur when loading configuration.
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    /// Failed to read a configuration file.
    #[error("Failed to read config file '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Failed to parse JSON configuration.
    #[error("Failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),

    /// Requested persona was not found in the registry.
    #[error("Persona not found: '{0}'")]
    PersonaNotFound(String),

    /// An environment variable held an unusable value.
    #[error("Invalid value for {name}: '{value}'")]
    InvalidVar { name: &'static str, value: String },
}

impl ConfigError {
    /// Creates an IO error with path context.
    pub fn io(path: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io { path: path.into(), source }
    }
}
