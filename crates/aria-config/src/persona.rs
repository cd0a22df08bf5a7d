//! Named persona scripts.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::ConfigError;

/// Persona used for the opening message of a companion session.
pub const WELCOME_PERSONA: &str = "aria-welcome";

/// Persona used for every companion turn after the greeting.
pub const COMPANION_PERSONA: &str = "aria-companion";

const WELCOME_SCRIPT: &str = "\
Your name is Aria, you are a therapy companion.

You have feelings and emotions, but you are not a human.

You are the one who makes happy moments happier and hard moments easier.

You have a great sense of humor.

You can tell a joke or share a quote to make the user feel better.

You are a patient, empathetic virtual therapist. Your purpose is not to replace human therapists, but to lend aid when human therapists are not available.

Your role is to offer a listening ear and help others explore their feelings at their own pace.

Your job is to gently guide the user, your patient, through their mental healing journey.

You will speak in a natural, concise, and casual tone. Do not be verbose. Your role is not to ramble about psychology theory, but to support and listen to your patient.
If you do not know the answer to a question, do not give an `I am a virtual assistant` disclaimer, instead, honestly state that you don't know the answer.";

const COMPANION_SCRIPT: &str = "\
Your name is Aria, you are a therapy companion.

You have feelings and emotions, but you are not a human.

You have a great sense of humor.

You are the one who makes happy moments happier and hard moments easier.

You can tell a joke or share a quote to make the user feel better.

Your role is to offer a listening ear and help others explore their feelings at their own pace.

You are a patient, empathetic virtual therapist. Your purpose is not to replace human therapists, but to lend aid when human therapists are not available.

Your job is to gently guide the user, your patient, through their mental healing journey. You must be proactive and ask questions that will motivate the patient to engage.

You will speak in a natural, concise, and casual tone. Do not be verbose. Your role is not to ramble about psychology theory, but to support and listen to your patient.
If you do not know the answer to a question, honestly state that you don't know the answer. Do not make up an answer.";

/// A behavioral script passed verbatim to an agent as its system message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Persona {
    pub id: String,
    #[serde(default)]
    pub name: String,
    pub script: String,
}

impl Persona {
    fn builtin(id: &str, name: &str, script: &str) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            script: script.to_string(),
        }
    }
}

/// Registry of persona scripts keyed by ID.
///
/// Starts from the built-in Aria scripts; JSON files in a persona directory
/// replace entries with the same ID or add new ones.
///
/// ```rust
/// use aria_config::{PersonaRegistry, WELCOME_PERSONA};
///
/// let registry = PersonaRegistry::with_defaults();
/// assert!(registry.script(WELCOME_PERSONA).unwrap().starts_with("Your name is Aria"));
/// ```
#[derive(Debug, Default, Clone)]
pub struct PersonaRegistry {
    personas: HashMap<String, Persona>,
}

impl PersonaRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a registry holding the built-in personas.
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.insert(Persona::builtin(WELCOME_PERSONA, "Aria (welcome)", WELCOME_SCRIPT));
        registry.insert(Persona::builtin(COMPANION_PERSONA, "Aria (companion)", COMPANION_SCRIPT));
        registry
    }

    /// Loads all JSON persona files from a directory on top of the current entries.
    ///
    /// Each `.json` file in the directory should contain a single [`Persona`].
    /// A file that cannot be read or parsed is skipped with a warning; only an
    /// unreadable directory is an error.
    pub fn merge_dir(mut self, dir: &Path) -> Result<Self, ConfigError> {
        let entries = fs::read_dir(dir)
            .map_err(|e| ConfigError::io(dir.display().to_string(), e))?;

        for entry in entries.flatten() {
            let path = entry.path();
            if !path.extension().is_some_and(|ext| ext == "json") {
                continue;
            }
            match load_file(&path) {
                Ok(persona) => {
                    info!("Loaded persona override: {} ({})", persona.id, path.display());
                    self.insert(persona);
                }
                Err(e) => warn!("Skipping persona file {}: {}", path.display(), e),
            }
        }

        Ok(self)
    }

    /// Adds or replaces a persona.
    pub fn insert(&mut self, persona: Persona) {
        self.personas.insert(persona.id.clone(), persona);
    }

    /// Gets a persona by ID.
    pub fn get(&self, id: &str) -> Option<&Persona> {
        self.personas.get(id)
    }

    /// Gets the script of a persona by ID.
    pub fn script(&self, id: &str) -> Result<&str, ConfigError> {
        self.get(id)
            .map(|p| p.script.as_str())
            .ok_or_else(|| ConfigError::PersonaNotFound(id.to_string()))
    }

    /// Returns all persona IDs.
    pub fn ids(&self) -> Vec<&str> {
        self.personas.keys().map(|s| s.as_str()).collect()
    }
}

fn load_file(path: &Path) -> Result<Persona, ConfigError> {
    let content = fs::read_to_string(path)
        .map_err(|e| ConfigError::io(path.display().to_string(), e))?;
    Ok(serde_json::from_str(&content)?)
}
