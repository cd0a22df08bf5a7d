//! Concrete agents behind the aria HTTP routes.
//!
//! - [`CosmicWorksAgent`] / [`CosmicWorksFactory`] — per-session shopping assistant
//! - [`CompanionResponder`] — Aria greeting and turn responses over a [`aria_core::ChatLog`]
//! - [`ChatModel`] — the completion seam both of them call

mod companion;
mod cosmic_works;
mod model;
mod prompts;

pub use companion::CompanionResponder;
pub use cosmic_works::{CosmicWorksAgent, CosmicWorksFactory, MAX_HISTORY_MESSAGES};
pub use model::ChatModel;
pub use prompts::{COSMIC_WORKS_PROMPT, GREETING_INSTRUCTION};
