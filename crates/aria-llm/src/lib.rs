//! LLM client for aria agents.
//!
//! [`LlmClient`] talks to the OpenAI chat completions API or any compatible
//! endpoint (Ollama's `/v1`, Azure proxies, ...).
//!
//! ```rust,ignore
//! use aria_core::Message;
//! use aria_llm::LlmClient;
//!
//! let client = LlmClient::new("gpt-4o-mini", None);
//! let history = vec![Message::user("Hi"), Message::assistant("Hello!")];
//! let response = client.chat("You are helpful.", &history, "How are you?").await?;
//! println!("{} ({}ms)", response.content, response.metrics.elapsed_ms);
//! ```

mod client;

pub use client::{LlmClient, LlmMetrics, LlmResponse};
