//! Core domain types and collaborator traits for aria.
//!
//! This crate provides the types shared across the aria workspace:
//!
//! - [`AgentError`] — Error type for agent, LLM, and chat-log operations
//! - [`Message`] and [`MessageRole`] — Conversation message types
//! - [`ChatTurn`] and [`HistoryScope`] — Persisted chat turns and how much of them to replay
//! - [`ConversationalAgent`] and [`AgentFactory`] — Session-scoped agents
//! - [`ResponseGenerator`] — Persona-driven greeting and turn responses
//! - [`ChatLog`] — Storage for chat turns
//!
//! # Example
//!
//! ```rust
//! use aria_core::{ChatTurn, HistoryScope, Message};
//!
//! let turn = ChatTurn {
//!     user_id: "u-1".to_string(),
//!     chat_id: 7,
//!     turn_id: 1,
//!     timestamp: "2024-05-01T10:00:00+00:00".to_string(),
//!     human_message: "Hi".to_string(),
//!     ai_message: "Hello there!".to_string(),
//! };
//!
//! assert_eq!(turn.to_messages(), vec![Message::user("Hi"), Message::assistant("Hello there!")]);
//! assert!(HistoryScope::All.includes(&turn, 8));
//! ```

use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

/// Errors that can occur while producing an agent reply.
#[derive(Error, Debug)]
pub enum AgentError {
    /// LLM API request failed.
    #[error("LLM request failed: {0}")]
    LlmError(String),

    /// Chat log read or write failed.
    #[error("Chat log error: {0}")]
    Storage(String),
}

/// Role of a message in a conversation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    /// Message from the user.
    User,
    /// Message from the assistant/LLM.
    Assistant,
}

/// A single message in a conversation history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    /// The role of the message sender.
    pub role: MessageRole,
    /// The content of the message.
    pub content: String,
}

impl Message {
    /// Creates a new user message.
    pub fn user(content: impl Into<String>) -> Self {
        Self { role: MessageRole::User, content: content.into() }
    }

    /// Creates a new assistant message.
    pub fn assistant(content: impl Into<String>) -> Self {
        Self { role: MessageRole::Assistant, content: content.into() }
    }
}

// ============================================================================
// Chat Log Types
// ============================================================================

/// How much prior conversation a response generator should replay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HistoryScope {
    /// Every earlier turn of the user, across all of their chats.
    All,
    /// Only earlier turns of the chat being answered.
    CurrentChat,
    /// No history at all.
    None,
}

impl HistoryScope {
    /// Returns `true` if `turn` belongs in the history of `chat_id` under this scope.
    pub fn includes(&self, turn: &ChatTurn, chat_id: i64) -> bool {
        match self {
            HistoryScope::All => true,
            HistoryScope::CurrentChat => turn.chat_id == chat_id,
            HistoryScope::None => false,
        }
    }
}

/// One exchange between the user and the companion, as stored in the chat log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatTurn {
    pub user_id: String,
    pub chat_id: i64,
    pub turn_id: i64,
    pub timestamp: String,
    pub human_message: String,
    pub ai_message: String,
}

impl ChatTurn {
    /// Expands the turn into the user/assistant message pair it represents.
    pub fn to_messages(&self) -> Vec<Message> {
        vec![
            Message::user(self.human_message.as_str()),
            Message::assistant(self.ai_message.as_str()),
        ]
    }
}

/// Storage for chat turns, partitioned by namespace and collection.
#[async_trait]
pub trait ChatLog: Send + Sync {
    /// Appends a turn to the log.
    async fn append(&self, namespace: &str, collection: &str, turn: ChatTurn) -> Result<(), AgentError>;

    /// Returns the user's turns selected by `scope`, oldest first.
    async fn history(
        &self,
        namespace: &str,
        collection: &str,
        user_id: &str,
        chat_id: i64,
        scope: HistoryScope,
    ) -> Result<Vec<ChatTurn>, AgentError>;
}

// ============================================================================
// Agent Traits
// ============================================================================

/// A stateful agent that answers one prompt at a time.
#[async_trait]
pub trait ConversationalAgent: Send + Sync {
    /// Runs a single conversational turn and returns the reply text.
    async fn run(&self, prompt: &str) -> Result<String, AgentError>;
}

/// Builds a fresh agent for a session.
pub trait AgentFactory: Send + Sync {
    fn create(&self, session_id: &str) -> Arc<dyn ConversationalAgent>;
}

/// Inputs for the opening message of a companion session.
#[derive(Debug, Clone)]
pub struct GreetingRequest {
    pub namespace: String,
    pub collection: String,
    pub user_id: String,
    pub system_message: String,
    pub timestamp: String,
}

/// Inputs for a single companion turn.
#[derive(Debug, Clone)]
pub struct TurnContext {
    pub namespace: String,
    pub collection: String,
    pub system_message: String,
    pub prompt: String,
    pub user_id: String,
    pub chat_id: i64,
    pub turn_id: i64,
    pub timestamp: String,
    pub scope: HistoryScope,
}

/// Produces persona-driven replies backed by a chat log.
///
/// Both generators return a JSON value that the HTTP layer passes through
/// unmodified.
#[async_trait]
pub trait ResponseGenerator: Send + Sync {
    /// Produces the opening message for a user.
    async fn initial_greeting(&self, request: GreetingRequest) -> Result<Value, AgentError>;

    /// Produces the reply to one turn and records it.
    async fn agent_response(&self, turn: TurnContext) -> Result<Value, AgentError>;

    /// Closes a chat. Nothing is persisted by default.
    async fn finalize_chat(&self, _namespace: &str, _user_id: &str, _chat_id: &str) -> Result<(), AgentError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn turn(chat_id: i64) -> ChatTurn {
        ChatTurn {
            user_id: "u".into(),
            chat_id,
            turn_id: 1,
            timestamp: "t".into(),
            human_message: "hi".into(),
            ai_message: "hello".into(),
        }
    }

    #[test]
    fn scope_selects_turns() {
        assert!(HistoryScope::All.includes(&turn(1), 2));
        assert!(HistoryScope::CurrentChat.includes(&turn(2), 2));
        assert!(!HistoryScope::CurrentChat.includes(&turn(1), 2));
        assert!(!HistoryScope::None.includes(&turn(2), 2));
    }

    #[test]
    fn scope_serializes_snake_case() {
        let json = serde_json::to_string(&HistoryScope::CurrentChat).unwrap();
        assert_eq!(json, "\"current_chat\"");
    }

    struct Quiet;

    #[async_trait]
    impl ResponseGenerator for Quiet {
        async fn initial_greeting(&self, _request: GreetingRequest) -> Result<Value, AgentError> {
            Ok(Value::Null)
        }

        async fn agent_response(&self, _turn: TurnContext) -> Result<Value, AgentError> {
            Ok(Value::Null)
        }
    }

    #[tokio::test]
    async fn finalize_defaults_to_noop() {
        assert!(Quiet.finalize_chat("ns", "u", "1").await.is_ok());
    }
}
