use std::sync::Arc;

use aria_core::{AgentError, AgentFactory, ConversationalAgent, Message};
use async_trait::async_trait;
use tokio::sync::Mutex;
use tracing::info;

use crate::model::ChatModel;
use crate::prompts::COSMIC_WORKS_PROMPT;

/// Number of most recent messages kept and replayed to the model on each turn.
pub const MAX_HISTORY_MESSAGES: usize = 20;

/// Cosmic Works sales assistant bound to one session.
///
/// Turns are serialized per agent so the history stays in order.
pub struct CosmicWorksAgent {
    session_id: String,
    model: Arc<dyn ChatModel>,
    history: Mutex<Vec<Message>>,
}

impl CosmicWorksAgent {
    pub fn new(session_id: &str, model: Arc<dyn ChatModel>) -> Self {
        Self {
            session_id: session_id.to_string(),
            model,
            history: Mutex::new(Vec::new()),
        }
    }

    /// Number of messages currently remembered for this session.
    pub async fn history_len(&self) -> usize {
        self.history.lock().await.len()
    }
}

#[async_trait]
impl ConversationalAgent for CosmicWorksAgent {
    async fn run(&self, prompt: &str) -> Result<String, AgentError> {
        let mut history = self.history.lock().await;
        info!("[{}] COSMIC WORKS: running turn ({} messages of history)", self.session_id, history.len());

        let reply = self.model.complete(COSMIC_WORKS_PROMPT, &history, prompt).await?;

        history.push(Message::user(prompt));
        history.push(Message::assistant(reply.as_str()));
        if history.len() > MAX_HISTORY_MESSAGES {
            let excess = history.len() - MAX_HISTORY_MESSAGES;
            history.drain(..excess);
        }
        Ok(reply)
    }
}

/// Builds [`CosmicWorksAgent`]s that share one chat model.
pub struct CosmicWorksFactory {
    model: Arc<dyn ChatModel>,
}

impl CosmicWorksFactory {
    pub fn new(model: Arc<dyn ChatModel>) -> Self {
        Self { model }
    }
}

impl AgentFactory for CosmicWorksFactory {
    fn create(&self, session_id: &str) -> Arc<dyn ConversationalAgent> {
        info!("[{}] COSMIC WORKS: creating agent", session_id);
        Arc::new(CosmicWorksAgent::new(session_id, self.model.clone()))
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex as StdMutex;

    use super::*;

    /// Replies with the number of history messages it was given.
    #[derive(Default)]
    struct CountingModel {
        seen: StdMutex<Vec<usize>>,
    }

    #[async_trait]
    impl ChatModel for CountingModel {
        async fn complete(&self, system_prompt: &str, history: &[Message], user_input: &str) -> Result<String, AgentError> {
            assert_eq!(system_prompt, COSMIC_WORKS_PROMPT);
            self.seen.lock().unwrap().push(history.len());
            Ok(format!("reply to {user_input}"))
        }
    }

    struct FailingModel;

    #[async_trait]
    impl ChatModel for FailingModel {
        async fn complete(&self, _: &str, _: &[Message], _: &str) -> Result<String, AgentError> {
            Err(AgentError::LlmError("upstream down".into()))
        }
    }

    #[tokio::test]
    async fn turns_accumulate_history() {
        let model = Arc::new(CountingModel::default());
        let agent = CosmicWorksAgent::new("s-1", model.clone());

        assert_eq!(agent.run("bikes?").await.unwrap(), "reply to bikes?");
        assert_eq!(agent.run("helmets?").await.unwrap(), "reply to helmets?");

        assert_eq!(*model.seen.lock().unwrap(), vec![0, 2]);
        assert_eq!(agent.history_len().await, 4);
    }

    #[tokio::test]
    async fn history_window_is_capped() {
        let model = Arc::new(CountingModel::default());
        let agent = CosmicWorksAgent::new("s-1", model.clone());

        for i in 0..MAX_HISTORY_MESSAGES {
            agent.run(&format!("q{i}")).await.unwrap();
        }

        assert_eq!(model.seen.lock().unwrap().last().copied(), Some(MAX_HISTORY_MESSAGES));
    }

    #[tokio::test]
    async fn stored_history_is_trimmed_to_the_window() {
        let model = Arc::new(CountingModel::default());
        let agent = CosmicWorksAgent::new("s-1", model.clone());

        for i in 0..MAX_HISTORY_MESSAGES * 3 {
            agent.run(&format!("q{i}")).await.unwrap();
            assert!(agent.history_len().await <= MAX_HISTORY_MESSAGES);
        }

        assert_eq!(agent.history_len().await, MAX_HISTORY_MESSAGES);
        let seen = model.seen.lock().unwrap();
        assert!(seen.iter().all(|&n| n <= MAX_HISTORY_MESSAGES));
        assert_eq!(seen.last().copied(), Some(MAX_HISTORY_MESSAGES));
    }

    #[tokio::test]
    async fn failed_turn_leaves_history_untouched() {
        let agent = CosmicWorksAgent::new("s-1", Arc::new(FailingModel));

        let err = agent.run("anything").await.unwrap_err();
        assert!(err.to_string().contains("upstream down"));
        assert_eq!(agent.history_len().await, 0);
    }

    #[tokio::test]
    async fn factory_builds_independent_agents() {
        let factory = CosmicWorksFactory::new(Arc::new(CountingModel::default()));
        let a = factory.create("a");
        let b = factory.create("b");

        a.run("one").await.unwrap();
        assert!(!Arc::ptr_eq(&a, &b));
    }
}
