//! Session-keyed registry of Cosmic Works agents.

use std::sync::Arc;

use aria_core::{AgentFactory, ConversationalAgent};
use dashmap::DashMap;
use tracing::{info, warn};

use crate::error::AppError;

/// Maps session IDs to live agents.
///
/// An agent is built on the first request for its session and reused for the
/// life of the registry. Insertion is atomic: concurrent first requests for
/// the same ID build exactly one agent.
pub struct AgentRegistry {
    agents: DashMap<String, Arc<dyn ConversationalAgent>>,
    factory: Arc<dyn AgentFactory>,
    max_sessions: Option<usize>,
}

impl AgentRegistry {
    /// Creates a registry; `max_sessions` of `None` is unlimited.
    pub fn new(factory: Arc<dyn AgentFactory>, max_sessions: Option<usize>) -> Self {
        Self {
            agents: DashMap::new(),
            factory,
            max_sessions,
        }
    }

    /// Returns the agent for `session_id`, building it if needed.
    ///
    /// Fails with [`AppError::Unavailable`] when a new session would exceed
    /// the cap. The cap check is not atomic with insertion, so it may be
    /// overshot by concurrent new sessions.
    pub fn get_or_create(&self, session_id: &str) -> Result<Arc<dyn ConversationalAgent>, AppError> {
        if let Some(agent) = self.agents.get(session_id) {
            info!("[{}] Using existing agent", session_id);
            return Ok(agent.value().clone());
        }

        if let Some(max) = self.max_sessions {
            if self.session_count() >= max {
                warn!("[{}] Session limit reached ({})", session_id, max);
                return Err(AppError::Unavailable(format!(
                    "Maximum number of sessions reached: {}",
                    max
                )));
            }
        }

        let agent = self
            .agents
            .entry(session_id.to_string())
            .or_insert_with(|| self.factory.create(session_id))
            .value()
            .clone();
        Ok(agent)
    }

    /// Number of live sessions.
    pub fn session_count(&self) -> usize {
        self.agents.len()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use aria_core::AgentError;
    use async_trait::async_trait;

    use super::*;

    struct Echo;

    #[async_trait]
    impl ConversationalAgent for Echo {
        async fn run(&self, prompt: &str) -> Result<String, AgentError> {
            Ok(prompt.to_string())
        }
    }

    #[derive(Default)]
    struct CountingFactory {
        built: AtomicUsize,
    }

    impl AgentFactory for CountingFactory {
        fn create(&self, _session_id: &str) -> Arc<dyn ConversationalAgent> {
            self.built.fetch_add(1, Ordering::SeqCst);
            Arc::new(Echo)
        }
    }

    #[test]
    fn same_id_reuses_agent() {
        let factory = Arc::new(CountingFactory::default());
        let registry = AgentRegistry::new(factory.clone(), None);

        let first = registry.get_or_create("s").unwrap();
        let second = registry.get_or_create("s").unwrap();

        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(factory.built.load(Ordering::SeqCst), 1);
        assert_eq!(registry.session_count(), 1);
    }

    #[test]
    fn cap_refuses_new_sessions_only() {
        let registry = AgentRegistry::new(Arc::new(CountingFactory::default()), Some(1));

        registry.get_or_create("a").unwrap();
        assert!(matches!(registry.get_or_create("b"), Err(AppError::Unavailable(_))));
        assert!(registry.get_or_create("a").is_ok());
    }

    #[test]
    fn concurrent_first_requests_build_one_agent() {
        let factory = Arc::new(CountingFactory::default());
        let registry = Arc::new(AgentRegistry::new(factory.clone(), None));

        let handles: Vec<_> = (0..16)
            .map(|_| {
                let registry = registry.clone();
                std::thread::spawn(move || registry.get_or_create("shared").map(|_| ()).is_ok())
            })
            .collect();
        for handle in handles {
            assert!(handle.join().unwrap());
        }

        assert_eq!(factory.built.load(Ordering::SeqCst), 1);
        assert_eq!(registry.session_count(), 1);
    }
}
