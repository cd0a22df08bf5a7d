use aria_core::{AgentError, Message};
use aria_llm::LlmClient;
use async_trait::async_trait;

/// Single-shot chat completion over a system prompt and history.
#[async_trait]
pub trait ChatModel: Send + Sync {
    async fn complete(
        &self,
        system_prompt: &str,
        history: &[Message],
        user_input: &str,
    ) -> Result<String, AgentError>;
}

#[async_trait]
impl ChatModel for LlmClient {
    async fn complete(
        &self,
        system_prompt: &str,
        history: &[Message],
        user_input: &str,
    ) -> Result<String, AgentError> {
        let response = self.chat(system_prompt, history, user_input).await?;
        Ok(response.content)
    }
}
