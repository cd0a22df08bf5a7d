use std::sync::Arc;

use aria_core::{
    AgentError, ChatLog, ChatTurn, GreetingRequest, HistoryScope, Message, ResponseGenerator,
    TurnContext,
};
use async_trait::async_trait;
use serde_json::{json, Value};
use tracing::info;

use crate::model::ChatModel;
use crate::prompts::GREETING_INSTRUCTION;

/// Aria companion: answers from a persona script and the user's chat log.
pub struct CompanionResponder {
    model: Arc<dyn ChatModel>,
    log: Arc<dyn ChatLog>,
}

impl CompanionResponder {
    pub fn new(model: Arc<dyn ChatModel>, log: Arc<dyn ChatLog>) -> Self {
        Self { model, log }
    }

    async fn load_history(
        &self,
        namespace: &str,
        collection: &str,
        user_id: &str,
        chat_id: i64,
        scope: HistoryScope,
    ) -> Result<Vec<Message>, AgentError> {
        if scope == HistoryScope::None {
            return Ok(Vec::new());
        }
        let turns = self.log.history(namespace, collection, user_id, chat_id, scope).await?;
        Ok(turns.iter().flat_map(ChatTurn::to_messages).collect())
    }
}

#[async_trait]
impl ResponseGenerator for CompanionResponder {
    async fn initial_greeting(&self, request: GreetingRequest) -> Result<Value, AgentError> {
        info!("[{}] COMPANION: greeting ({})", request.user_id, request.namespace);

        let history = self
            .load_history(&request.namespace, &request.collection, &request.user_id, 0, HistoryScope::All)
            .await?;
        let instruction = GREETING_INSTRUCTION.replace("{timestamp}", &request.timestamp);

        let greeting = self
            .model
            .complete(&request.system_message, &history, &instruction)
            .await?;

        Ok(json!({
            "message": greeting,
            "user_id": request.user_id,
            "timestamp": request.timestamp,
        }))
    }

    async fn agent_response(&self, turn: TurnContext) -> Result<Value, AgentError> {
        info!(
            "[{}] COMPANION: chat {} turn {} (scope {:?})",
            turn.user_id, turn.chat_id, turn.turn_id, turn.scope
        );

        let history = self
            .load_history(&turn.namespace, &turn.collection, &turn.user_id, turn.chat_id, turn.scope)
            .await?;

        let reply = self
            .model
            .complete(&turn.system_message, &history, &turn.prompt)
            .await?;

        self.log
            .append(
                &turn.namespace,
                &turn.collection,
                ChatTurn {
                    user_id: turn.user_id.clone(),
                    chat_id: turn.chat_id,
                    turn_id: turn.turn_id,
                    timestamp: turn.timestamp.clone(),
                    human_message: turn.prompt.clone(),
                    ai_message: reply.clone(),
                },
            )
            .await?;

        Ok(json!({
            "message": reply,
            "user_id": turn.user_id,
            "chat_id": turn.chat_id,
            "turn_id": turn.turn_id,
            "timestamp": turn.timestamp,
        }))
    }
}
