use async_trait::async_trait;
use uuid::Uuid;

use super::configs::GenerationConfig;
use crate::errors::ProviderResult;
use crate::models::message::Message;

/// A multi-turn conversation with the model.
///
/// The model API itself is stateless, so the session carries the turn history
/// and resends it on every call. Only completed exchanges are recorded: a
/// failed send leaves the history untouched.
#[derive(Debug, Clone)]
pub struct ChatSession {
    id: String,
    config: GenerationConfig,
    history: Vec<Message>,
}

impl ChatSession {
    pub fn new(config: GenerationConfig) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            config,
            history: Vec::new(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn config(&self) -> &GenerationConfig {
        &self.config
    }

    /// Completed turns, oldest first. For provider implementations.
    pub fn history(&self) -> &[Message] {
        &self.history
    }

    pub fn len(&self) -> usize {
        self.history.len()
    }

    pub fn is_empty(&self) -> bool {
        self.history.is_empty()
    }

    /// Append a user turn and the model's reply to it
    pub fn record_exchange(&mut self, user: Message, reply: Message) {
        self.history.push(user);
        self.history.push(reply);
    }
}

/// Base trait for text generation backends
#[async_trait]
pub trait Provider: Send + Sync {
    /// Stateless one-shot generation
    async fn generate(&self, prompt: &str) -> ProviderResult<String>;

    /// Open a conversation that will sample with `config`
    async fn start_chat(&self, config: GenerationConfig) -> ProviderResult<ChatSession> {
        config.validate()?;
        Ok(ChatSession::new(config))
    }

    /// Send `text` as the next user turn of `chat` and return the model's reply
    async fn send_message(&self, chat: &mut ChatSession, text: &str) -> ProviderResult<String>;
}
