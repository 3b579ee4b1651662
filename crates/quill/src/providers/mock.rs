use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use super::base::{ChatSession, Provider};
use super::configs::GenerationConfig;
use crate::errors::ProviderResult;
use crate::models::message::Message;

/// A mock provider that returns pre-configured replies for testing.
///
/// Replies are consumed in order by both `generate` and `send_message`; once
/// they run out every call answers with an empty string.
#[derive(Clone, Default)]
pub struct MockProvider {
    replies: Arc<Mutex<VecDeque<ProviderResult<String>>>>,
    started_with: Arc<Mutex<Vec<GenerationConfig>>>,
    sent: Arc<Mutex<Vec<String>>>,
}

impl MockProvider {
    pub fn new(replies: Vec<ProviderResult<String>>) -> Self {
        Self {
            replies: Arc::new(Mutex::new(replies.into())),
            ..Default::default()
        }
    }

    /// Configs passed to `start_chat`, in call order
    pub fn started_with(&self) -> Vec<GenerationConfig> {
        self.started_with.lock().unwrap().clone()
    }

    /// Every prompt or chat turn the provider was asked to answer
    pub fn sent(&self) -> Vec<String> {
        self.sent.lock().unwrap().clone()
    }

    fn next_reply(&self, text: &str) -> ProviderResult<String> {
        self.sent.lock().unwrap().push(text.to_string());
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(String::new()))
    }
}

#[async_trait]
impl Provider for MockProvider {
    async fn generate(&self, prompt: &str) -> ProviderResult<String> {
        self.next_reply(prompt)
    }

    async fn start_chat(&self, config: GenerationConfig) -> ProviderResult<ChatSession> {
        self.started_with.lock().unwrap().push(config);
        config.validate()?;
        Ok(ChatSession::new(config))
    }

    async fn send_message(&self, chat: &mut ChatSession, text: &str) -> ProviderResult<String> {
        let reply = self.next_reply(text)?;
        chat.record_exchange(Message::user(text), Message::model(reply.clone()));
        Ok(reply)
    }
}
