use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use quill::errors::ProviderResult;
use quill::models::message::Message;
use quill::providers::base::{ChatSession, Provider};

/// Scripted replies for the chat loop tests. The library's own mock is only
/// compiled into its unit tests, so this crate keeps a small copy.
#[derive(Clone, Default)]
pub struct MockProvider {
    replies: Arc<Mutex<VecDeque<ProviderResult<String>>>>,
}

impl MockProvider {
    pub fn new(replies: Vec<ProviderResult<String>>) -> Self {
        Self {
            replies: Arc::new(Mutex::new(replies.into())),
        }
    }

    fn next_reply(&self) -> ProviderResult<String> {
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(String::new()))
    }
}

#[async_trait]
impl Provider for MockProvider {
    async fn generate(&self, _prompt: &str) -> ProviderResult<String> {
        self.next_reply()
    }

    async fn send_message(&self, chat: &mut ChatSession, text: &str) -> ProviderResult<String> {
        let reply = self.next_reply()?;
        chat.record_exchange(Message::user(text), Message::model(reply.clone()));
        Ok(reply)
    }
}
