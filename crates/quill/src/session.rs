//! Request plumbing between the view and a [`Provider`].
//!
//! [`SessionManager`] starts chat sessions with the fixed chat sampling
//! configuration, sends turns in order and runs one-shot generations. Every
//! provider failure is converted into the error kind of the operation that hit
//! it, so callers never see a raw [`ProviderError`](crate::errors::ProviderError).

use crate::errors::{GenerationError, SendError, SessionInitError};
use crate::models::message::Message;
use crate::providers::base::{ChatSession, Provider};
use crate::providers::configs::GenerationConfig;

/// First turn sent to every new chat, so the model knows who it is speaking for.
pub const DEFAULT_PRIMING_PROMPT: &str = "Hello! If someone asks you who you are or who made \
you, tell them you are Quill, the writing assistant of this app, and introduce yourself briefly.";

/// A freshly started chat and the reply to its priming turn, if one was sent
#[derive(Debug)]
pub struct StartedSession {
    pub session: ChatSession,
    pub greeting: Option<Message>,
}

pub struct SessionManager<P: Provider> {
    provider: P,
    priming_prompt: Option<String>,
}

impl<P: Provider> SessionManager<P> {
    pub fn new(provider: P) -> Self {
        Self {
            provider,
            priming_prompt: Some(DEFAULT_PRIMING_PROMPT.to_string()),
        }
    }

    /// Replace the priming prompt; `None` starts sessions silently
    pub fn with_priming(mut self, prompt: Option<String>) -> Self {
        self.priming_prompt = prompt.filter(|p| !p.trim().is_empty());
        self
    }

    pub async fn start_session(&self) -> Result<StartedSession, SessionInitError> {
        let mut session = self
            .provider
            .start_chat(GenerationConfig::chat())
            .await
            .map_err(|e| {
                tracing::warn!(error = %e, "chat session was rejected");
                SessionInitError(e)
            })?;
        tracing::debug!(session = session.id(), "chat session started");

        let greeting = match &self.priming_prompt {
            Some(prompt) => {
                let reply = self
                    .provider
                    .send_message(&mut session, prompt)
                    .await
                    .map_err(|e| {
                        tracing::warn!(error = %e, "priming turn failed");
                        SessionInitError(e)
                    })?;
                Some(Message::model(reply))
            }
            None => None,
        };

        Ok(StartedSession { session, greeting })
    }

    pub async fn send_turn(
        &self,
        session: &mut ChatSession,
        user_text: &str,
    ) -> Result<String, SendError> {
        self.provider
            .send_message(session, user_text)
            .await
            .map_err(|e| {
                tracing::warn!(session = session.id(), error = %e, "chat turn failed");
                SendError(e)
            })
    }

    pub async fn generate_once(&self, prompt: &str) -> Result<String, GenerationError> {
        self.provider.generate(prompt).await.map_err(|e| {
            tracing::warn!(error = %e, "one-shot generation failed");
            GenerationError::Provider(e)
        })
    }
}
