use tokio::sync::watch;

use crate::errors::{SessionInitError, SubmitError, SEND_ERROR_MESSAGE};
use crate::models::message::Message;
use crate::providers::base::{ChatSession, Provider};
use crate::session::SessionManager;

/// Lifecycle of the request a conversation is waiting on.
///
/// `Idle -> Pending -> Idle`; a failed request returns to `Idle` carrying the
/// error that ended it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RequestState {
    Idle { last_error: Option<String> },
    Pending,
}

impl RequestState {
    pub fn is_pending(&self) -> bool {
        matches!(self, RequestState::Pending)
    }
}

impl Default for RequestState {
    fn default() -> Self {
        RequestState::Idle { last_error: None }
    }
}

/// Everything a chat view needs: the session, the ordered messages and the
/// request state.
pub struct Conversation<P: Provider> {
    manager: SessionManager<P>,
    session: Option<ChatSession>,
    messages: Vec<Message>,
    state: watch::Sender<RequestState>,
}

impl<P: Provider> Conversation<P> {
    pub fn new(manager: SessionManager<P>) -> Self {
        let (state, _) = watch::channel(RequestState::default());
        Self {
            manager,
            session: None,
            messages: Vec::new(),
            state,
        }
    }

    /// Start the chat session, showing the priming reply as the first message.
    /// Does nothing once a session is running.
    pub async fn start(&mut self) -> Result<(), SessionInitError> {
        if self.is_started() {
            return Ok(());
        }
        self.state.send_replace(RequestState::Pending);
        match self.manager.start_session().await {
            Ok(started) => {
                self.session = Some(started.session);
                self.messages.extend(started.greeting);
                self.state.send_replace(RequestState::default());
                Ok(())
            }
            Err(e) => {
                self.state.send_replace(RequestState::Idle {
                    last_error: Some(e.to_string()),
                });
                Err(e)
            }
        }
    }

    /// Send one user message and append the reply.
    ///
    /// A failed turn still produces a reply message: the fixed fallback text.
    /// Returns the text appended as the reply.
    pub async fn submit(&mut self, input: &str) -> Result<&str, SubmitError> {
        let text = input.trim();
        if text.is_empty() {
            return Err(SubmitError::EmptyInput);
        }
        if self.state.borrow().is_pending() {
            return Err(SubmitError::Pending);
        }
        let Some(session) = self.session.as_mut() else {
            return Err(SubmitError::NoSession);
        };

        self.messages.push(Message::user(text));
        self.state.send_replace(RequestState::Pending);

        match self.manager.send_turn(session, text).await {
            Ok(reply) => {
                self.messages.push(Message::model(reply));
                self.state.send_replace(RequestState::default());
            }
            Err(e) => {
                self.messages.push(Message::model(SEND_ERROR_MESSAGE));
                self.state.send_replace(RequestState::Idle {
                    last_error: Some(e.to_string()),
                });
            }
        }

        Ok(self
            .messages
            .last()
            .map(|m| m.text.as_str())
            .unwrap_or_default())
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    /// The most recent message written by the model
    pub fn last_reply(&self) -> Option<&Message> {
        self.messages.iter().rev().find(|m| !m.is_user())
    }

    pub fn is_started(&self) -> bool {
        self.session.is_some()
    }

    pub fn state(&self) -> RequestState {
        self.state.borrow().clone()
    }

    /// Observe state changes, e.g. to drive a busy indicator
    pub fn subscribe(&self) -> watch::Receiver<RequestState> {
        self.state.subscribe()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ProviderError;
    use crate::providers::mock::MockProvider;

    async fn started(replies: Vec<Result<String, ProviderError>>) -> Conversation<MockProvider> {
        let mut conversation = Conversation::new(SessionManager::new(MockProvider::new(replies)));
        conversation.start().await.unwrap();
        conversation
    }

    #[tokio::test]
    async fn test_first_message_comes_from_priming() {
        let mut conversation = started(vec![
            Ok("Hi! I'm Quill.".to_string()),
            Ok("Sure.".to_string()),
        ])
        .await;

        assert_eq!(conversation.messages().len(), 1);
        assert_eq!(conversation.messages()[0].text, "Hi! I'm Quill.");
        assert!(!conversation.messages()[0].is_user());

        conversation.submit("Help me").await.unwrap();
        let texts: Vec<&str> = conversation
            .messages()
            .iter()
            .map(|m| m.text.as_str())
            .collect();
        assert_eq!(texts, vec!["Hi! I'm Quill.", "Help me", "Sure."]);
    }

    #[tokio::test]
    async fn test_failed_turn_shows_fallback_and_recovers() {
        let mut conversation = started(vec![
            Ok("Hello".to_string()),
            Err(ProviderError::Network("timeout".to_string())),
            Ok("Back online.".to_string()),
        ])
        .await;

        let reply = conversation.submit("ping").await.unwrap().to_string();
        assert_eq!(reply, SEND_ERROR_MESSAGE);
        assert!(matches!(
            conversation.state(),
            RequestState::Idle { last_error: Some(_) }
        ));

        let reply = conversation.submit("ping").await.unwrap().to_string();
        assert_eq!(reply, "Back online.");
        assert_eq!(conversation.state(), RequestState::default());
        assert_eq!(conversation.last_reply().unwrap().text, "Back online.");
    }

    #[tokio::test]
    async fn test_start_twice_keeps_first_session() {
        let provider = MockProvider::new(vec![
            Ok("Hi! I'm Quill.".to_string()),
            Ok("Hi again.".to_string()),
        ]);
        let mut conversation = Conversation::new(SessionManager::new(provider.clone()));

        conversation.start().await.unwrap();
        conversation.start().await.unwrap();

        assert_eq!(conversation.messages().len(), 1);
        assert_eq!(conversation.messages()[0].text, "Hi! I'm Quill.");
        assert_eq!(provider.started_with().len(), 1);
        assert_eq!(provider.sent().len(), 1);
    }

    #[tokio::test]
    async fn test_submit_guards() {
        let mut conversation = Conversation::new(SessionManager::new(MockProvider::new(vec![])));
        assert_eq!(
            conversation.submit("hello").await.unwrap_err(),
            SubmitError::NoSession
        );

        conversation.start().await.unwrap();
        assert_eq!(
            conversation.submit("   \n").await.unwrap_err(),
            SubmitError::EmptyInput
        );

        conversation.state.send_replace(RequestState::Pending);
        assert_eq!(
            conversation.submit("hello").await.unwrap_err(),
            SubmitError::Pending
        );
        assert!(conversation.messages().iter().all(|m| m.text != "hello"));
    }

    #[tokio::test]
    async fn test_subscribers_see_state_changes() {
        let mut conversation = started(vec![Ok("Hello".to_string())]).await;
        let mut rx = conversation.subscribe();

        conversation.submit("hi").await.unwrap();
        assert!(rx.has_changed().unwrap());
        assert_eq!(*rx.borrow_and_update(), RequestState::default());
    }

    #[tokio::test]
    async fn test_start_failure_is_reported() {
        let provider = MockProvider::new(vec![Err(ProviderError::Api {
            status: 403,
            message: "denied".to_string(),
        })]);
        let mut conversation = Conversation::new(SessionManager::new(provider));

        assert!(conversation.start().await.is_err());
        assert!(!conversation.is_started());
        assert!(conversation.messages().is_empty());
    }
}
