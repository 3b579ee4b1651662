use anyhow::Result;

use crate::clipboard::{copy_or_log, Clipboard};
use crate::prompt::{InputType, Prompt};

use quill::conversation::Conversation;
use quill::errors::SubmitError;
use quill::providers::base::Provider;
use quill::render::{render, to_clean_text, RenderMode};

#[cfg(test)]
mod mock_provider;

/// The interactive chat loop: reads input from a [`Prompt`] and drives a
/// [`Conversation`].
pub struct Session<'a, P: Provider> {
    conversation: Conversation<P>,
    prompt: Box<dyn Prompt + 'a>,
    clipboard: Box<dyn Clipboard + 'a>,
}

impl<'a, P: Provider> Session<'a, P> {
    pub fn new(
        conversation: Conversation<P>,
        prompt: Box<dyn Prompt + 'a>,
        clipboard: Box<dyn Clipboard + 'a>,
    ) -> Self {
        Session {
            conversation,
            prompt,
            clipboard,
        }
    }

    pub async fn start(&mut self) -> Result<()> {
        self.prompt.quill_ready();
        self.open_conversation().await;

        loop {
            let input = self.prompt.get_input()?;
            match input.input_type {
                InputType::Message => {
                    if let Some(content) = input.content {
                        self.send(&content).await;
                    }
                }
                InputType::Copy => self.copy_last_reply(),
                InputType::ShowHtml => self.show_last_reply_html(),
                InputType::Exit => break,
                InputType::AskAgain => continue,
            }
        }
        self.prompt.close();
        Ok(())
    }

    /// Start the chat session and show the greeting. Returns whether a
    /// session is available.
    async fn open_conversation(&mut self) -> bool {
        if self.conversation.is_started() {
            return true;
        }
        self.prompt.show_busy();
        let started = self.conversation.start().await;
        self.prompt.hide_busy();

        match started {
            Ok(()) => {
                if let Some(greeting) = self.conversation.last_reply() {
                    self.prompt.render(greeting);
                }
                true
            }
            Err(e) => {
                tracing::warn!(error = %e, "chat session did not start");
                self.prompt.notify(e.user_message());
                false
            }
        }
    }

    async fn send(&mut self, content: &str) {
        if !self.open_conversation().await {
            return;
        }

        self.prompt.show_busy();
        let submitted = self.conversation.submit(content).await.map(|_| ());
        self.prompt.hide_busy();

        match submitted {
            Ok(()) => {
                if let Some(reply) = self.conversation.last_reply() {
                    self.prompt.render(reply);
                }
            }
            Err(SubmitError::EmptyInput) => {}
            Err(e) => self.prompt.notify(&e.to_string()),
        }
    }

    fn copy_last_reply(&mut self) {
        let Some(reply) = self.conversation.last_reply() else {
            self.prompt.notify("Nothing to copy yet.");
            return;
        };
        let text = to_clean_text(&reply.text);
        if copy_or_log(self.clipboard.as_mut(), &text) {
            self.prompt.notify("Copied the last reply to the clipboard.");
        } else {
            self.prompt.notify("Could not access the clipboard.");
        }
    }

    fn show_last_reply_html(&mut self) {
        match self.conversation.last_reply() {
            Some(reply) => {
                let markup = render(&reply.text, RenderMode::dialogue());
                self.prompt.render_markup(&markup);
            }
            None => self.prompt.notify("Nothing to show yet."),
        }
    }
}
