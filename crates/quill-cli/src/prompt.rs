use anyhow::Result;
use quill::models::message::Message;

pub mod cliclack;

pub trait Prompt {
    /// Show one chat message
    fn render(&mut self, message: &Message);
    /// Show rendered markup as source
    fn render_markup(&mut self, markup: &str);
    /// A status line that is not part of the conversation
    fn notify(&mut self, text: &str);
    fn get_input(&mut self) -> Result<Input>;
    fn show_busy(&mut self);
    fn hide_busy(&mut self);
    fn close(&self);
    fn quill_ready(&self) {
        println!("\n");
        println!("Quill is ready! Say hello, or type /? for the list of commands.");
        println!("\n");
    }
    // Used for testing. Allows us to downcast to any type.
    #[cfg(test)]
    fn as_any(&self) -> &dyn std::any::Any;
}

pub struct Input {
    pub input_type: InputType,
    pub content: Option<String>, // Only set for messages
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputType {
    AskAgain, // Ask the user for input again. Control flow command.
    Message,  // User sent a message
    Copy,     // Copy the last reply as plain text
    ShowHtml, // Print the rendered markup of the last reply
    Exit,     // User wants to exit the session
}

impl Input {
    pub fn command(input_type: InputType) -> Self {
        Input {
            input_type,
            content: None,
        }
    }

    pub fn message<S: Into<String>>(text: S) -> Self {
        Input {
            input_type: InputType::Message,
            content: Some(text.into()),
        }
    }
}

pub enum Theme {
    Light,
    Dark,
}

impl Theme {
    pub fn bat_theme(&self) -> &'static str {
        match self {
            Theme::Light => "GitHub",
            Theme::Dark => "zenburn",
        }
    }
}
