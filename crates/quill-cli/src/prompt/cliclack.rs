use std::io::{self, Write};

use anyhow::Result;
use bat::WrappingMode;
use cliclack::{input, spinner};
use console::style;
use quill::models::message::Message;

use super::{Input, InputType, Prompt, Theme};

pub struct CliclackPrompt {
    spinner: Option<cliclack::ProgressBar>,
    input_mode: InputMode,
    theme: Theme,
}

enum InputMode {
    Singleline,
    Multiline,
}

impl CliclackPrompt {
    pub fn new() -> Self {
        CliclackPrompt {
            spinner: None,
            input_mode: InputMode::Singleline,
            theme: Theme::Dark,
        }
    }
}

impl Default for CliclackPrompt {
    fn default() -> Self {
        Self::new()
    }
}

/// Print `content` highlighted as `language`, falling back to plain output
pub fn print(content: &str, theme: &str, language: &str) {
    let printed = bat::PrettyPrinter::new()
        .input(bat::Input::from_bytes(content.as_bytes()))
        .theme(theme)
        .language(language)
        .wrapping_mode(WrappingMode::Character)
        .print();
    if let Err(e) = printed {
        tracing::debug!(error = %e, "bat could not print, using plain output");
        println!("{}", content);
    }
}

fn print_newline() {
    println!();
}

fn print_help() {
    println!("Commands:");
    println!("/exit - Exit the session");
    println!("/copy - Copy the last reply to the clipboard as plain text");
    println!("/html - Show the last reply as rendered HTML");
    println!("/m - Switch to multiline input mode");
    println!("/s - Switch to singleline input mode");
    println!("/t - Toggle Light/Dark theme");
    println!("/? - Display this help message");
}

impl Prompt for CliclackPrompt {
    fn render(&mut self, message: &Message) {
        let label = if message.is_user() {
            style("you").cyan().bold()
        } else {
            style("quill").green().bold()
        };
        println!("{}", label);
        print(&message.text, self.theme.bat_theme(), "Markdown");
        print_newline();
        let _ = io::stdout().flush();
    }

    fn render_markup(&mut self, markup: &str) {
        print(markup, self.theme.bat_theme(), "HTML");
        print_newline();
    }

    fn notify(&mut self, text: &str) {
        println!("{}", style(text).dim());
    }

    fn show_busy(&mut self) {
        let spin = spinner();
        spin.start("awaiting reply");
        self.spinner = Some(spin);
    }

    fn hide_busy(&mut self) {
        if let Some(spin) = self.spinner.take() {
            spin.stop("");
        }
    }

    fn get_input(&mut self) -> Result<Input> {
        let mut input = input("Quill: ✎         [Help: /?]").placeholder("");
        if let InputMode::Multiline = self.input_mode {
            input = input.multiline();
        }
        let message_text: String = input.interact()?;
        let message_text = message_text.trim();

        if message_text.eq_ignore_ascii_case("/exit") || message_text.eq_ignore_ascii_case("/quit")
        {
            Ok(Input::command(InputType::Exit))
        } else if message_text.eq_ignore_ascii_case("/copy") {
            Ok(Input::command(InputType::Copy))
        } else if message_text.eq_ignore_ascii_case("/html") {
            Ok(Input::command(InputType::ShowHtml))
        } else if message_text.eq_ignore_ascii_case("/m") {
            self.input_mode = InputMode::Multiline;
            Ok(Input::command(InputType::AskAgain))
        } else if message_text.eq_ignore_ascii_case("/s") {
            self.input_mode = InputMode::Singleline;
            Ok(Input::command(InputType::AskAgain))
        } else if message_text.eq_ignore_ascii_case("/t") {
            self.theme = match self.theme {
                Theme::Light => {
                    println!("Switching to Dark theme");
                    Theme::Dark
                }
                Theme::Dark => {
                    println!("Switching to Light theme");
                    Theme::Light
                }
            };
            Ok(Input::command(InputType::AskAgain))
        } else if message_text.eq_ignore_ascii_case("/?") {
            print_help();
            Ok(Input::command(InputType::AskAgain))
        } else {
            Ok(Input::message(message_text))
        }
    }

    fn close(&self) {
        // No cleanup required
    }

    #[cfg(test)]
    fn as_any(&self) -> &dyn std::any::Any {
        self
    }
}
