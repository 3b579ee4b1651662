use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use quill::generators::{LessonLevel, StoryLength};
use tracing_subscriber::EnvFilter;

mod clipboard;
mod commands {
    pub mod chat;
    pub mod lesson;
    pub mod story;
    pub mod version;
}
mod configuration;
mod error;
mod prompt;
mod session;

use commands::{chat, lesson, story, version};
use configuration::Settings;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Gemini API key (can also be set via QUILL_PROVIDER__API_KEY or GEMINI_API_KEY)
    #[arg(long, global = true)]
    api_key: Option<String>,

    /// Model to use
    #[arg(short, long, global = true)]
    model: Option<String>,

    /// Generative Language API host
    #[arg(long, global = true)]
    host: Option<String>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Chat with Quill
    Chat,

    /// Write a story from an idea
    Story {
        /// What the story should be about
        idea: String,

        /// short (100-150 words) or long (20-30 lines)
        #[arg(short, long, default_value_t = StoryLength::Short)]
        length: StoryLength,

        /// Print the story as HTML instead of formatted text
        #[arg(long)]
        html: bool,
    },

    /// Generate an HTML lesson on a topic
    Lesson {
        /// Topic of the lesson
        topic: String,

        /// beginner, intermediate or advanced
        #[arg(short, long)]
        level: Option<LessonLevel>,

        /// Write the lesson to this file instead of stdout
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },

    /// Print the version
    Version,
}

impl Cli {
    fn settings(&self) -> Result<Settings> {
        let mut settings = Settings::new()?;
        if let Some(api_key) = &self.api_key {
            settings.provider.api_key = Some(api_key.clone());
        }
        if let Some(model) = &self.model {
            settings.provider.model = model.clone();
        }
        if let Some(host) = &self.host {
            settings.provider.host = host.clone();
        }
        Ok(settings)
    }
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    init_logging();
    let cli = Cli::parse();

    match &cli.command {
        Some(Command::Version) => version::execute().await,
        Some(Command::Story { idea, length, html }) => {
            story::execute(&cli.settings()?, idea, *length, *html).await
        }
        Some(Command::Lesson {
            topic,
            level,
            output,
        }) => lesson::execute(&cli.settings()?, topic, *level, output.as_deref()).await,
        Some(Command::Chat) | None => chat::execute(&cli.settings()?).await,
    }
}
