use anyhow::{bail, Result};
use cliclack::spinner;
use quill::errors::GenerationError;
use quill::generators::{Generator, StoryLength, STORY_ERROR_MESSAGE};
use quill::providers::gemini::GeminiProvider;
use quill::render::{render, RenderMode};
use quill::session::SessionManager;

use crate::configuration::Settings;
use crate::prompt::cliclack::print;

pub async fn execute(settings: &Settings, idea: &str, length: StoryLength, html: bool) -> Result<()> {
    let provider = GeminiProvider::new(settings.provider_config()?)?;
    let manager = SessionManager::new(provider);
    let generator = Generator::new(&manager);

    let spin = spinner();
    spin.start(format!("writing a {} story ({})", length, length.description()));
    let story = generator.story(idea, length).await;
    spin.stop("");

    match story {
        Ok(story) if html => println!("{}", render(&story, RenderMode::prose())),
        Ok(story) => print(&story, "zenburn", "Markdown"),
        Err(e @ GenerationError::EmptyInput(_)) => bail!(e),
        Err(e) => {
            eprintln!("{}", STORY_ERROR_MESSAGE);
            bail!(e)
        }
    }
    Ok(())
}
