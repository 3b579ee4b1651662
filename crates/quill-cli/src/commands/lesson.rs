use std::fs;
use std::path::Path;

use anyhow::{bail, Context, Result};
use cliclack::spinner;
use quill::errors::GenerationError;
use quill::generators::{Generator, LessonLevel, LESSON_ERROR_MESSAGE};
use quill::providers::gemini::GeminiProvider;
use quill::session::SessionManager;

use crate::configuration::Settings;

pub async fn execute(
    settings: &Settings,
    topic: &str,
    level: Option<LessonLevel>,
    output: Option<&Path>,
) -> Result<()> {
    let provider = GeminiProvider::new(settings.provider_config()?)?;
    let manager = SessionManager::new(provider);
    let generator = Generator::new(&manager);

    let spin = spinner();
    spin.start("preparing the lesson");
    let lesson = generator.lesson(topic, level).await;
    spin.stop("");

    let lesson = match lesson {
        Ok(lesson) => lesson,
        Err(e @ GenerationError::EmptyInput(_)) => bail!(e),
        Err(e) => {
            eprintln!("{}", LESSON_ERROR_MESSAGE);
            bail!(e)
        }
    };

    match output {
        Some(path) => {
            fs::write(path, &lesson)
                .with_context(|| format!("could not write lesson to {}", path.display()))?;
            println!("Lesson written to {}", path.display());
        }
        None => println!("{}", lesson),
    }
    Ok(())
}
