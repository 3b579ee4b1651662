use anyhow::Result;
use quill::conversation::Conversation;
use quill::providers::gemini::GeminiProvider;
use quill::session::SessionManager;

use crate::clipboard::SystemClipboard;
use crate::configuration::Settings;
use crate::prompt::cliclack::CliclackPrompt;
use crate::session::Session;

pub async fn execute(settings: &Settings) -> Result<()> {
    let provider = GeminiProvider::new(settings.provider_config()?)?;
    let manager = SessionManager::new(provider).with_priming(settings.chat.priming_prompt());

    let mut session = Session::new(
        Conversation::new(manager),
        Box::new(CliclackPrompt::new()),
        Box::new(SystemClipboard),
    );
    session.start().await
}
