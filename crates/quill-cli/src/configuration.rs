use crate::error::{to_env_var, ConfigError};
use config::{Config, Environment, File, FileFormat};
use quill::providers::configs::{GeminiProviderConfig, GEMINI_HOST, GEMINI_MODEL};
use quill::session::DEFAULT_PRIMING_PROMPT;
use serde::Deserialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize)]
pub struct ProviderSettings {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default)]
    pub api_key: Option<String>,
    #[serde(default = "default_model")]
    pub model: String,
}

#[derive(Debug, Deserialize)]
pub struct ChatSettings {
    #[serde(default = "default_priming")]
    pub priming: bool,
    #[serde(default)]
    pub priming_prompt: Option<String>,
}

impl Default for ChatSettings {
    fn default() -> Self {
        Self {
            priming: default_priming(),
            priming_prompt: None,
        }
    }
}

impl ChatSettings {
    /// The priming turn to send, or `None` when priming is switched off
    pub fn priming_prompt(&self) -> Option<String> {
        if !self.priming {
            return None;
        }
        Some(
            self.priming_prompt
                .clone()
                .unwrap_or_else(|| DEFAULT_PRIMING_PROMPT.to_string()),
        )
    }
}

#[derive(Debug, Deserialize)]
pub struct Settings {
    pub provider: ProviderSettings,
    #[serde(default)]
    pub chat: ChatSettings,
}

impl Settings {
    pub fn new() -> Result<Self, ConfigError> {
        Self::load(settings_path().as_deref())
    }

    /// Defaults, then the settings file if it exists, then `QUILL_` variables
    pub fn load(file: Option<&Path>) -> Result<Self, ConfigError> {
        let mut builder = Config::builder()
            .set_default("provider.host", default_host())?
            .set_default("provider.model", default_model())?
            .set_default("chat.priming", default_priming())?;

        if let Some(file) = file {
            builder = builder.add_source(
                File::from(file)
                    .format(FileFormat::Toml)
                    .required(false),
            );
        }

        let config = builder
            .add_source(
                Environment::with_prefix("QUILL")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let mut settings: Settings = config.try_deserialize().map_err(|err| {
            tracing::debug!("Configuration error: {:?}", &err);
            ConfigError::Other(err)
        })?;

        // The plain Gemini variable is honoured too.
        if settings.provider.api_key.is_none() {
            settings.provider.api_key = std::env::var("GEMINI_API_KEY").ok();
        }
        Ok(settings)
    }

    pub fn provider_config(&self) -> Result<GeminiProviderConfig, ConfigError> {
        let api_key = self
            .provider
            .api_key
            .clone()
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| ConfigError::MissingEnvVar {
                env_var: to_env_var("provider.api_key"),
            })?;

        Ok(GeminiProviderConfig {
            host: self.provider.host.clone(),
            api_key,
            model: self.provider.model.clone(),
        })
    }
}

/// `~/.config/quill/config.toml`
pub fn settings_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".config").join("quill").join("config.toml"))
}

fn default_host() -> String {
    GEMINI_HOST.to_string()
}

fn default_model() -> String {
    GEMINI_MODEL.to_string()
}

fn default_priming() -> bool {
    true
}
