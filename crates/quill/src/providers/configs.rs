use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};
use std::env;

use crate::errors::{ProviderError, ProviderResult};

pub const GEMINI_HOST: &str = "https://generativelanguage.googleapis.com";
pub const GEMINI_MODEL: &str = "gemini-1.5-flash";

#[derive(Debug, Clone)]
pub struct GeminiProviderConfig {
    pub host: String,
    pub api_key: String,
    pub model: String,
}

impl GeminiProviderConfig {
    pub fn new<S: Into<String>>(api_key: S) -> Self {
        Self {
            host: GEMINI_HOST.to_string(),
            api_key: api_key.into(),
            model: GEMINI_MODEL.to_string(),
        }
    }

    /// Load configuration from `GEMINI_API_KEY`, `GEMINI_HOST` and `GEMINI_MODEL`
    pub fn from_env() -> Result<Self> {
        let api_key = get_env("GEMINI_API_KEY", true, None)?
            .ok_or_else(|| anyhow!("Gemini API key must be set"))?;
        let host = get_env("GEMINI_HOST", false, Some(GEMINI_HOST.to_string()))?
            .unwrap_or_else(|| GEMINI_HOST.to_string());
        let model = get_env("GEMINI_MODEL", false, Some(GEMINI_MODEL.to_string()))?
            .unwrap_or_else(|| GEMINI_MODEL.to_string());

        Ok(Self {
            host,
            api_key,
            model,
        })
    }
}

fn get_env(key: &str, required: bool, default: Option<String>) -> Result<Option<String>> {
    match env::var(key) {
        Ok(value) => Ok(Some(value)),
        Err(env::VarError::NotPresent) if !required => Ok(default),
        Err(env::VarError::NotPresent) => Err(anyhow!(
            "Environment variable '{}' is required but not set.",
            key
        )),
        Err(e) => Err(e.into()),
    }
}

/// Sampling parameters sent with every chat turn
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationConfig {
    pub temperature: f32,
    pub top_k: u32,
    pub top_p: f32,
    pub max_output_tokens: u32,
}

impl GenerationConfig {
    /// The fixed configuration every chat session is started with
    pub const fn chat() -> Self {
        Self {
            temperature: 0.9,
            top_k: 1,
            top_p: 1.0,
            max_output_tokens: 2048,
        }
    }

    pub fn validate(&self) -> ProviderResult<()> {
        if !(0.0..=2.0).contains(&self.temperature) {
            return Err(ProviderError::InvalidConfig(format!(
                "temperature must be between 0 and 2, got {}",
                self.temperature
            )));
        }
        if !(0.0..=1.0).contains(&self.top_p) {
            return Err(ProviderError::InvalidConfig(format!(
                "topP must be between 0 and 1, got {}",
                self.top_p
            )));
        }
        if self.top_k == 0 {
            return Err(ProviderError::InvalidConfig(
                "topK must be at least 1".to_string(),
            ));
        }
        if self.max_output_tokens == 0 {
            return Err(ProviderError::InvalidConfig(
                "maxOutputTokens must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self::chat()
    }
}
