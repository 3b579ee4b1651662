use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde_json::Value;
use std::time::Duration;

use super::base::{ChatSession, Provider};
use super::configs::GeminiProviderConfig;
use super::utils::{
    build_payload, gemini_error_message, gemini_response_to_text, messages_to_gemini_spec,
};
use crate::errors::{ProviderError, ProviderResult};
use crate::models::message::Message;

pub struct GeminiProvider {
    client: Client,
    config: GeminiProviderConfig,
}

impl GeminiProvider {
    pub fn new(config: GeminiProviderConfig) -> ProviderResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(600)) // 10 minutes timeout
            .build()?;

        Ok(Self { client, config })
    }

    pub fn model(&self) -> &str {
        &self.config.model
    }

    async fn post(&self, payload: Value) -> ProviderResult<Value> {
        let url = format!(
            "{}/v1beta/models/{}:generateContent",
            self.config.host.trim_end_matches('/'),
            self.model()
        );
        tracing::debug!(model = %self.model(), "posting generateContent request");

        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", &self.config.api_key)
            .json(&payload)
            .send()
            .await?;

        match response.status() {
            StatusCode::OK => Ok(response.json().await?),
            status => {
                let body = response.text().await.unwrap_or_default();
                let message = gemini_error_message(&body);
                tracing::warn!(status = status.as_u16(), %message, "Gemini request failed");
                Err(ProviderError::Api {
                    status: status.as_u16(),
                    message,
                })
            }
        }
    }
}

#[async_trait]
impl Provider for GeminiProvider {
    async fn generate(&self, prompt: &str) -> ProviderResult<String> {
        let contents = messages_to_gemini_spec(&[Message::user(prompt)]);
        let response = self.post(build_payload(contents, None)).await?;
        gemini_response_to_text(&response)
    }

    async fn send_message(&self, chat: &mut ChatSession, text: &str) -> ProviderResult<String> {
        let user = Message::user(text);

        let mut turns = chat.history().to_vec();
        turns.push(user.clone());
        let payload = build_payload(messages_to_gemini_spec(&turns), Some(chat.config()));

        let response = self.post(payload).await?;
        let reply = gemini_response_to_text(&response)?;

        chat.record_exchange(user, Message::model(reply.clone()));
        Ok(reply)
    }
}
