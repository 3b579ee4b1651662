use serde_json::{json, Value};

use super::configs::GenerationConfig;
use crate::errors::{ProviderError, ProviderResult};
use crate::models::message::Message;

/// Convert internal Messages to Gemini's `contents` array
pub fn messages_to_gemini_spec(messages: &[Message]) -> Vec<Value> {
    messages
        .iter()
        .filter(|message| !message.text.is_empty())
        .map(|message| {
            json!({
                "role": message.role.to_string(),
                "parts": [{ "text": message.text }]
            })
        })
        .collect()
}

/// Build a generateContent payload, with sampling parameters when given
pub fn build_payload(contents: Vec<Value>, config: Option<&GenerationConfig>) -> Value {
    let mut payload = json!({ "contents": contents });
    if let Some(config) = config {
        payload["generationConfig"] = json!(config);
    }
    payload
}

/// Pull the reply text out of a generateContent response.
///
/// The text of every part of the first candidate is joined. A response without
/// candidates was blocked or empty; the block reason is reported when present.
pub fn gemini_response_to_text(response: &Value) -> ProviderResult<String> {
    let Some(candidate) = response
        .get("candidates")
        .and_then(|c| c.as_array())
        .and_then(|c| c.first())
    else {
        let reason = response["promptFeedback"]["blockReason"]
            .as_str()
            .unwrap_or("no candidates returned")
            .to_string();
        return Err(ProviderError::EmptyResponse(reason));
    };

    let parts = candidate["content"]["parts"]
        .as_array()
        .map(|parts| {
            parts
                .iter()
                .filter_map(|part| part.get("text").and_then(|t| t.as_str()))
                .collect::<Vec<_>>()
        })
        .unwrap_or_default();

    if parts.is_empty() {
        let reason = candidate["finishReason"]
            .as_str()
            .unwrap_or("candidate had no text")
            .to_string();
        return Err(ProviderError::EmptyResponse(reason));
    }

    Ok(parts.concat())
}

/// Best effort extraction of `error.message` from an error body
pub fn gemini_error_message(body: &str) -> String {
    serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|value| {
            value["error"]["message"]
                .as_str()
                .map(|message| message.to_string())
        })
        .unwrap_or_else(|| body.trim().to_string())
}
