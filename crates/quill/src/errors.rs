use thiserror::Error;

/// Shown in place of a reply when a chat turn fails.
pub const SEND_ERROR_MESSAGE: &str = "Sorry, I encountered an error. Please try again.";

/// Shown when a chat session could not be started.
pub const SESSION_INIT_ERROR_MESSAGE: &str =
    "Sorry, the chat could not be started. Please try again.";

#[non_exhaustive]
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ProviderError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("Invalid generation config: {0}")]
    InvalidConfig(String),

    #[error("Empty response: {0}")]
    EmptyResponse(String),

    #[error("Could not decode response: {0}")]
    Decode(String),
}

impl From<reqwest::Error> for ProviderError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            ProviderError::Decode(err.to_string())
        } else {
            ProviderError::Network(err.to_string())
        }
    }
}

pub type ProviderResult<T> = Result<T, ProviderError>;

#[derive(Error, Debug, Clone, PartialEq)]
#[error("Failed to start chat session: {0}")]
pub struct SessionInitError(#[from] pub ProviderError);

impl SessionInitError {
    pub fn user_message(&self) -> &'static str {
        SESSION_INIT_ERROR_MESSAGE
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
#[error("Failed to send message: {0}")]
pub struct SendError(#[from] pub ProviderError);

impl SendError {
    pub fn user_message(&self) -> &'static str {
        SEND_ERROR_MESSAGE
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum GenerationError {
    #[error("Nothing to generate from: {0} is empty")]
    EmptyInput(&'static str),

    #[error("Generation failed: {0}")]
    Provider(#[from] ProviderError),

    #[error("Could not build prompt: {0}")]
    Template(String),
}

/// Reasons the conversation refuses a submission before anything is sent.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitError {
    #[error("Message is empty")]
    EmptyInput,

    #[error("No chat session has been started")]
    NoSession,

    #[error("A reply is still pending")]
    Pending,
}
