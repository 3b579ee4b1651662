use super::role::Role;
use chrono::Utc;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
/// A single turn of a conversation, to or from the model
pub struct Message {
    pub role: Role,
    pub created: i64,
    pub text: String,
}

impl Message {
    /// Create a new user message with the current timestamp
    pub fn user<S: Into<String>>(text: S) -> Self {
        Message {
            role: Role::User,
            created: Utc::now().timestamp(),
            text: text.into(),
        }
    }

    /// Create a new model message with the current timestamp
    pub fn model<S: Into<String>>(text: S) -> Self {
        Message {
            role: Role::Model,
            created: Utc::now().timestamp(),
            text: text.into(),
        }
    }

    pub fn is_user(&self) -> bool {
        self.role == Role::User
    }
}
