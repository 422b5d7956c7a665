//! Conversation models

use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Role of a message author
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    System,
    User,
    Assistant,
}

impl MessageRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            MessageRole::System => "system",
            MessageRole::User => "user",
            MessageRole::Assistant => "assistant",
        }
    }

    /// Numeric role code used by the conversation table
    pub fn db_code(&self) -> i16 {
        match self {
            MessageRole::System => 0,
            MessageRole::User => 1,
            MessageRole::Assistant => 2,
        }
    }

    pub fn from_db_code(code: i16) -> Self {
        match code {
            1 => MessageRole::User,
            2 => MessageRole::Assistant,
            _ => MessageRole::System,
        }
    }
}

/// A single in-memory conversation message
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: MessageRole,
    pub content: String,
}

impl ChatMessage {
    pub fn user(content: impl Into<String>) -> Self {
        Self { role: MessageRole::User, content: content.into() }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self { role: MessageRole::Assistant, content: content.into() }
    }

    pub fn system(content: impl Into<String>) -> Self {
        Self { role: MessageRole::System, content: content.into() }
    }
}

/// A persisted conversation turn
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ConversationTurn {
    pub id: i64,
    pub user_id: i64,
    pub role: i16,
    pub content: String,
    pub intent: Option<String>,
    pub session_id: Option<String>,
    pub metadata: Option<serde_json::Value>,
    pub created_at: DateTime<Utc>,
}

impl ConversationTurn {
    pub fn role_label(&self) -> &'static str {
        MessageRole::from_db_code(self.role).as_str()
    }
}

/// Request to append a turn to the conversation log
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateTurnRequest {
    pub user_id: i64,
    pub role: MessageRole,
    pub content: String,
    pub intent: Option<String>,
    pub session_id: Option<String>,
    pub metadata: Option<serde_json::Value>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_codes_round_trip() {
        assert_eq!(MessageRole::from_db_code(MessageRole::User.db_code()), MessageRole::User);
        assert_eq!(MessageRole::from_db_code(MessageRole::Assistant.db_code()), MessageRole::Assistant);
    }

    #[test]
    fn test_role_serializes_lowercase() {
        let message = ChatMessage::user("hello");
        let json = serde_json::to_value(&message).unwrap();
        assert_eq!(json["role"], "user");
        assert_eq!(json["content"], "hello");
    }
}
