//! Chat turns — one entry per message in the conversation log.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{Error, Result, error::MESSAGE_REQUIRED};

/// Who authored a chat turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
  User,
  Assistant,
}

/// A single message in the chat log. Immutable once appended.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatTurn {
  pub role:      Role,
  pub text:      String,
  pub timestamp: DateTime<Utc>,
}

impl ChatTurn {
  pub fn user(text: impl Into<String>) -> Self {
    Self {
      role:      Role::User,
      text:      text.into(),
      timestamp: Utc::now(),
    }
  }

  pub fn assistant(text: impl Into<String>) -> Self {
    Self {
      role:      Role::Assistant,
      text:      text.into(),
      timestamp: Utc::now(),
    }
  }
}

/// Validate a submitted chat message, rejecting absent or blank text.
pub fn user_message(raw: Option<String>) -> Result<String> {
  raw
    .filter(|m| !m.trim().is_empty())
    .ok_or(Error::MissingRequiredField(MESSAGE_REQUIRED))
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn blank_message_is_missing() {
    assert_eq!(
      user_message(Some("\n".into())),
      Err(Error::MissingRequiredField(MESSAGE_REQUIRED)),
    );
    assert_eq!(user_message(None).unwrap_err().to_string(), "Message is required");
    assert_eq!(user_message(Some("hi".into())).unwrap(), "hi");
  }

  #[test]
  fn roles_serialise_lowercase() {
    let json = serde_json::to_value(ChatTurn::assistant("ok")).unwrap();
    assert_eq!(json["role"], "assistant");
  }
}
