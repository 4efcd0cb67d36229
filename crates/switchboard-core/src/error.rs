//! Error types for `switchboard-core`.

use thiserror::Error;

pub const MESSAGE_REQUIRED: &str = "Message is required";
pub const SYNC_CREDENTIALS_REQUIRED: &str = "Endpoint and API key required";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum Error {
  /// A required request field was absent or empty. The payload is the
  /// message surfaced to the caller verbatim.
  #[error("{0}")]
  MissingRequiredField(&'static str),

  #[error("invalid value for {field}: {value}")]
  InvalidConfigValue {
    field: &'static str,
    value: String,
  },

  #[error("social post not found: {0}")]
  PostNotFound(u64),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
