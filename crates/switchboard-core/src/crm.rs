//! The CRM log — an append-only audit trail of notable dashboard actions.
//!
//! Despite the name, nothing here talks to a real CRM; the log only records
//! what the operator did.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{Error, Result, error::SYNC_CREDENTIALS_REQUIRED};

pub const HANDOFF: &str = "Chat handed off to human agent";
pub const MANUAL_SYNC: &str = "Manual CRM sync completed";
pub const TRAINING_UPDATED: &str = "AI training model updated";
pub const CONFIG_SAVED: &str = "AI configuration saved";
pub const ANALYTICS_REFRESHED: &str = "Analytics refreshed";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CrmEvent {
  pub text:      String,
  pub timestamp: DateTime<Utc>,
}

impl CrmEvent {
  pub fn new(text: impl Into<String>) -> Self {
    Self {
      text:      text.into(),
      timestamp: Utc::now(),
    }
  }

  pub fn post_scheduled(platform: &str) -> Self {
    Self::new(format!("Social post scheduled for {platform}"))
  }

  pub fn auto_posted(post_id: u64, platform: &str) -> Self {
    Self::new(format!("Auto-post #{post_id} published to {platform}"))
  }
}

/// Where a manual CRM sync would push to. The sync itself is simulated;
/// the credentials are validated and then dropped.
#[derive(Clone, PartialEq, Eq)]
pub struct SyncTarget {
  pub endpoint: String,
  pub api_key:  String,
}

impl SyncTarget {
  /// Both fields must be present and non-blank.
  pub fn new(endpoint: Option<String>, api_key: Option<String>) -> Result<Self> {
    let non_blank = |s: Option<String>| s.filter(|s| !s.trim().is_empty());
    match (non_blank(endpoint), non_blank(api_key)) {
      (Some(endpoint), Some(api_key)) => Ok(Self { endpoint, api_key }),
      _ => Err(Error::MissingRequiredField(SYNC_CREDENTIALS_REQUIRED)),
    }
  }
}

impl fmt::Debug for SyncTarget {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("SyncTarget")
      .field("endpoint", &self.endpoint)
      .field("api_key", &"<redacted>")
      .finish()
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn sync_needs_both_fields() {
    let missing = Err(Error::MissingRequiredField(SYNC_CREDENTIALS_REQUIRED));
    assert_eq!(SyncTarget::new(Some("https://crm".into()), None), missing);
    assert_eq!(SyncTarget::new(None, Some("k".into())), missing);
    assert_eq!(SyncTarget::new(Some("".into()), Some("k".into())), missing);
    assert!(SyncTarget::new(Some("https://crm".into()), Some("k".into())).is_ok());
  }

  #[test]
  fn debug_hides_api_key() {
    let target = SyncTarget::new(Some("https://crm".into()), Some("s3cret".into())).unwrap();
    assert!(!format!("{target:?}").contains("s3cret"));
  }

  #[test]
  fn auto_post_text_names_post_and_platform() {
    assert_eq!(
      CrmEvent::auto_posted(3, "linkedin").text,
      "Auto-post #3 published to linkedin",
    );
  }
}
