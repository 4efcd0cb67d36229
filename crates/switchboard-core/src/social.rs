//! Social posts — mock publications to a social platform.

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{Error, Result, error::MESSAGE_REQUIRED};

/// Platform recorded when the caller does not name one.
pub const DEFAULT_PLATFORM: &str = "general";

/// A published (or scheduled) post. `id` is assigned by the store and is
/// strictly increasing within a process lifetime.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SocialPost {
  pub id:             u64,
  pub platform:       String,
  pub message:        String,
  /// The schedule exactly as the caller supplied it.
  pub scheduled_time: Option<String>,
  pub auto_post:      bool,
  pub timestamp:      DateTime<Utc>,
}

impl SocialPost {
  /// When an auto-post job for this post should run, if the schedule parses.
  pub fn scheduled_at(&self) -> Option<DateTime<Utc>> {
    self.scheduled_time.as_deref().and_then(parse_schedule)
  }
}

/// Input to [`crate::store::DashboardStore::log_social_post`].
/// `id` and `timestamp` are always set by the store.
#[derive(Debug, Clone, PartialEq)]
pub struct NewPost {
  pub platform:       String,
  pub message:        String,
  pub scheduled_time: Option<String>,
  pub auto_post:      bool,
}

impl NewPost {
  /// Build a post from loosely-typed request fields.
  ///
  /// Fails with [`Error::MissingRequiredField`] if `message` is absent or
  /// blank. A blank `schedule_time` is treated as absent.
  pub fn new(
    platform: Option<String>,
    message: Option<String>,
    scheduled_time: Option<String>,
    auto_post: Option<bool>,
  ) -> Result<Self> {
    let message = message
      .filter(|m| !m.trim().is_empty())
      .ok_or(Error::MissingRequiredField(MESSAGE_REQUIRED))?;
    let platform = platform
      .filter(|p| !p.trim().is_empty())
      .unwrap_or_else(|| DEFAULT_PLATFORM.to_owned());

    Ok(Self {
      platform,
      message,
      scheduled_time: scheduled_time.filter(|s| !s.trim().is_empty()),
      auto_post: auto_post.unwrap_or(false),
    })
  }
}

/// Parse a schedule string. Accepts RFC 3339 and the `datetime-local` form
/// browsers submit (`2026-01-31T09:30`, optionally with seconds), the latter
/// read as UTC.
pub fn parse_schedule(raw: &str) -> Option<DateTime<Utc>> {
  let raw = raw.trim();
  if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
    return Some(dt.with_timezone(&Utc));
  }
  ["%Y-%m-%dT%H:%M", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M"]
    .iter()
    .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
    .map(|naive| naive.and_utc())
}
