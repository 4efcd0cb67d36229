//! Jobs held in the registry polled by the background runner.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::social::SocialPost;

/// What a job does when it runs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum JobKind {
  /// Publish a previously-logged social post without operator involvement.
  AutoPost { post_id: u64 },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduledJob {
  pub job_id: Uuid,
  pub due_at: DateTime<Utc>,
  pub kind:   JobKind,
}

impl ScheduledJob {
  /// An auto-post job for `post`, due at its parsed schedule or at `now` if
  /// the schedule is missing or unparseable.
  pub fn auto_post(post: &SocialPost, now: DateTime<Utc>) -> Self {
    Self {
      job_id: Uuid::new_v4(),
      due_at: post.scheduled_at().unwrap_or(now),
      kind:   JobKind::AutoPost { post_id: post.id },
    }
  }

  pub fn is_due(&self, now: DateTime<Utc>) -> bool { self.due_at <= now }
}

#[cfg(test)]
mod tests {
  use chrono::{Duration, TimeZone};

  use super::*;

  fn post(scheduled_time: Option<&str>) -> SocialPost {
    SocialPost {
      id:             7,
      platform:       "twitter".into(),
      message:        "hi".into(),
      scheduled_time: scheduled_time.map(Into::into),
      auto_post:      true,
      timestamp:      Utc::now(),
    }
  }

  #[test]
  fn job_is_due_at_parsed_schedule() {
    let now = Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap();
    let job = ScheduledJob::auto_post(&post(Some("2026-01-02T09:00")), now);
    assert_eq!(job.kind, JobKind::AutoPost { post_id: 7 });
    assert!(!job.is_due(now));
    assert!(job.is_due(now + Duration::days(2)));
  }

  #[test]
  fn unparseable_schedule_is_due_immediately() {
    let now = Utc::now();
    let job = ScheduledJob::auto_post(&post(Some("soon")), now);
    assert!(job.is_due(now));
    let job = ScheduledJob::auto_post(&post(None), now);
    assert!(job.is_due(now));
  }
}
