//! [`MemoryStore`] — the in-memory implementation of [`DashboardStore`].

use std::sync::Arc;

use chrono::{DateTime, Utc};
use rand::Rng as _;
use tokio::sync::Mutex;

use switchboard_core::{
  ai_config::{AiConfig, ConfigPatch},
  analytics::{AnalyticsDelta, AnalyticsSnapshot, REFRESH_MAX_CHAT_BUMP},
  chat::ChatTurn,
  crm::CrmEvent,
  error::MESSAGE_REQUIRED,
  job::ScheduledJob,
  social::{NewPost, SocialPost},
  store::DashboardStore,
  training::{TrainingProfile, TrainingUpdate},
};

use crate::Result;

// ─── Store ───────────────────────────────────────────────────────────────────

/// Dashboard state held in process memory.
///
/// Cloning is cheap — all clones share the same collections.
#[derive(Clone, Default)]
pub struct MemoryStore {
  inner: Arc<Inner>,
}

#[derive(Default)]
struct Inner {
  chats:     Mutex<Vec<ChatTurn>>,
  crm:       Mutex<Vec<CrmEvent>>,
  posts:     Mutex<Vec<SocialPost>>,
  analytics: Mutex<AnalyticsSnapshot>,
  config:    Mutex<AiConfig>,
  training:  Mutex<TrainingProfile>,
  jobs:      Mutex<Vec<ScheduledJob>>,
}

impl MemoryStore {
  /// A store seeded with the default analytics, configuration, and
  /// training profile.
  pub fn new() -> Self { Self::default() }

  /// A store whose AI configuration starts at `config` instead of the
  /// default.
  pub fn with_ai_config(config: AiConfig) -> Self {
    Self {
      inner: Arc::new(Inner {
        config: Mutex::new(config),
        ..Inner::default()
      }),
    }
  }
}

// ─── DashboardStore impl ─────────────────────────────────────────────────────

impl DashboardStore for MemoryStore {
  type Error = crate::Error;

  // ── Chat log ────────────────────────────────────────────────────────────

  async fn log_chat(&self, turn: ChatTurn) -> Result<ChatTurn> {
    self.inner.chats.lock().await.push(turn.clone());
    Ok(turn)
  }

  async fn log_exchange(
    &self,
    user: ChatTurn,
    assistant: ChatTurn,
  ) -> Result<(ChatTurn, ChatTurn)> {
    let mut chats = self.inner.chats.lock().await;
    chats.push(user.clone());
    chats.push(assistant.clone());
    Ok((user, assistant))
  }

  async fn chats(&self) -> Result<Vec<ChatTurn>> {
    Ok(self.inner.chats.lock().await.clone())
  }

  // ── CRM log ─────────────────────────────────────────────────────────────

  async fn log_crm_event(&self, event: CrmEvent) -> Result<CrmEvent> {
    tracing::debug!(text = %event.text, "crm event");
    self.inner.crm.lock().await.push(event.clone());
    Ok(event)
  }

  async fn crm_events(&self) -> Result<Vec<CrmEvent>> {
    Ok(self.inner.crm.lock().await.clone())
  }

  // ── Social posts ────────────────────────────────────────────────────────

  async fn log_social_post(&self, post: NewPost) -> Result<SocialPost> {
    // Re-check: `NewPost` fields are public, so callers can bypass `new`.
    if post.message.trim().is_empty() {
      return Err(
        switchboard_core::Error::MissingRequiredField(MESSAGE_REQUIRED).into(),
      );
    }

    let mut posts = self.inner.posts.lock().await;
    let stored = SocialPost {
      id:             posts.len() as u64 + 1,
      platform:       post.platform,
      message:        post.message,
      scheduled_time: post.scheduled_time,
      auto_post:      post.auto_post,
      timestamp:      Utc::now(),
    };
    posts.push(stored.clone());
    Ok(stored)
  }

  async fn social_posts(&self) -> Result<Vec<SocialPost>> {
    Ok(self.inner.posts.lock().await.clone())
  }

  async fn get_social_post(&self, id: u64) -> Result<Option<SocialPost>> {
    Ok(
      self
        .inner
        .posts
        .lock()
        .await
        .iter()
        .find(|p| p.id == id)
        .cloned(),
    )
  }

  // ── Analytics ───────────────────────────────────────────────────────────

  async fn analytics(&self) -> Result<AnalyticsSnapshot> {
    Ok(self.inner.analytics.lock().await.clone())
  }

  async fn apply_delta(&self, delta: AnalyticsDelta) -> Result<AnalyticsSnapshot> {
    let mut analytics = self.inner.analytics.lock().await;
    analytics.apply(delta);
    Ok(analytics.clone())
  }

  async fn refresh_analytics(&self) -> Result<AnalyticsSnapshot> {
    let bump = rand::thread_rng().gen_range(0..=REFRESH_MAX_CHAT_BUMP);
    let mut analytics = self.inner.analytics.lock().await;
    analytics.refresh(bump);
    tracing::debug!(bump, fallback_rate = analytics.fallback_rate, "analytics refreshed");
    Ok(analytics.clone())
  }

  // ── AI configuration ────────────────────────────────────────────────────

  async fn ai_config(&self) -> Result<AiConfig> {
    Ok(self.inner.config.lock().await.clone())
  }

  async fn save_ai_config(&self, patch: ConfigPatch) -> Result<AiConfig> {
    let mut config = self.inner.config.lock().await;
    config.apply(patch);
    Ok(config.clone())
  }

  // ── Training profile ────────────────────────────────────────────────────

  async fn training(&self) -> Result<TrainingProfile> {
    Ok(self.inner.training.lock().await.clone())
  }

  async fn update_training(&self, update: TrainingUpdate) -> Result<TrainingProfile> {
    let mut training = self.inner.training.lock().await;
    training.apply(update);
    Ok(training.clone())
  }

  // ── Job registry ────────────────────────────────────────────────────────

  async fn schedule_job(&self, job: ScheduledJob) -> Result<ScheduledJob> {
    self.inner.jobs.lock().await.push(job.clone());
    Ok(job)
  }

  async fn take_due_jobs(&self, now: DateTime<Utc>) -> Result<Vec<ScheduledJob>> {
    let mut jobs = self.inner.jobs.lock().await;
    let (mut due, pending): (Vec<_>, Vec<_>) =
      jobs.drain(..).partition(|job| job.is_due(now));
    *jobs = pending;
    due.sort_by_key(|job| job.due_at);
    Ok(due)
  }

  async fn pending_jobs(&self) -> Result<Vec<ScheduledJob>> {
    let mut jobs = self.inner.jobs.lock().await.clone();
    jobs.sort_by_key(|job| job.due_at);
    Ok(jobs)
  }
}
