//! The `DashboardStore` trait.
//!
//! The trait is implemented by state backends (e.g.
//! `switchboard-store-memory`). Higher layers (`switchboard-api`,
//! `switchboard-server`) depend on this abstraction, not on any concrete
//! backend.

use std::future::Future;

use chrono::{DateTime, Utc};

use crate::{
  ai_config::{AiConfig, ConfigPatch},
  analytics::{AnalyticsDelta, AnalyticsSnapshot},
  chat::ChatTurn,
  crm::CrmEvent,
  job::ScheduledJob,
  social::{NewPost, SocialPost},
  training::{TrainingProfile, TrainingUpdate},
};

/// Process-wide dashboard state.
///
/// The chat, CRM, and social logs are append-only: entries are never edited
/// or removed. Each collection is independently linearizable, so concurrent
/// appends never drop or tear entries.
///
/// All methods return `Send` futures so the trait can be used in
/// multi-threaded async runtimes (e.g. tokio with `axum`).
pub trait DashboardStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  // ── Chat log ──────────────────────────────────────────────────────────

  /// Append a single turn and return it.
  fn log_chat(
    &self,
    turn: ChatTurn,
  ) -> impl Future<Output = Result<ChatTurn, Self::Error>> + Send + '_;

  /// Append a user turn and its reply as one adjacent pair.
  fn log_exchange(
    &self,
    user: ChatTurn,
    assistant: ChatTurn,
  ) -> impl Future<Output = Result<(ChatTurn, ChatTurn), Self::Error>> + Send + '_;

  /// The full chat log, oldest first.
  fn chats(
    &self,
  ) -> impl Future<Output = Result<Vec<ChatTurn>, Self::Error>> + Send + '_;

  // ── CRM log ───────────────────────────────────────────────────────────

  fn log_crm_event(
    &self,
    event: CrmEvent,
  ) -> impl Future<Output = Result<CrmEvent, Self::Error>> + Send + '_;

  fn crm_events(
    &self,
  ) -> impl Future<Output = Result<Vec<CrmEvent>, Self::Error>> + Send + '_;

  // ── Social posts ──────────────────────────────────────────────────────

  /// Append a post, assigning `id = count + 1` and the timestamp.
  fn log_social_post(
    &self,
    post: NewPost,
  ) -> impl Future<Output = Result<SocialPost, Self::Error>> + Send + '_;

  fn social_posts(
    &self,
  ) -> impl Future<Output = Result<Vec<SocialPost>, Self::Error>> + Send + '_;

  fn get_social_post(
    &self,
    id: u64,
  ) -> impl Future<Output = Result<Option<SocialPost>, Self::Error>> + Send + '_;

  // ── Analytics ─────────────────────────────────────────────────────────

  fn analytics(
    &self,
  ) -> impl Future<Output = Result<AnalyticsSnapshot, Self::Error>> + Send + '_;

  /// Apply one delta atomically and return the updated snapshot.
  fn apply_delta(
    &self,
    delta: AnalyticsDelta,
  ) -> impl Future<Output = Result<AnalyticsSnapshot, Self::Error>> + Send + '_;

  /// Apply the simulated refresh: a random chat bump in `[0, 10]` and a
  /// fallback-rate step down, floored at zero.
  fn refresh_analytics(
    &self,
  ) -> impl Future<Output = Result<AnalyticsSnapshot, Self::Error>> + Send + '_;

  // ── AI configuration ──────────────────────────────────────────────────

  fn ai_config(
    &self,
  ) -> impl Future<Output = Result<AiConfig, Self::Error>> + Send + '_;

  /// Merge `patch` into the configuration and return the result.
  fn save_ai_config(
    &self,
    patch: ConfigPatch,
  ) -> impl Future<Output = Result<AiConfig, Self::Error>> + Send + '_;

  // ── Training profile ──────────────────────────────────────────────────

  fn training(
    &self,
  ) -> impl Future<Output = Result<TrainingProfile, Self::Error>> + Send + '_;

  fn update_training(
    &self,
    update: TrainingUpdate,
  ) -> impl Future<Output = Result<TrainingProfile, Self::Error>> + Send + '_;

  // ── Job registry ──────────────────────────────────────────────────────

  fn schedule_job(
    &self,
    job: ScheduledJob,
  ) -> impl Future<Output = Result<ScheduledJob, Self::Error>> + Send + '_;

  /// Remove and return every job due at or before `now`, earliest first.
  fn take_due_jobs(
    &self,
    now: DateTime<Utc>,
  ) -> impl Future<Output = Result<Vec<ScheduledJob>, Self::Error>> + Send + '_;

  /// Jobs still waiting, earliest first.
  fn pending_jobs(
    &self,
  ) -> impl Future<Output = Result<Vec<ScheduledJob>, Self::Error>> + Send + '_;
}
