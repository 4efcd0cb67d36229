//! JSON API for the Switchboard dashboard.
//!
//! Exposes an axum [`Router`] backed by any
//! [`switchboard_core::store::DashboardStore`]. The action endpoints keep the
//! flat paths the dashboard pages post to; read-only state lives under
//! `/api`. Page rendering and the push socket are the caller's
//! responsibility.
//!
//! # Mounting
//!
//! ```rust,ignore
//! let app = Router::new()
//!   .merge(switchboard_api::api_router(state.clone()))
//!   .merge(pages);
//! ```

pub mod analytics;
pub mod chat;
pub mod crm;
pub mod error;
pub mod events;
pub mod settings;
pub mod social;
pub mod training;
pub mod views;

use std::sync::Arc;

use axum::{
  Router,
  routing::{get, post},
};
use serde::{Deserialize, Serialize};
use switchboard_core::store::DashboardStore;

pub use error::ApiError;
pub use events::EventBus;

// ─── State ────────────────────────────────────────────────────────────────────

/// Shared state threaded through all API handlers.
pub struct ApiState<S> {
  pub store:  Arc<S>,
  pub events: EventBus,
}

impl<S> ApiState<S> {
  pub fn new(store: Arc<S>, events: EventBus) -> Self { Self { store, events } }
}

impl<S> Clone for ApiState<S> {
  fn clone(&self) -> Self {
    Self {
      store:  Arc::clone(&self.store),
      events: self.events.clone(),
    }
  }
}

/// `{"success": true}` — the reply of every action without a payload.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Ack {
  pub success: bool,
}

impl Ack {
  pub fn ok() -> Self { Self { success: true } }
}

// ─── Router ───────────────────────────────────────────────────────────────────

/// Build a fully-materialised API router for `state`.
///
/// The returned `Router<()>` can be merged into any parent router regardless
/// of its own state type.
pub fn api_router<S>(state: ApiState<S>) -> Router<()>
where
  S: DashboardStore + 'static,
{
  Router::new()
    // Actions
    .route("/send_chat", post(chat::send::<S>))
    .route("/handoff", post(chat::handoff::<S>))
    .route("/publish_post", post(social::publish::<S>))
    .route("/sync_crm", post(crm::sync::<S>))
    .route("/update_training", post(training::update::<S>))
    .route("/save_config", post(settings::save::<S>))
    .route("/refresh_stats", post(analytics::refresh::<S>))
    // Read-only state
    .route("/api/chats", get(views::chats::<S>))
    .route("/api/crm", get(views::crm::<S>))
    .route("/api/posts", get(views::posts::<S>))
    .route("/api/posts/{id}", get(views::post::<S>))
    .route("/api/analytics", get(views::analytics::<S>))
    .route("/api/training", get(views::training::<S>))
    .route("/api/config", get(views::config::<S>))
    .route("/api/jobs", get(views::jobs::<S>))
    .with_state(state)
}

// ─── Integration tests ────────────────────────────────────────────────────────
