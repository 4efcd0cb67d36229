//! Handlers for the chat console.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `POST` | `/send_chat` | Body: `{"message":"..."}`; returns `{"response":"..."}` |
//! | `POST` | `/handoff` | No body; records a CRM handoff event |

use axum::{Json, extract::State};
use serde::{Deserialize, Serialize};
use switchboard_core::{
  analytics::AnalyticsDelta,
  chat::{self, ChatTurn},
  crm::{self, CrmEvent},
  event::DashboardEvent,
  intent,
  store::DashboardStore,
};

use crate::{Ack, ApiState, error::ApiError};

// ─── Send ─────────────────────────────────────────────────────────────────────

#[derive(Debug, Default, Deserialize)]
pub struct SendChatBody {
  pub message: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ChatReply {
  pub response: String,
}

/// `POST /send_chat` — log the user's message, the canned reply, and bump
/// the chat counter.
pub async fn send<S>(
  State(state): State<ApiState<S>>,
  Json(body): Json<SendChatBody>,
) -> Result<Json<ChatReply>, ApiError>
where
  S: DashboardStore + 'static,
{
  let message = chat::user_message(body.message)?;

  let training = state.store.training().await.map_err(ApiError::store)?;
  let intent = intent::classify(&message);
  let response = intent::respond(&message, &training);

  let (user, assistant) = state
    .store
    .log_exchange(ChatTurn::user(message), ChatTurn::assistant(response.clone()))
    .await
    .map_err(ApiError::store)?;
  let analytics = state
    .store
    .apply_delta(AnalyticsDelta::ChatIncremented(1))
    .await
    .map_err(ApiError::store)?;

  tracing::info!(intent = ?intent, "chat answered");
  state.events.publish(DashboardEvent::ChatLogged { user, assistant });
  state.events.publish(DashboardEvent::AnalyticsUpdated(analytics));

  Ok(Json(ChatReply { response }))
}

// ─── Handoff ──────────────────────────────────────────────────────────────────

/// `POST /handoff`
pub async fn handoff<S>(
  State(state): State<ApiState<S>>,
) -> Result<Json<Ack>, ApiError>
where
  S: DashboardStore + 'static,
{
  let event = state
    .store
    .log_crm_event(CrmEvent::new(crm::HANDOFF))
    .await
    .map_err(ApiError::store)?;

  tracing::info!("chat handed off to a human agent");
  state.events.publish(DashboardEvent::CrmLogged(event));
  Ok(Json(Ack::ok()))
}
