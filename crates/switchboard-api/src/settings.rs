//! Handler for `POST /save_config`.
//!
//! Every field is optional and merged into the current configuration.
//! `timeout` (alias `timeout_seconds`) and `max_length` accept numbers or
//! numeric strings; anything else is a 400 and nothing is saved.

use axum::{Json, extract::State};
use serde::Deserialize;
use serde_json::Value;
use switchboard_core::{
  ai_config::ConfigPatch,
  crm::{self, CrmEvent},
  event::DashboardEvent,
  store::DashboardStore,
};

use crate::{Ack, ApiState, error::ApiError};

#[derive(Debug, Default, Deserialize)]
pub struct ConfigBody {
  pub model:             Option<String>,
  #[serde(alias = "timeout_seconds")]
  pub timeout:           Option<Value>,
  pub max_length:        Option<Value>,
  pub analytics_enabled: Option<Value>,
}

/// `POST /save_config`
pub async fn save<S>(
  State(state): State<ApiState<S>>,
  Json(body): Json<ConfigBody>,
) -> Result<Json<Ack>, ApiError>
where
  S: DashboardStore + 'static,
{
  let patch = ConfigPatch::from_values(
    body.model,
    body.timeout.as_ref(),
    body.max_length.as_ref(),
    body.analytics_enabled.as_ref(),
  )?;

  let config = state
    .store
    .save_ai_config(patch)
    .await
    .map_err(ApiError::store)?;
  let event = state
    .store
    .log_crm_event(CrmEvent::new(crm::CONFIG_SAVED))
    .await
    .map_err(ApiError::store)?;

  tracing::info!(model = %config.model, "ai configuration saved");
  state.events.publish(DashboardEvent::ConfigSaved(config));
  state.events.publish(DashboardEvent::CrmLogged(event));
  Ok(Json(Ack::ok()))
}
