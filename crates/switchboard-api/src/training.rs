//! Handler for `POST /update_training`.
//!
//! Body: `{"brand_voice":"..."}` and/or `{"intent":"...","template":"..."}`.
//! Always succeeds; an intent without a template (or vice versa) is ignored.

use axum::{Json, extract::State};
use serde::Deserialize;
use switchboard_core::{
  crm::{self, CrmEvent},
  event::DashboardEvent,
  store::DashboardStore,
  training::TrainingUpdate,
};

use crate::{Ack, ApiState, error::ApiError};

#[derive(Debug, Default, Deserialize)]
pub struct TrainingBody {
  pub brand_voice: Option<String>,
  pub intent:      Option<String>,
  pub template:    Option<String>,
}

/// `POST /update_training`
pub async fn update<S>(
  State(state): State<ApiState<S>>,
  Json(body): Json<TrainingBody>,
) -> Result<Json<Ack>, ApiError>
where
  S: DashboardStore + 'static,
{
  let update = TrainingUpdate::new(body.brand_voice, body.intent, body.template);
  let intent = update.intent.as_ref().map(|(name, _)| name.clone());

  let profile = state
    .store
    .update_training(update)
    .await
    .map_err(ApiError::store)?;
  let event = state
    .store
    .log_crm_event(CrmEvent::new(crm::TRAINING_UPDATED))
    .await
    .map_err(ApiError::store)?;

  tracing::info!(intent = ?intent, "training profile updated");
  state.events.publish(DashboardEvent::TrainingUpdated(profile));
  state.events.publish(DashboardEvent::CrmLogged(event));
  Ok(Json(Ack::ok()))
}
