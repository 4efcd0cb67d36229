//! Handler for `POST /sync_crm`.
//!
//! Body: `{"endpoint":"...","api_key":"..."}`, both required. No request is
//! made to the endpoint; the sync is recorded in the CRM log only.

use axum::{Json, extract::State};
use serde::Deserialize;
use switchboard_core::{
  crm::{self, CrmEvent, SyncTarget},
  event::DashboardEvent,
  store::DashboardStore,
};

use crate::{Ack, ApiState, error::ApiError};

#[derive(Debug, Default, Deserialize)]
pub struct SyncBody {
  pub endpoint: Option<String>,
  pub api_key:  Option<String>,
}

/// `POST /sync_crm`
pub async fn sync<S>(
  State(state): State<ApiState<S>>,
  Json(body): Json<SyncBody>,
) -> Result<Json<Ack>, ApiError>
where
  S: DashboardStore + 'static,
{
  let target = SyncTarget::new(body.endpoint, body.api_key)?;

  let event = state
    .store
    .log_crm_event(CrmEvent::new(crm::MANUAL_SYNC))
    .await
    .map_err(ApiError::store)?;

  tracing::info!(endpoint = %target.endpoint, "manual crm sync recorded");
  state.events.publish(DashboardEvent::CrmLogged(event));
  Ok(Json(Ack::ok()))
}
