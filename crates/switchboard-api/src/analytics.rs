//! Handler for `POST /refresh_stats`.

use axum::{Json, extract::State};
use switchboard_core::{
  analytics::AnalyticsSnapshot,
  crm::{self, CrmEvent},
  event::DashboardEvent,
  store::DashboardStore,
};

use crate::{ApiState, error::ApiError};

/// `POST /refresh_stats` — apply the simulated refresh and return the new
/// snapshot.
pub async fn refresh<S>(
  State(state): State<ApiState<S>>,
) -> Result<Json<AnalyticsSnapshot>, ApiError>
where
  S: DashboardStore + 'static,
{
  let analytics = state
    .store
    .refresh_analytics()
    .await
    .map_err(ApiError::store)?;
  let event = state
    .store
    .log_crm_event(CrmEvent::new(crm::ANALYTICS_REFRESHED))
    .await
    .map_err(ApiError::store)?;

  state.events.publish(DashboardEvent::AnalyticsUpdated(analytics.clone()));
  state.events.publish(DashboardEvent::CrmLogged(event));
  Ok(Json(analytics))
}
