//! Read-only JSON views of the current dashboard state.
//!
//! | Method | Path | Returns |
//! |--------|------|---------|
//! | `GET`  | `/api/chats` | Chat log, oldest first |
//! | `GET`  | `/api/crm` | CRM log, oldest first |
//! | `GET`  | `/api/posts` | Social posts, by id |
//! | `GET`  | `/api/posts/{id}` | One post; 404 if unknown |
//! | `GET`  | `/api/analytics` | Current analytics snapshot |
//! | `GET`  | `/api/training` | Training profile |
//! | `GET`  | `/api/config` | AI configuration |
//! | `GET`  | `/api/jobs` | Pending scheduled jobs |

use axum::{
  Json,
  extract::{Path, State},
};
use switchboard_core::{
  ai_config::AiConfig,
  analytics::AnalyticsSnapshot,
  chat::ChatTurn,
  crm::CrmEvent,
  job::ScheduledJob,
  social::SocialPost,
  store::DashboardStore,
  training::TrainingProfile,
};

use crate::{ApiState, error::ApiError};

pub async fn chats<S>(
  State(state): State<ApiState<S>>,
) -> Result<Json<Vec<ChatTurn>>, ApiError>
where
  S: DashboardStore + 'static,
{
  Ok(Json(state.store.chats().await.map_err(ApiError::store)?))
}

pub async fn crm<S>(
  State(state): State<ApiState<S>>,
) -> Result<Json<Vec<CrmEvent>>, ApiError>
where
  S: DashboardStore + 'static,
{
  Ok(Json(state.store.crm_events().await.map_err(ApiError::store)?))
}

pub async fn posts<S>(
  State(state): State<ApiState<S>>,
) -> Result<Json<Vec<SocialPost>>, ApiError>
where
  S: DashboardStore + 'static,
{
  Ok(Json(state.store.social_posts().await.map_err(ApiError::store)?))
}

pub async fn post<S>(
  State(state): State<ApiState<S>>,
  Path(id): Path<u64>,
) -> Result<Json<SocialPost>, ApiError>
where
  S: DashboardStore + 'static,
{
  let post = state
    .store
    .get_social_post(id)
    .await
    .map_err(ApiError::store)?
    .ok_or(switchboard_core::Error::PostNotFound(id))?;
  Ok(Json(post))
}

pub async fn analytics<S>(
  State(state): State<ApiState<S>>,
) -> Result<Json<AnalyticsSnapshot>, ApiError>
where
  S: DashboardStore + 'static,
{
  Ok(Json(state.store.analytics().await.map_err(ApiError::store)?))
}

pub async fn training<S>(
  State(state): State<ApiState<S>>,
) -> Result<Json<TrainingProfile>, ApiError>
where
  S: DashboardStore + 'static,
{
  Ok(Json(state.store.training().await.map_err(ApiError::store)?))
}

pub async fn config<S>(
  State(state): State<ApiState<S>>,
) -> Result<Json<AiConfig>, ApiError>
where
  S: DashboardStore + 'static,
{
  Ok(Json(state.store.ai_config().await.map_err(ApiError::store)?))
}

pub async fn jobs<S>(
  State(state): State<ApiState<S>>,
) -> Result<Json<Vec<ScheduledJob>>, ApiError>
where
  S: DashboardStore + 'static,
{
  Ok(Json(state.store.pending_jobs().await.map_err(ApiError::store)?))
}
