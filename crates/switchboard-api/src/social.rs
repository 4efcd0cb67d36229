//! Handler for `POST /publish_post`.
//!
//! Body: `{"message":"...", "platform":"...", "schedule_time":"...",
//! "auto_post":true}`; only `message` is required. Returns
//! `{"success":true,"post_id":N}`. Auto-posts are also handed to the job
//! registry for the background runner.

use axum::{Json, extract::State};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use switchboard_core::{
  analytics::AnalyticsDelta,
  crm::CrmEvent,
  event::DashboardEvent,
  job::ScheduledJob,
  social::NewPost,
  store::DashboardStore,
};

use crate::{ApiState, error::ApiError};

#[derive(Debug, Default, Deserialize)]
pub struct PublishBody {
  pub platform:      Option<String>,
  pub message:       Option<String>,
  pub schedule_time: Option<String>,
  pub auto_post:     Option<bool>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct PublishReply {
  pub success: bool,
  pub post_id: u64,
}

/// `POST /publish_post`
pub async fn publish<S>(
  State(state): State<ApiState<S>>,
  Json(body): Json<PublishBody>,
) -> Result<Json<PublishReply>, ApiError>
where
  S: DashboardStore + 'static,
{
  let new_post = NewPost::new(
    body.platform,
    body.message,
    body.schedule_time,
    body.auto_post,
  )?;

  let post = state
    .store
    .log_social_post(new_post)
    .await
    .map_err(ApiError::store)?;
  let analytics = state
    .store
    .apply_delta(AnalyticsDelta::SocialPostIncremented(1))
    .await
    .map_err(ApiError::store)?;
  let event = state
    .store
    .log_crm_event(CrmEvent::post_scheduled(&post.platform))
    .await
    .map_err(ApiError::store)?;

  if post.auto_post {
    if post.scheduled_time.is_some() && post.scheduled_at().is_none() {
      tracing::warn!(
        post_id = post.id,
        schedule = ?post.scheduled_time,
        "unparseable schedule, auto-posting on next tick"
      );
    }
    let job = state
      .store
      .schedule_job(ScheduledJob::auto_post(&post, Utc::now()))
      .await
      .map_err(ApiError::store)?;
    tracing::info!(post_id = post.id, job_id = %job.job_id, due_at = %job.due_at, "auto-post scheduled");
  }

  tracing::info!(post_id = post.id, platform = %post.platform, "social post published");
  let post_id = post.id;
  state.events.publish(DashboardEvent::PostPublished(post));
  state.events.publish(DashboardEvent::AnalyticsUpdated(analytics));
  state.events.publish(DashboardEvent::CrmLogged(event));

  Ok(Json(PublishReply {
    success: true,
    post_id,
  }))
}
