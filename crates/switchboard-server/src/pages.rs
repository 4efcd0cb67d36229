//! Read-only HTML views over the current dashboard state.
//!
//! Every page carries an ETag derived from its rendered body; a matching
//! `If-None-Match` gets `304 Not Modified`.

use axum::{
  extract::State,
  http::{HeaderMap, StatusCode, header},
  response::{IntoResponse, Response},
};
use chrono::{DateTime, Utc};
use switchboard_api::ApiState;
use switchboard_core::{chat::Role, store::DashboardStore};

use crate::{
  error::Error,
  etag::{compute_etag, not_modified},
  markup::{Nav, Page},
};

fn timestamp(ts: &DateTime<Utc>) -> String {
  ts.format("%Y-%m-%d %H:%M:%S").to_string()
}

fn yes_no(flag: bool) -> String {
  if flag { "Yes" } else { "No" }.to_owned()
}

fn html_response(headers: &HeaderMap, html: String) -> Response {
  let etag = compute_etag(html.as_bytes());

  if not_modified(headers, &etag) {
    return (StatusCode::NOT_MODIFIED, [(header::ETAG, etag)]).into_response();
  }

  (
    StatusCode::OK,
    [
      (header::ETAG, etag),
      (header::CONTENT_TYPE, "text/html; charset=utf-8".to_owned()),
    ],
    html,
  )
    .into_response()
}

// ─── Pages ────────────────────────────────────────────────────────────────────

/// `GET /` — overview of analytics, brand voice, and configuration.
pub async fn index<S>(
  State(state): State<ApiState<S>>,
  headers: HeaderMap,
) -> Result<Response, Error>
where
  S: DashboardStore + 'static,
{
  let analytics = state.store.analytics().await.map_err(Error::store)?;
  let training = state.store.training().await.map_err(Error::store)?;
  let config = state.store.ai_config().await.map_err(Error::store)?;

  let mut page = Page::new("Dashboard", Nav::Dashboard, &analytics)?;
  page
    .heading("Brand voice")?
    .paragraph(&training.brand_voice)?
    .heading("AI configuration")?
    .details([
      ("Model", config.model),
      ("Analytics", yes_no(config.analytics_enabled)),
    ])?;
  Ok(html_response(&headers, page.finish()?))
}

/// `GET /social`
pub async fn social<S>(
  State(state): State<ApiState<S>>,
  headers: HeaderMap,
) -> Result<Response, Error>
where
  S: DashboardStore + 'static,
{
  let analytics = state.store.analytics().await.map_err(Error::store)?;
  let posts = state.store.social_posts().await.map_err(Error::store)?;
  let jobs = state.store.pending_jobs().await.map_err(Error::store)?;

  let mut page = Page::new("Social", Nav::Social, &analytics)?;
  page
    .heading("Posts")?
    .table(
      &["#", "Platform", "Message", "Scheduled", "Auto", "Created"],
      posts.iter().rev().map(|p| {
        vec![
          p.id.to_string(),
          p.platform.clone(),
          p.message.clone(),
          p.scheduled_time.clone().unwrap_or_default(),
          yes_no(p.auto_post),
          timestamp(&p.timestamp),
        ]
      }),
      "No posts yet.",
    )?
    .paragraph(&format!("{} auto-post job(s) waiting.", jobs.len()))?;
  Ok(html_response(&headers, page.finish()?))
}

/// `GET /chat`
pub async fn chat<S>(
  State(state): State<ApiState<S>>,
  headers: HeaderMap,
) -> Result<Response, Error>
where
  S: DashboardStore + 'static,
{
  let analytics = state.store.analytics().await.map_err(Error::store)?;
  let chats = state.store.chats().await.map_err(Error::store)?;

  let mut page = Page::new("Chat", Nav::Chat, &analytics)?;
  page.table(
    &["From", "Message", "Time"],
    chats.iter().map(|turn| {
      let who = match turn.role {
        Role::User => "Customer",
        Role::Assistant => "Assistant",
      };
      vec![who.to_owned(), turn.text.clone(), timestamp(&turn.timestamp)]
    }),
    "No conversations yet.",
  )?;
  Ok(html_response(&headers, page.finish()?))
}

/// `GET /crm`
pub async fn crm<S>(
  State(state): State<ApiState<S>>,
  headers: HeaderMap,
) -> Result<Response, Error>
where
  S: DashboardStore + 'static,
{
  let analytics = state.store.analytics().await.map_err(Error::store)?;
  let events = state.store.crm_events().await.map_err(Error::store)?;

  let mut page = Page::new("CRM", Nav::Crm, &analytics)?;
  page.table(
    &["Event", "Time"],
    events
      .iter()
      .rev()
      .map(|e| vec![e.text.clone(), timestamp(&e.timestamp)]),
    "No CRM activity yet.",
  )?;
  Ok(html_response(&headers, page.finish()?))
}

/// `GET /analytics`
pub async fn analytics<S>(
  State(state): State<ApiState<S>>,
  headers: HeaderMap,
) -> Result<Response, Error>
where
  S: DashboardStore + 'static,
{
  let analytics = state.store.analytics().await.map_err(Error::store)?;

  let mut page = Page::new("Analytics", Nav::Analytics, &analytics)?;
  page
    .details([
      ("Total chats", analytics.total_chats.to_string()),
      ("Average resolution", analytics.avg_resolution.clone()),
      ("Fallback rate", format!("{:.1}%", analytics.fallback_rate)),
      ("Social posts", analytics.social_posts.to_string()),
    ])?
    .paragraph("Figures are simulated.")?;
  Ok(html_response(&headers, page.finish()?))
}

/// `GET /training`
pub async fn training<S>(
  State(state): State<ApiState<S>>,
  headers: HeaderMap,
) -> Result<Response, Error>
where
  S: DashboardStore + 'static,
{
  let analytics = state.store.analytics().await.map_err(Error::store)?;
  let training = state.store.training().await.map_err(Error::store)?;

  let mut page = Page::new("Training", Nav::Training, &analytics)?;
  page
    .heading("Brand voice")?
    .paragraph(&training.brand_voice)?
    .heading("Intents")?
    .table(
      &["Intent", "Response template"],
      training
        .intents
        .iter()
        .map(|(name, template)| vec![name.clone(), template.clone()]),
      "No intents defined.",
    )?;
  Ok(html_response(&headers, page.finish()?))
}

/// `GET /config`
pub async fn config<S>(
  State(state): State<ApiState<S>>,
  headers: HeaderMap,
) -> Result<Response, Error>
where
  S: DashboardStore + 'static,
{
  let analytics = state.store.analytics().await.map_err(Error::store)?;
  let config = state.store.ai_config().await.map_err(Error::store)?;

  let mut page = Page::new("Config", Nav::Config, &analytics)?;
  page.details([
    ("Model", config.model),
    ("Timeout", format!("{}s", config.timeout_seconds)),
    ("Max response length", config.max_length.to_string()),
    ("Analytics enabled", yes_no(config.analytics_enabled)),
  ])?;
  Ok(html_response(&headers, page.finish()?))
}
