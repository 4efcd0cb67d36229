//! The Switchboard dashboard server.
//!
//! Combines the JSON API from `switchboard-api` with the HTML views, the
//! `/events` push socket, and the background job runner.

pub mod error;
pub mod etag;
pub mod markup;
pub mod pages;
pub mod push;
pub mod scheduler;

pub use error::Error;

use std::{path::Path, time::Duration};

use axum::{Router, routing::get};
use serde::Deserialize;
use switchboard_api::{ApiState, api_router};
use switchboard_core::{ai_config::AiConfig, store::DashboardStore};
use tower_http::trace::TraceLayer;

// ─── Configuration ────────────────────────────────────────────────────────────

/// Runtime server configuration, deserialised from `switchboard.toml` and
/// `SWITCHBOARD_*` environment variables.
#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
  #[serde(default = "default_host")]
  pub host:                    String,
  #[serde(default = "default_port")]
  pub port:                    u16,
  #[serde(default = "default_scheduler_interval")]
  pub scheduler_interval_secs: u64,
  #[serde(default = "default_event_buffer")]
  pub event_buffer:            usize,
  /// Starting AI configuration; edits made through `/save_config` are not
  /// written back.
  #[serde(default)]
  pub ai:                      AiConfig,
}

fn default_host() -> String { "127.0.0.1".to_owned() }
fn default_port() -> u16 { 5000 }
fn default_scheduler_interval() -> u64 { 60 }
fn default_event_buffer() -> usize { 64 }

impl Default for ServerConfig {
  fn default() -> Self {
    Self {
      host:                    default_host(),
      port:                    default_port(),
      scheduler_interval_secs: default_scheduler_interval(),
      event_buffer:            default_event_buffer(),
      ai:                      AiConfig::default(),
    }
  }
}

impl ServerConfig {
  /// Read `path` (optional) and layer `SWITCHBOARD_*` environment variables
  /// over it.
  pub fn load(path: &Path) -> Result<Self, config::ConfigError> {
    Self::load_with(path, environment())
  }

  fn load_with(path: &Path, env: config::Environment) -> Result<Self, config::ConfigError> {
    config::Config::builder()
      .add_source(config::File::from(path).required(false))
      .add_source(env)
      .build()?
      .try_deserialize()
  }

  pub fn address(&self) -> String { format!("{}:{}", self.host, self.port) }

  /// The job runner's period, never shorter than one second.
  pub fn scheduler_interval(&self) -> Duration {
    Duration::from_secs(self.scheduler_interval_secs.max(1))
  }
}

/// `SWITCHBOARD_PORT` sets `port`; `__` descends into tables, so
/// `SWITCHBOARD_AI__MODEL` sets `ai.model`.
fn environment() -> config::Environment {
  config::Environment::with_prefix("SWITCHBOARD")
    .prefix_separator("_")
    .separator("__")
    .try_parsing(true)
}

// ─── Router ───────────────────────────────────────────────────────────────────

/// Build the full application router: pages, push socket, and JSON API.
pub fn router<S>(state: ApiState<S>) -> Router
where
  S: DashboardStore + 'static,
{
  Router::new()
    .route("/",          get(pages::index::<S>))
    .route("/social",    get(pages::social::<S>))
    .route("/chat",      get(pages::chat::<S>))
    .route("/crm",       get(pages::crm::<S>))
    .route("/analytics", get(pages::analytics::<S>))
    .route("/training",  get(pages::training::<S>))
    .route("/config",    get(pages::config::<S>))
    .route("/events",    get(push::events::<S>))
    .with_state(state.clone())
    .merge(api_router(state))
    .layer(TraceLayer::new_for_http())
}

// ─── Integration tests ────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
  use std::sync::Arc;

  use axum::{
    body::Body,
    http::{Request, StatusCode, header},
    response::Response,
  };
  use switchboard_api::EventBus;
  use switchboard_store_memory::MemoryStore;
  use tower::ServiceExt as _;

  use super::*;

  fn state() -> ApiState<MemoryStore> {
    ApiState::new(Arc::new(MemoryStore::new()), EventBus::default())
  }

  async fn get_page(
    state: ApiState<MemoryStore>,
    uri: &str,
    if_none_match: Option<&str>,
  ) -> Response {
    let mut builder = Request::builder().method("GET").uri(uri);
    if let Some(tag) = if_none_match {
      builder = builder.header(header::IF_NONE_MATCH, tag);
    }
    router(state)
      .oneshot(builder.body(Body::empty()).unwrap())
      .await
      .unwrap()
  }

  async fn post_json(state: ApiState<MemoryStore>, uri: &str, body: &str) -> StatusCode {
    let req = Request::builder()
      .method("POST")
      .uri(uri)
      .header(header::CONTENT_TYPE, "application/json")
      .body(Body::from(body.to_owned()))
      .unwrap();
    router(state).oneshot(req).await.unwrap().status()
  }

  async fn body_text(resp: Response) -> String {
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
  }

  #[test]
  fn config_defaults_fill_missing_fields() {
    let cfg: ServerConfig = serde_json::from_str(r#"{"port": 8080}"#).unwrap();
    assert_eq!(cfg.host, "127.0.0.1");
    assert_eq!(cfg.port, 8080);
    assert_eq!(cfg.scheduler_interval(), Duration::from_secs(60));
    assert_eq!(cfg.event_buffer, 64);
    assert_eq!(cfg.ai, AiConfig::default());
  }

  fn env(vars: &[(&str, &str)]) -> config::Environment {
    let map = vars
      .iter()
      .map(|(k, v)| (k.to_string(), v.to_string()))
      .collect::<config::Map<_, _>>();
    environment().source(Some(map))
  }

  #[test]
  fn env_vars_use_single_underscore_prefix() {
    let cfg = ServerConfig::load_with(
      Path::new("does-not-exist.toml"),
      env(&[
        ("SWITCHBOARD_PORT", "8081"),
        ("SWITCHBOARD_HOST", "0.0.0.0"),
        ("SWITCHBOARD_SCHEDULER_INTERVAL_SECS", "5"),
        ("SWITCHBOARD_AI__MODEL", "gpt3"),
        ("SWITCHBOARD_AI__ANALYTICS_ENABLED", "false"),
      ]),
    )
    .unwrap();
    assert_eq!(cfg.port, 8081);
    assert_eq!(cfg.host, "0.0.0.0");
    assert_eq!(cfg.scheduler_interval(), Duration::from_secs(5));
    assert_eq!(cfg.ai.model, "gpt3");
    assert!(!cfg.ai.analytics_enabled);
    assert_eq!(cfg.ai.timeout_seconds, 30);
  }

  #[test]
  fn env_overrides_config_file() {
    let path = std::env::temp_dir()
      .join(format!("switchboard-config-{}.toml", std::process::id()));
    std::fs::write(&path, "host = \"10.0.0.1\"\nport = 6000\n\n[ai]\nmax_length = 20\n")
      .unwrap();

    let cfg = ServerConfig::load_with(&path, env(&[("SWITCHBOARD_PORT", "7000")])).unwrap();
    std::fs::remove_file(&path).ok();

    assert_eq!(cfg.host, "10.0.0.1");
    assert_eq!(cfg.port, 7000);
    assert_eq!(cfg.ai.max_length, 20);
    assert_eq!(cfg.ai.model, "gpt4");
  }

  #[test]
  fn zero_interval_is_clamped() {
    let cfg = ServerConfig { scheduler_interval_secs: 0, ..ServerConfig::default() };
    assert_eq!(cfg.scheduler_interval(), Duration::from_secs(1));
  }

  #[tokio::test]
  async fn every_page_renders() {
    let state = state();
    for uri in ["/", "/social", "/chat", "/crm", "/analytics", "/training", "/config"] {
      let resp = get_page(state.clone(), uri, None).await;
      assert_eq!(resp.status(), StatusCode::OK, "{uri}");
      assert!(resp.headers().contains_key(header::ETAG), "{uri}");
      let html = body_text(resp).await;
      assert!(html.starts_with("<!DOCTYPE html>"), "{uri}: {html}");
    }
  }

  #[tokio::test]
  async fn rendering_twice_without_mutation_is_identical() {
    let state = state();
    post_json(state.clone(), "/send_chat", r#"{"message":"Where is my order?"}"#).await;

    let first = get_page(state.clone(), "/chat", None).await;
    let first_tag = first.headers()[header::ETAG].clone();
    let first_body = body_text(first).await;

    let second = get_page(state.clone(), "/chat", None).await;
    assert_eq!(second.headers()[header::ETAG], first_tag);
    assert_eq!(body_text(second).await, first_body);
  }

  #[tokio::test]
  async fn matching_etag_returns_304_until_state_changes() {
    let state = state();
    let resp = get_page(state.clone(), "/crm", None).await;
    let tag = resp.headers()[header::ETAG].to_str().unwrap().to_owned();

    let resp = get_page(state.clone(), "/crm", Some(&tag)).await;
    assert_eq!(resp.status(), StatusCode::NOT_MODIFIED);

    assert_eq!(post_json(state.clone(), "/handoff", "{}").await, StatusCode::OK);
    let resp = get_page(state.clone(), "/crm", Some(&tag)).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert!(body_text(resp).await.contains("Chat handed off to human agent"));
  }

  #[tokio::test]
  async fn user_text_is_escaped_in_pages() {
    let state = state();
    let status = post_json(
      state.clone(),
      "/publish_post",
      r#"{"platform":"twitter","message":"<b>bold</b> & more"}"#,
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let html = body_text(get_page(state, "/social", None).await).await;
    assert!(html.contains("&lt;b&gt;bold&lt;/b&gt; &amp; more"), "{html}");
    assert!(!html.contains("<b>bold</b>"), "{html}");
  }

  #[tokio::test]
  async fn training_page_reflects_updates() {
    let state = state();
    post_json(
      state.clone(),
      "/update_training",
      r#"{"intent":"refund","template":"Refunds take 3 days."}"#,
    )
    .await;
    let html = body_text(get_page(state, "/training", None).await).await;
    assert!(html.contains("Refunds take 3 days."), "{html}");
  }

  #[tokio::test]
  async fn events_without_upgrade_is_rejected() {
    let resp = get_page(state(), "/events", None).await;
    assert!(resp.status().is_client_error(), "{}", resp.status());
  }

  #[tokio::test]
  async fn api_routes_are_mounted() {
    let state = state();
    assert_eq!(post_json(state.clone(), "/publish_post", "{}").await, StatusCode::BAD_REQUEST);
    let resp = get_page(state, "/api/analytics", None).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert!(body_text(resp).await.contains("\"total_chats\":247"));
  }
}
