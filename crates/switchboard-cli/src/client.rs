//! Async HTTP client wrapping the Switchboard JSON API.

use std::time::Duration;

use anyhow::{Context, Result, anyhow};
use reqwest::{Client, Response};
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use serde_json::{Value, json};
use switchboard_core::{
  ai_config::AiConfig,
  analytics::AnalyticsSnapshot,
  chat::ChatTurn,
  crm::CrmEvent,
  job::ScheduledJob,
  social::SocialPost,
  training::TrainingProfile,
};

/// Body of every non-2xx reply from the API.
#[derive(Debug, Deserialize)]
struct ErrorBody {
  error: String,
}

#[derive(Debug, Deserialize)]
struct ChatReply {
  response: String,
}

#[derive(Debug, Deserialize)]
struct PublishReply {
  post_id: u64,
}

/// Fields for `POST /publish_post`.
#[derive(Debug, Default, Serialize)]
pub struct NewPostRequest {
  #[serde(skip_serializing_if = "Option::is_none")]
  pub platform:      Option<String>,
  pub message:       String,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub schedule_time: Option<String>,
  pub auto_post:     bool,
}

/// Fields for `POST /save_config`; unset fields keep their server value.
#[derive(Debug, Default, Serialize)]
pub struct ConfigRequest {
  #[serde(skip_serializing_if = "Option::is_none")]
  pub model:             Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub timeout:           Option<u32>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub max_length:        Option<u32>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub analytics_enabled: Option<bool>,
}

/// Async HTTP client for the dashboard API.
#[derive(Clone)]
pub struct ApiClient {
  client:   Client,
  base_url: String,
}

impl ApiClient {
  pub fn new(base_url: impl Into<String>) -> Result<Self> {
    let client = Client::builder()
      .timeout(Duration::from_secs(30))
      .build()
      .context("failed to build HTTP client")?;
    Ok(Self { client, base_url: base_url.into() })
  }

  fn url(&self, path: &str) -> String {
    format!("{}{}", self.base_url.trim_end_matches('/'), path)
  }

  async fn post<T: DeserializeOwned>(&self, path: &str, body: &impl Serialize) -> Result<T> {
    let resp = self
      .client
      .post(self.url(path))
      .json(body)
      .send()
      .await
      .with_context(|| format!("POST {path} failed"))?;
    decode(path, resp).await
  }

  async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
    let resp = self
      .client
      .get(self.url(path))
      .send()
      .await
      .with_context(|| format!("GET {path} failed"))?;
    decode(path, resp).await
  }

  // ── Actions ───────────────────────────────────────────────────────────────

  /// `POST /send_chat` — returns the assistant's reply.
  pub async fn send_chat(&self, message: &str) -> Result<String> {
    let reply: ChatReply = self.post("/send_chat", &json!({ "message": message })).await?;
    Ok(reply.response)
  }

  /// `POST /handoff`
  pub async fn handoff(&self) -> Result<()> {
    self.post::<Value>("/handoff", &json!({})).await.map(drop)
  }

  /// `POST /publish_post` — returns the new post's id.
  pub async fn publish_post(&self, post: &NewPostRequest) -> Result<u64> {
    let reply: PublishReply = self.post("/publish_post", post).await?;
    Ok(reply.post_id)
  }

  /// `POST /sync_crm`
  pub async fn sync_crm(&self, endpoint: &str, api_key: &str) -> Result<()> {
    self
      .post::<Value>("/sync_crm", &json!({ "endpoint": endpoint, "api_key": api_key }))
      .await
      .map(drop)
  }

  /// `POST /update_training`
  pub async fn update_training(
    &self,
    brand_voice: Option<&str>,
    intent: Option<(&str, &str)>,
  ) -> Result<()> {
    let mut body = json!({});
    if let Some(voice) = brand_voice {
      body["brand_voice"] = json!(voice);
    }
    if let Some((intent, template)) = intent {
      body["intent"] = json!(intent);
      body["template"] = json!(template);
    }
    self.post::<Value>("/update_training", &body).await.map(drop)
  }

  /// `POST /save_config`
  pub async fn save_config(&self, patch: &ConfigRequest) -> Result<()> {
    self.post::<Value>("/save_config", patch).await.map(drop)
  }

  /// `POST /refresh_stats`
  pub async fn refresh_stats(&self) -> Result<AnalyticsSnapshot> {
    self.post("/refresh_stats", &json!({})).await
  }

  // ── State ─────────────────────────────────────────────────────────────────

  pub async fn chats(&self) -> Result<Vec<ChatTurn>> { self.get("/api/chats").await }

  pub async fn crm_events(&self) -> Result<Vec<CrmEvent>> { self.get("/api/crm").await }

  pub async fn posts(&self) -> Result<Vec<SocialPost>> { self.get("/api/posts").await }

  pub async fn analytics(&self) -> Result<AnalyticsSnapshot> {
    self.get("/api/analytics").await
  }

  pub async fn training(&self) -> Result<TrainingProfile> {
    self.get("/api/training").await
  }

  pub async fn ai_config(&self) -> Result<AiConfig> { self.get("/api/config").await }

  pub async fn jobs(&self) -> Result<Vec<ScheduledJob>> { self.get("/api/jobs").await }
}

async fn decode<T: DeserializeOwned>(path: &str, resp: Response) -> Result<T> {
  let status = resp.status();
  if !status.is_success() {
    let text = resp.text().await.unwrap_or_default();
    return Err(anyhow!("{path} → {status}: {}", error_message(&text)));
  }
  resp
    .json()
    .await
    .with_context(|| format!("deserialising {path} response"))
}

/// The `error` field of an API error body, or the raw text if it has none.
fn error_message(body: &str) -> String {
  serde_json::from_str::<ErrorBody>(body)
    .map(|b| b.error)
    .unwrap_or_else(|_| body.trim().to_owned())
}
