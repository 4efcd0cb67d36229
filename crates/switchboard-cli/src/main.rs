//! `switchboard` — command-line client for the Switchboard dashboard.
//!
//! # Usage
//!
//! ```
//! switchboard chat "Where is my order?"
//! switchboard post "Spring sale starts now" --platform twitter --auto
//! switchboard --url http://localhost:5000 show crm
//! ```

mod client;

use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand, ValueEnum};
use client::{ApiClient, ConfigRequest, NewPostRequest};
use serde::Deserialize;
use switchboard_core::chat::Role;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

const DEFAULT_URL: &str = "http://127.0.0.1:5000";

// ─── CLI args ─────────────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(name = "switchboard", about = "Command-line client for the Switchboard dashboard")]
struct Args {
  /// Path to a TOML config file (url).
  #[arg(short, long, value_name = "FILE")]
  config: Option<PathBuf>,

  /// Base URL of the dashboard server (default: http://127.0.0.1:5000).
  #[arg(long, env = "SWITCHBOARD_URL")]
  url: Option<String>,

  #[command(subcommand)]
  command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
  /// Send a customer message and print the assistant's reply.
  Chat { message: String },
  /// Hand the current conversation off to a human agent.
  Handoff,
  /// Publish a social post.
  Post {
    message: String,
    #[arg(long)]
    platform: Option<String>,
    /// When to post, e.g. 2026-05-01T09:00.
    #[arg(long)]
    schedule: Option<String>,
    /// Register an auto-post job for this post.
    #[arg(long = "auto")]
    auto_post: bool,
  },
  /// Run a manual CRM sync.
  SyncCrm {
    #[arg(long)]
    endpoint: String,
    #[arg(long, env = "SWITCHBOARD_CRM_API_KEY", hide_env_values = true)]
    api_key: String,
  },
  /// Update the brand voice and/or one intent's response template.
  Train {
    #[arg(long)]
    brand_voice: Option<String>,
    #[arg(long, requires = "template")]
    intent: Option<String>,
    #[arg(long, requires = "intent")]
    template: Option<String>,
  },
  /// Change AI configuration fields; omitted fields keep their value.
  Config {
    #[arg(long)]
    model: Option<String>,
    #[arg(long)]
    timeout: Option<u32>,
    #[arg(long)]
    max_length: Option<u32>,
    #[arg(long)]
    analytics: Option<bool>,
  },
  /// Refresh the simulated analytics and print them.
  Refresh,
  /// Print part of the dashboard state.
  Show {
    #[arg(value_enum)]
    view: View,
  },
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum View {
  Chats,
  Crm,
  Posts,
  Analytics,
  Training,
  Config,
  Jobs,
}

// ─── Config file ──────────────────────────────────────────────────────────────

/// Shape of the optional TOML config file.
#[derive(Deserialize, Default)]
struct ConfigFile {
  #[serde(default)]
  url: String,
}

/// `--url`/`SWITCHBOARD_URL`, then the config file, then the default.
fn resolve_url(flag: Option<String>, file: &ConfigFile) -> String {
  flag
    .or_else(|| (!file.url.is_empty()).then(|| file.url.clone()))
    .unwrap_or_else(|| DEFAULT_URL.to_string())
}

// ─── Entry point ──────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> Result<()> {
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::WARN.into())
        .from_env_lossy(),
    )
    .with_writer(std::io::stderr)
    .init();

  let args = Args::parse();

  let file_cfg: ConfigFile = if let Some(path) = &args.config {
    let raw = std::fs::read_to_string(path)
      .with_context(|| format!("reading config file {}", path.display()))?;
    toml::from_str(&raw).context("parsing config file")?
  } else {
    ConfigFile::default()
  };

  let base_url = resolve_url(args.url, &file_cfg);
  tracing::debug!(%base_url, "using server");
  let client = ApiClient::new(base_url)?;

  run(&client, args.command).await
}

async fn run(client: &ApiClient, command: Command) -> Result<()> {
  match command {
    Command::Chat { message } => {
      println!("{}", client.send_chat(&message).await?);
    }
    Command::Handoff => {
      client.handoff().await?;
      println!("Chat handed off to a human agent.");
    }
    Command::Post { message, platform, schedule, auto_post } => {
      let id = client
        .publish_post(&NewPostRequest {
          platform,
          message,
          schedule_time: schedule,
          auto_post,
        })
        .await?;
      println!("Published post #{id}.");
    }
    Command::SyncCrm { endpoint, api_key } => {
      client.sync_crm(&endpoint, &api_key).await?;
      println!("CRM sync completed.");
    }
    Command::Train { brand_voice, intent, template } => {
      let intent = intent.as_deref().zip(template.as_deref());
      client.update_training(brand_voice.as_deref(), intent).await?;
      println!("Training updated.");
    }
    Command::Config { model, timeout, max_length, analytics } => {
      client
        .save_config(&ConfigRequest {
          model,
          timeout,
          max_length,
          analytics_enabled: analytics,
        })
        .await?;
      print_json(&client.ai_config().await?)?;
    }
    Command::Refresh => print_json(&client.refresh_stats().await?)?,
    Command::Show { view } => show(client, view).await?,
  }
  Ok(())
}

async fn show(client: &ApiClient, view: View) -> Result<()> {
  match view {
    View::Chats => {
      for turn in client.chats().await? {
        let who = match turn.role {
          Role::User => "customer",
          Role::Assistant => "assistant",
        };
        println!("{} {who:>9}: {}", stamp(&turn.timestamp), turn.text);
      }
    }
    View::Crm => {
      for event in client.crm_events().await? {
        println!("{} {}", stamp(&event.timestamp), event.text);
      }
    }
    View::Posts => {
      for post in client.posts().await? {
        let when = post.scheduled_time.as_deref().unwrap_or("now");
        let auto = if post.auto_post { " [auto]" } else { "" };
        println!("#{:<4} {:<10} {when:<16}{auto} {}", post.id, post.platform, post.message);
      }
    }
    View::Analytics => print_json(&client.analytics().await?)?,
    View::Training => print_json(&client.training().await?)?,
    View::Config => print_json(&client.ai_config().await?)?,
    View::Jobs => print_json(&client.jobs().await?)?,
  }
  Ok(())
}

fn stamp(ts: &DateTime<Utc>) -> String { ts.format("%Y-%m-%d %H:%M:%S").to_string() }

fn print_json(value: &impl serde::Serialize) -> Result<()> {
  println!("{}", serde_json::to_string_pretty(value).context("formatting output")?);
  Ok(())
}
