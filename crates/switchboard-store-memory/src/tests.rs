//! Integration tests for `MemoryStore`.

use chrono::{Duration, Utc};
use switchboard_core::{
  ai_config::{AiConfig, ConfigPatch},
  analytics::{AnalyticsDelta, AnalyticsSnapshot},
  chat::{ChatTurn, Role},
  crm::CrmEvent,
  job::{JobKind, ScheduledJob},
  social::NewPost,
  store::DashboardStore,
  training::{TrainingProfile, TrainingUpdate},
};

use crate::MemoryStore;

fn new_post(message: &str) -> NewPost {
  NewPost::new(Some("twitter".into()), Some(message.into()), None, None)
    .expect("valid post")
}

// ─── Chat log ────────────────────────────────────────────────────────────────

#[tokio::test]
async fn chat_log_preserves_order() {
  let s = MemoryStore::new();
  s.log_chat(ChatTurn::user("one")).await.unwrap();
  s.log_exchange(ChatTurn::user("two"), ChatTurn::assistant("reply"))
    .await
    .unwrap();

  let chats = s.chats().await.unwrap();
  let texts: Vec<_> = chats.iter().map(|t| t.text.as_str()).collect();
  assert_eq!(texts, ["one", "two", "reply"]);
  assert_eq!(chats[2].role, Role::Assistant);
}

#[tokio::test]
async fn concurrent_exchanges_stay_paired() {
  let s = MemoryStore::new();
  let m = 64;

  let handles: Vec<_> = (0..m)
    .map(|i| {
      let s = s.clone();
      tokio::spawn(async move {
        s.log_exchange(
          ChatTurn::user(format!("q{i}")),
          ChatTurn::assistant(format!("a{i}")),
        )
        .await
        .unwrap();
      })
    })
    .collect();
  for h in handles {
    h.await.unwrap();
  }

  let chats = s.chats().await.unwrap();
  assert_eq!(chats.len(), 2 * m);
  for pair in chats.chunks(2) {
    assert_eq!(pair[0].role, Role::User);
    assert_eq!(pair[1].role, Role::Assistant);
    assert_eq!(pair[0].text[1..], pair[1].text[1..]);
  }
}

// ─── CRM log ─────────────────────────────────────────────────────────────────

#[tokio::test]
async fn crm_log_is_append_only() {
  let s = MemoryStore::new();
  assert!(s.crm_events().await.unwrap().is_empty());

  s.log_crm_event(CrmEvent::new("first")).await.unwrap();
  s.log_crm_event(CrmEvent::post_scheduled("facebook")).await.unwrap();

  let events = s.crm_events().await.unwrap();
  assert_eq!(events.len(), 2);
  assert_eq!(events[0].text, "first");
  assert_eq!(events[1].text, "Social post scheduled for facebook");
}

// ─── Social posts ────────────────────────────────────────────────────────────

#[tokio::test]
async fn post_ids_are_sequential_from_one() {
  let s = MemoryStore::new();
  for n in 1..=10u64 {
    let post = s.log_social_post(new_post(&format!("post {n}"))).await.unwrap();
    assert_eq!(post.id, n);
  }
  let ids: Vec<_> = s.social_posts().await.unwrap().iter().map(|p| p.id).collect();
  assert_eq!(ids, (1..=10).collect::<Vec<_>>());
}

#[tokio::test]
async fn concurrent_posts_get_unique_ids() {
  let s = MemoryStore::new();
  let handles: Vec<_> = (0..32)
    .map(|i| {
      let s = s.clone();
      tokio::spawn(async move { s.log_social_post(new_post(&format!("p{i}"))).await.unwrap().id })
    })
    .collect();

  let mut ids = Vec::new();
  for h in handles {
    ids.push(h.await.unwrap());
  }
  ids.sort_unstable();
  assert_eq!(ids, (1..=32).collect::<Vec<_>>());
}

#[tokio::test]
async fn blank_post_is_rejected_by_store() {
  let s = MemoryStore::new();
  let post = NewPost {
    platform:       "x".into(),
    message:        " ".into(),
    scheduled_time: None,
    auto_post:      false,
  };
  assert!(s.log_social_post(post).await.is_err());
  assert!(s.social_posts().await.unwrap().is_empty());
}

#[tokio::test]
async fn get_social_post_by_id() {
  let s = MemoryStore::new();
  s.log_social_post(new_post("a")).await.unwrap();
  let b = s.log_social_post(new_post("b")).await.unwrap();

  assert_eq!(s.get_social_post(b.id).await.unwrap(), Some(b));
  assert_eq!(s.get_social_post(99).await.unwrap(), None);
}

// ─── Analytics ───────────────────────────────────────────────────────────────

#[tokio::test]
async fn analytics_start_at_seed_values() {
  let s = MemoryStore::new();
  assert_eq!(s.analytics().await.unwrap(), AnalyticsSnapshot::default());
}

#[tokio::test]
async fn concurrent_deltas_are_not_lost() {
  let s = MemoryStore::new();
  let handles: Vec<_> = (0..100)
    .map(|_| {
      let s = s.clone();
      tokio::spawn(async move {
        s.apply_delta(AnalyticsDelta::ChatIncremented(1)).await.unwrap();
      })
    })
    .collect();
  for h in handles {
    h.await.unwrap();
  }
  assert_eq!(s.analytics().await.unwrap().total_chats, 247 + 100);
}

#[tokio::test]
async fn refresh_is_bounded_and_never_negative() {
  let s = MemoryStore::new();
  let mut previous = s.analytics().await.unwrap();
  for _ in 0..60 {
    let next = s.refresh_analytics().await.unwrap();
    let bump = next.total_chats - previous.total_chats;
    assert!(bump <= 10, "bump {bump} out of range");
    assert!(next.fallback_rate >= 0.0);
    assert_eq!(next.social_posts, previous.social_posts);
    previous = next;
  }
  assert_eq!(previous.fallback_rate, 0.0);
}

// ─── Config & training ───────────────────────────────────────────────────────

#[tokio::test]
async fn config_save_merges() {
  let s = MemoryStore::with_ai_config(AiConfig {
    model: "gpt35".into(),
    ..AiConfig::default()
  });
  let saved = s
    .save_ai_config(ConfigPatch {
      max_length: Some(50),
      ..ConfigPatch::default()
    })
    .await
    .unwrap();
  assert_eq!(saved.model, "gpt35");
  assert_eq!(saved.max_length, 50);
  assert_eq!(s.ai_config().await.unwrap(), saved);
}

#[tokio::test]
async fn training_update_overwrites_by_key() {
  let s = MemoryStore::new();
  let updated = s
    .update_training(TrainingUpdate::new(None, Some("refund".into()), Some("X".into())))
    .await
    .unwrap();
  assert_eq!(updated.intents["refund"], "X");
  assert_eq!(updated.brand_voice, TrainingProfile::default().brand_voice);
  assert_eq!(s.training().await.unwrap(), updated);
}

// ─── Job registry ────────────────────────────────────────────────────────────

#[tokio::test]
async fn take_due_jobs_leaves_future_jobs() {
  let s = MemoryStore::new();
  let post = s
    .log_social_post(NewPost {
      auto_post: true,
      ..new_post("later")
    })
    .await
    .unwrap();
  let now = Utc::now();

  let soon = ScheduledJob::auto_post(&post, now);
  let mut later = ScheduledJob::auto_post(&post, now);
  later.due_at = now + Duration::hours(1);
  s.schedule_job(later.clone()).await.unwrap();
  s.schedule_job(soon.clone()).await.unwrap();

  let due = s.take_due_jobs(now).await.unwrap();
  assert_eq!(due, vec![soon]);
  assert_eq!(due[0].kind, JobKind::AutoPost { post_id: post.id });
  assert_eq!(s.pending_jobs().await.unwrap(), vec![later.clone()]);

  // Taken jobs are gone.
  assert!(s.take_due_jobs(now).await.unwrap().is_empty());
  let due = s.take_due_jobs(now + Duration::hours(2)).await.unwrap();
  assert_eq!(due, vec![later]);
  assert!(s.pending_jobs().await.unwrap().is_empty());
}
