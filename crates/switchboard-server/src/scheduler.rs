//! Background runner for the job registry.
//!
//! Sleeps for one interval, takes every job whose due time has passed,
//! executes them in due order, and goes back to sleep. A failing job is
//! logged and does not stop the loop.

use std::time::Duration;

use chrono::{DateTime, Utc};
use switchboard_api::ApiState;
use switchboard_core::{
  crm::CrmEvent,
  event::DashboardEvent,
  job::{JobKind, ScheduledJob},
  store::DashboardStore,
};
use tokio::{
  sync::oneshot,
  task::JoinHandle,
  time::{self, Instant},
};

use crate::error::Error;

// ─── Handle ───────────────────────────────────────────────────────────────────

/// A running scheduler. Dropping the handle without calling
/// [`SchedulerHandle::shutdown`] leaves the task running until the runtime
/// exits.
pub struct SchedulerHandle {
  stop: oneshot::Sender<()>,
  task: JoinHandle<()>,
}

impl SchedulerHandle {
  /// Signal the loop to stop and wait for it to finish its current tick.
  pub async fn shutdown(self) {
    let _ = self.stop.send(());
    if let Err(e) = self.task.await {
      tracing::error!(error = %e, "scheduler task ended abnormally");
    }
  }
}

/// Start the runner. The first tick happens one `period` from now.
pub fn spawn<S>(state: ApiState<S>, period: Duration) -> SchedulerHandle
where
  S: DashboardStore + 'static,
{
  let (stop, mut stopped) = oneshot::channel();

  let task = tokio::spawn(async move {
    tracing::info!(interval_secs = period.as_secs(), "scheduler starting");
    let mut ticker = time::interval_at(Instant::now() + period, period);

    loop {
      tokio::select! {
        // A dropped handle closes the channel without a value; only an
        // explicit shutdown stops the loop.
        Ok(()) = &mut stopped => {
          tracing::info!("scheduler stopping");
          break;
        }
        _ = ticker.tick() => {
          let report = run_due_jobs(&state, Utc::now()).await;
          if report.executed + report.failed > 0 {
            tracing::info!(
              executed = report.executed,
              failed = report.failed,
              "scheduler tick"
            );
          }
        }
      }
    }
  });

  SchedulerHandle { stop, task }
}

// ─── Tick ─────────────────────────────────────────────────────────────────────

/// Outcome of one pass over the registry.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct TickReport {
  pub executed: usize,
  pub failed:   usize,
}

/// Run every job due at `now`.
pub async fn run_due_jobs<S>(state: &ApiState<S>, now: DateTime<Utc>) -> TickReport
where
  S: DashboardStore + 'static,
{
  let mut report = TickReport::default();

  let jobs = match state.store.take_due_jobs(now).await {
    Ok(jobs) => jobs,
    Err(e) => {
      tracing::error!(error = %e, "failed to read job registry");
      return report;
    }
  };

  for job in jobs {
    let job_id = job.job_id;
    // Each job runs in its own task so a panic is contained to that job.
    let outcome = tokio::spawn(execute(state.clone(), job)).await;
    match outcome {
      Ok(Ok(())) => report.executed += 1,
      Ok(Err(e)) => {
        tracing::warn!(%job_id, error = %e, "job failed");
        report.failed += 1;
      }
      Err(e) => {
        tracing::error!(%job_id, error = %e, "job panicked");
        report.failed += 1;
      }
    }
  }

  report
}

async fn execute<S>(state: ApiState<S>, job: ScheduledJob) -> Result<(), Error>
where
  S: DashboardStore + 'static,
{
  match job.kind {
    JobKind::AutoPost { post_id } => {
      let post = state
        .store
        .get_social_post(post_id)
        .await
        .map_err(Error::store)?
        .ok_or(switchboard_core::Error::PostNotFound(post_id))?;

      let event = state
        .store
        .log_crm_event(CrmEvent::auto_posted(post.id, &post.platform))
        .await
        .map_err(Error::store)?;
      tracing::info!(job_id = %job.job_id, post_id, platform = %post.platform, "auto-post published");
      state.events.publish(DashboardEvent::CrmLogged(event));
      Ok(())
    }
  }
}

// ─── Tests ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
  use std::sync::Arc;

  use chrono::Duration as ChronoDuration;
  use switchboard_api::EventBus;
  use switchboard_core::social::NewPost;
  use switchboard_store_memory::MemoryStore;
  use uuid::Uuid;

  use super::*;

  fn state() -> ApiState<MemoryStore> {
    ApiState::new(Arc::new(MemoryStore::new()), EventBus::new(16))
  }

  async fn publish(state: &ApiState<MemoryStore>, platform: &str) -> u64 {
    let post = NewPost::new(
      Some(platform.into()),
      Some("launch day".into()),
      None,
      Some(true),
    )
    .unwrap();
    state.store.log_social_post(post).await.unwrap().id
  }

  fn job(post_id: u64, due_at: DateTime<Utc>) -> ScheduledJob {
    ScheduledJob {
      job_id: Uuid::new_v4(),
      due_at,
      kind: JobKind::AutoPost { post_id },
    }
  }

  #[tokio::test]
  async fn past_due_job_runs_and_logs_crm_event() {
    let state = state();
    let mut rx = state.events.subscribe();
    let id = publish(&state, "twitter").await;
    let now = Utc::now();
    state
      .store
      .schedule_job(job(id, now - ChronoDuration::minutes(5)))
      .await
      .unwrap();

    let report = run_due_jobs(&state, now).await;
    assert_eq!(report, TickReport { executed: 1, failed: 0 });

    let crm = state.store.crm_events().await.unwrap();
    assert_eq!(crm.last().unwrap().text, format!("Auto-post #{id} published to twitter"));
    assert!(state.store.pending_jobs().await.unwrap().is_empty());
    assert!(matches!(rx.recv().await.unwrap(), DashboardEvent::CrmLogged(_)));
  }

  #[tokio::test]
  async fn future_job_stays_pending() {
    let state = state();
    let id = publish(&state, "linkedin").await;
    let now = Utc::now();
    state
      .store
      .schedule_job(job(id, now + ChronoDuration::hours(1)))
      .await
      .unwrap();

    assert_eq!(run_due_jobs(&state, now).await, TickReport::default());
    assert_eq!(state.store.pending_jobs().await.unwrap().len(), 1);
    assert!(state.store.crm_events().await.unwrap().is_empty());
  }

  #[tokio::test]
  async fn failing_job_does_not_stop_the_rest() {
    let state = state();
    let id = publish(&state, "facebook").await;
    let now = Utc::now();
    state
      .store
      .schedule_job(job(999, now - ChronoDuration::minutes(2)))
      .await
      .unwrap();
    state
      .store
      .schedule_job(job(id, now - ChronoDuration::minutes(1)))
      .await
      .unwrap();

    let report = run_due_jobs(&state, now).await;
    assert_eq!(report, TickReport { executed: 1, failed: 1 });
    assert_eq!(state.store.crm_events().await.unwrap().len(), 1);
  }

  #[tokio::test]
  async fn dropped_handle_leaves_runner_going() {
    let state = state();
    drop(spawn(state.clone(), std::time::Duration::from_millis(20)));

    let id = publish(&state, "mastodon").await;
    state
      .store
      .schedule_job(job(id, Utc::now() - ChronoDuration::seconds(1)))
      .await
      .unwrap();

    let mut ran = false;
    for _ in 0..100 {
      time::sleep(std::time::Duration::from_millis(10)).await;
      if !state.store.crm_events().await.unwrap().is_empty() {
        ran = true;
        break;
      }
    }

    assert!(ran, "runner stopped when its handle was dropped");
    assert!(state.store.pending_jobs().await.unwrap().is_empty());
  }

  #[tokio::test]
  async fn spawned_runner_executes_jobs_and_shuts_down() {
    let state = state();
    let id = publish(&state, "instagram").await;
    state
      .store
      .schedule_job(job(999, Utc::now() - ChronoDuration::seconds(1)))
      .await
      .unwrap();
    state
      .store
      .schedule_job(job(id, Utc::now() - ChronoDuration::seconds(1)))
      .await
      .unwrap();

    let handle = spawn(state.clone(), std::time::Duration::from_millis(20));
    let mut ran = false;
    for _ in 0..100 {
      time::sleep(std::time::Duration::from_millis(10)).await;
      if !state.store.crm_events().await.unwrap().is_empty() {
        ran = true;
        break;
      }
    }
    handle.shutdown().await;

    assert!(ran, "runner never executed the due job");
    assert!(state.store.pending_jobs().await.unwrap().is_empty());
  }
}
