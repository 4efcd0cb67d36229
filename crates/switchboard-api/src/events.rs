//! Fan-out of [`DashboardEvent`]s to every connected dashboard.

use switchboard_core::event::DashboardEvent;
use tokio::sync::broadcast;

/// Broadcast channel for state-change events.
///
/// Publishing never blocks and never fails: with no subscribers the event is
/// dropped, and a subscriber that falls more than `capacity` events behind
/// skips ahead.
#[derive(Clone)]
pub struct EventBus {
  tx: broadcast::Sender<DashboardEvent>,
}

impl EventBus {
  pub fn new(capacity: usize) -> Self {
    let (tx, _) = broadcast::channel(capacity.max(1));
    Self { tx }
  }

  pub fn publish(&self, event: DashboardEvent) {
    let name = event.name();
    match self.tx.send(event) {
      Ok(receivers) => tracing::trace!(event = name, receivers, "event published"),
      Err(_) => tracing::trace!(event = name, "event dropped, no subscribers"),
    }
  }

  pub fn subscribe(&self) -> broadcast::Receiver<DashboardEvent> {
    self.tx.subscribe()
  }
}

impl Default for EventBus {
  fn default() -> Self { Self::new(64) }
}

#[cfg(test)]
mod tests {
  use switchboard_core::{crm::CrmEvent, event::DashboardEvent};

  use super::*;

  #[tokio::test]
  async fn subscribers_receive_published_events() {
    let bus = EventBus::new(4);
    let mut rx = bus.subscribe();
    let event = DashboardEvent::CrmLogged(CrmEvent::new("x"));
    bus.publish(event.clone());
    assert_eq!(rx.recv().await.unwrap(), event);
  }

  #[test]
  fn publishing_without_subscribers_is_harmless() {
    EventBus::new(1).publish(DashboardEvent::CrmLogged(CrmEvent::new("x")));
  }
}
