//! State-change events pushed to connected dashboards.
//!
//! Serialised as `{"event": "<name>", "data": <payload>}`.

use serde::{Deserialize, Serialize};

use crate::{
  ai_config::AiConfig, analytics::AnalyticsSnapshot, chat::ChatTurn, crm::CrmEvent,
  social::SocialPost, training::TrainingProfile,
};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", content = "data", rename_all = "snake_case")]
pub enum DashboardEvent {
  ChatLogged { user: ChatTurn, assistant: ChatTurn },
  PostPublished(SocialPost),
  CrmLogged(CrmEvent),
  AnalyticsUpdated(AnalyticsSnapshot),
  ConfigSaved(AiConfig),
  TrainingUpdated(TrainingProfile),
}

impl DashboardEvent {
  pub fn name(&self) -> &'static str {
    match self {
      Self::ChatLogged { .. } => "chat_logged",
      Self::PostPublished(_) => "post_published",
      Self::CrmLogged(_) => "crm_logged",
      Self::AnalyticsUpdated(_) => "analytics_updated",
      Self::ConfigSaved(_) => "config_saved",
      Self::TrainingUpdated(_) => "training_updated",
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::crm;

  #[test]
  fn wire_shape_is_event_plus_data() {
    let event = DashboardEvent::CrmLogged(CrmEvent::new(crm::HANDOFF));
    let json = serde_json::to_value(&event).unwrap();
    assert_eq!(json["event"], event.name());
    assert_eq!(json["data"]["text"], crm::HANDOFF);
  }
}
