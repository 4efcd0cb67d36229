//! Analytics counters — a single mutable aggregate, updated as a side effect
//! of other dashboard operations.
//!
//! The numbers are simulated. [`AnalyticsSnapshot::refresh`] takes the chat
//! bump from the caller so that the randomness stays in the store and the
//! arithmetic here stays deterministic.

use serde::{Deserialize, Serialize};

/// Upper bound (inclusive) of the random chat bump applied on refresh.
pub const REFRESH_MAX_CHAT_BUMP: u64 = 10;

/// Amount subtracted from the fallback rate on every refresh.
pub const REFRESH_FALLBACK_STEP: f64 = 0.1;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalyticsSnapshot {
  pub total_chats:    u64,
  /// Display string, e.g. `"4.2m"`. Never computed.
  pub avg_resolution: String,
  /// Percentage of chats answered with the fallback reply. Never negative.
  pub fallback_rate:  f64,
  pub social_posts:   u64,
}

impl Default for AnalyticsSnapshot {
  fn default() -> Self {
    Self {
      total_chats:    247,
      avg_resolution: "4.2m".to_owned(),
      fallback_rate:  3.8,
      social_posts:   42,
    }
  }
}

/// A change to exactly one field of [`AnalyticsSnapshot`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "amount", rename_all = "snake_case")]
pub enum AnalyticsDelta {
  ChatIncremented(u64),
  FallbackAdjusted(f64),
  SocialPostIncremented(u64),
}

impl AnalyticsSnapshot {
  pub fn apply(&mut self, delta: AnalyticsDelta) {
    match delta {
      AnalyticsDelta::ChatIncremented(n) => {
        self.total_chats = self.total_chats.saturating_add(n);
      }
      AnalyticsDelta::FallbackAdjusted(by) => {
        self.fallback_rate = floor_rate(self.fallback_rate + by);
      }
      AnalyticsDelta::SocialPostIncremented(n) => {
        self.social_posts = self.social_posts.saturating_add(n);
      }
    }
  }

  /// Add `chat_bump` chats and step the fallback rate down, floored at zero.
  ///
  /// The rate is left at one decimal place so repeated 0.1 steps don't drift
  /// into values like `3.6999999`.
  pub fn refresh(&mut self, chat_bump: u64) {
    self.apply(AnalyticsDelta::ChatIncremented(
      chat_bump.min(REFRESH_MAX_CHAT_BUMP),
    ));
    self.apply(AnalyticsDelta::FallbackAdjusted(-REFRESH_FALLBACK_STEP));
    self.fallback_rate = (self.fallback_rate * 10.0).round() / 10.0;
  }
}

fn floor_rate(rate: f64) -> f64 {
  if rate.is_nan() || rate < 0.0 { 0.0 } else { rate }
}
