//! Keyword intent matcher.
//!
//! Input text is lower-cased and searched for a fixed set of keywords. Rules
//! are checked in order and the first hit wins, so a message mentioning both
//! an order and a refund is treated as an order enquiry.

use strum::{AsRefStr, Display, EnumIter, EnumString};

use crate::training::TrainingProfile;

/// Reply used when no rule matches.
pub const FALLBACK_REPLY: &str =
  "Thank you for your message. How can I assist you today?";

/// A named category of customer request. The snake_case name is the key into
/// [`TrainingProfile::intents`].
#[derive(
  Debug, Clone, Copy, PartialEq, Eq, Hash, AsRefStr, Display, EnumIter, EnumString,
)]
#[strum(serialize_all = "snake_case")]
pub enum Intent {
  OrderStatus,
  ProductInfo,
  Refund,
  Technical,
}

/// Keyword rules in priority order.
const RULES: &[(&[&str], Intent)] = &[
  (&["order"], Intent::OrderStatus),
  (&["product"], Intent::ProductInfo),
  (&["refund"], Intent::Refund),
  (&["technical", "help"], Intent::Technical),
];

impl Intent {
  /// The template this intent starts with before any training edits.
  pub fn seed_template(self) -> &'static str {
    match self {
      Self::OrderStatus => {
        "Thank you for your inquiry. I can help you check your order status."
      }
      Self::ProductInfo => {
        "I'd be happy to provide information about our products."
      }
      Self::Refund => {
        "I understand you're requesting a refund. Let me assist you with that."
      }
      Self::Technical => {
        "For technical support, please provide more details about the issue."
      }
    }
  }
}

/// Classify `text`, or `None` if no keyword matches.
pub fn classify(text: &str) -> Option<Intent> {
  let lower = text.to_lowercase();
  RULES
    .iter()
    .find(|(keywords, _)| keywords.iter().any(|k| lower.contains(k)))
    .map(|(_, intent)| *intent)
}

/// The canned reply for `text` under the current training profile.
pub fn respond(text: &str, profile: &TrainingProfile) -> String {
  match classify(text) {
    Some(intent) => profile.template(intent).to_owned(),
    None => FALLBACK_REPLY.to_owned(),
  }
}

#[cfg(test)]
mod tests {
  use std::str::FromStr;

  use super::*;
  use crate::training::TrainingUpdate;

  #[test]
  fn order_keyword_is_case_insensitive() {
    let profile = TrainingProfile::default();
    for text in ["Where is my order?", "ORDER 1234", "reorder please"] {
      assert_eq!(classify(text), Some(Intent::OrderStatus), "{text}");
      assert_eq!(respond(text, &profile), Intent::OrderStatus.seed_template());
    }
  }

  #[test]
  fn earlier_rule_wins() {
    assert_eq!(classify("refund my order"), Some(Intent::OrderStatus));
    assert_eq!(classify("product refund"), Some(Intent::ProductInfo));
    assert_eq!(classify("refund, I need help"), Some(Intent::Refund));
  }

  #[test]
  fn technical_matches_either_keyword() {
    assert_eq!(classify("Technical issue"), Some(Intent::Technical));
    assert_eq!(classify("can you HELP me"), Some(Intent::Technical));
  }

  #[test]
  fn no_match_yields_fallback() {
    let profile = TrainingProfile::default();
    assert_eq!(classify("good morning"), None);
    assert_eq!(respond("good morning", &profile), FALLBACK_REPLY);
  }

  #[test]
  fn reply_follows_training_edits() {
    let mut profile = TrainingProfile::default();
    profile.apply(TrainingUpdate::new(None, Some("refund".into()), Some("X".into())));
    assert_eq!(respond("I want a refund", &profile), "X");
  }

  #[test]
  fn intent_names_round_trip_through_strum() {
    assert_eq!(Intent::OrderStatus.as_ref(), "order_status");
    assert_eq!(Intent::from_str("product_info").unwrap(), Intent::ProductInfo);
  }
}
