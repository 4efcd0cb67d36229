//! Training profile — brand voice plus the response template per intent.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator as _;

use crate::intent::Intent;

pub const SEED_BRAND_VOICE: &str = "Friendly, professional, and \
  solution-focused. Use clear language and avoid jargon.";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrainingProfile {
  pub brand_voice: String,
  /// Intent name → response template. Keys beyond the built-in intents are
  /// kept and displayed but never matched.
  pub intents:     BTreeMap<String, String>,
}

impl Default for TrainingProfile {
  fn default() -> Self {
    Self {
      brand_voice: SEED_BRAND_VOICE.to_owned(),
      intents:     Intent::iter()
        .map(|i| (i.as_ref().to_owned(), i.seed_template().to_owned()))
        .collect(),
    }
  }
}

impl TrainingProfile {
  /// The current template for `intent`, falling back to its seed.
  pub fn template(&self, intent: Intent) -> &str {
    self
      .intents
      .get(intent.as_ref())
      .map(String::as_str)
      .unwrap_or_else(|| intent.seed_template())
  }

  pub fn apply(&mut self, update: TrainingUpdate) {
    if let Some(voice) = update.brand_voice {
      self.brand_voice = voice;
    }
    if let Some((intent, template)) = update.intent {
      self.intents.insert(intent, template);
    }
  }
}

/// A training edit. An intent template is only applied when both the
/// intent name and the template are present.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TrainingUpdate {
  pub brand_voice: Option<String>,
  pub intent:      Option<(String, String)>,
}

impl TrainingUpdate {
  /// Build from loosely-typed request fields. Blank strings count as absent.
  pub fn new(
    brand_voice: Option<String>,
    intent: Option<String>,
    template: Option<String>,
  ) -> Self {
    let non_blank = |s: Option<String>| s.filter(|s| !s.trim().is_empty());
    Self {
      brand_voice: non_blank(brand_voice),
      intent:      non_blank(intent)
        .map(|i| i.trim().to_owned())
        .zip(non_blank(template)),
    }
  }
}
