//! The AI assistant configuration record and its typed patch.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{Error, Result};

/// Settings for the (simulated) AI backend. `timeout_seconds` is stored and
/// displayed but not enforced anywhere.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AiConfig {
  pub model:             String,
  pub timeout_seconds:   u32,
  pub max_length:        u32,
  pub analytics_enabled: bool,
}

impl Default for AiConfig {
  fn default() -> Self {
    Self {
      model:             "gpt4".to_owned(),
      timeout_seconds:   30,
      max_length:        10,
      analytics_enabled: true,
    }
  }
}

/// The fields a save request may change. `None` keeps the current value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigPatch {
  pub model:             Option<String>,
  pub timeout_seconds:   Option<u32>,
  pub max_length:        Option<u32>,
  pub analytics_enabled: Option<bool>,
}

impl ConfigPatch {
  /// Validate loosely-typed request values.
  ///
  /// Numbers may arrive as JSON numbers or numeric strings (HTML forms send
  /// the latter); booleans as JSON booleans or `"true"`/`"false"`. Anything
  /// else fails with [`Error::InvalidConfigValue`]. JSON `null` is treated as
  /// absent.
  pub fn from_values(
    model: Option<String>,
    timeout: Option<&Value>,
    max_length: Option<&Value>,
    analytics_enabled: Option<&Value>,
  ) -> Result<Self> {
    Ok(Self {
      model:             model.filter(|m| !m.trim().is_empty()),
      timeout_seconds:   present(timeout).map(|v| parse_count("timeout", v)).transpose()?,
      max_length:        present(max_length).map(|v| parse_count("max_length", v)).transpose()?,
      analytics_enabled: present(analytics_enabled)
        .map(|v| parse_flag("analytics_enabled", v))
        .transpose()?,
    })
  }

  pub fn is_empty(&self) -> bool { *self == Self::default() }
}

impl AiConfig {
  /// Merge `patch` into `self`; unspecified fields keep their value.
  pub fn apply(&mut self, patch: ConfigPatch) {
    if let Some(model) = patch.model {
      self.model = model;
    }
    if let Some(timeout) = patch.timeout_seconds {
      self.timeout_seconds = timeout;
    }
    if let Some(max_length) = patch.max_length {
      self.max_length = max_length;
    }
    if let Some(enabled) = patch.analytics_enabled {
      self.analytics_enabled = enabled;
    }
  }
}

fn present(value: Option<&Value>) -> Option<&Value> {
  value.filter(|v| !v.is_null())
}

fn invalid(field: &'static str, value: &Value) -> Error {
  Error::InvalidConfigValue {
    field,
    value: value.to_string(),
  }
}

fn parse_count(field: &'static str, value: &Value) -> Result<u32> {
  match value {
    Value::Number(n) => n
      .as_u64()
      .and_then(|n| u32::try_from(n).ok())
      .ok_or_else(|| invalid(field, value)),
    Value::String(s) => s.trim().parse().map_err(|_| invalid(field, value)),
    _ => Err(invalid(field, value)),
  }
}

fn parse_flag(field: &'static str, value: &Value) -> Result<bool> {
  match value {
    Value::Bool(b) => Ok(*b),
    Value::String(s) => match s.trim() {
      "true" => Ok(true),
      "false" => Ok(false),
      _ => Err(invalid(field, value)),
    },
    _ => Err(invalid(field, value)),
  }
}
