//! Per-object notification preferences.
//!
//! The API returns preferences as a loose JSON object: boolean channel flags sit
//! next to metadata such as the record `id` and an `email` address. The map is kept
//! as-is (insertion ordered, unknown keys included) so that writing it back only
//! changes the flags that were switched off.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// Which preference collection to address.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PreferenceKind {
    Email,
    InApp,
}

impl PreferenceKind {
    pub fn as_path(&self) -> &'static str {
        match self {
            PreferenceKind::Email => "user_email_preferences",
            PreferenceKind::InApp => "user_in_app_preferences",
        }
    }
}

impl fmt::Display for PreferenceKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            PreferenceKind::Email => write!(f, "email"),
            PreferenceKind::InApp => write!(f, "in-app"),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NotificationPreference(Map<String, Value>);

impl NotificationPreference {
    /// The preference record's own id, used as the target of a write.
    pub fn id(&self) -> Option<i64> {
        match self.0.get("id")? {
            Value::Number(n) => n
                .as_i64()
                .or_else(|| n.as_f64().filter(|f| f.fract() == 0.0).map(|f| f as i64)),
            _ => None,
        }
    }

    /// The `email` entry rendered for display.
    pub fn email(&self) -> String {
        match self.0.get("email") {
            Some(Value::String(email)) => email.clone(),
            Some(Value::Null) | None => "-".to_string(),
            Some(other) => other.to_string(),
        }
    }

    /// Channels whose flag is `true`, in map order.
    pub fn enabled_channels(&self) -> Vec<&str> {
        self.0
            .iter()
            .filter(|(_, value)| matches!(value, Value::Bool(true)))
            .map(|(key, _)| key.as_str())
            .collect()
    }

    /// Switch every `true` flag to `false`, leaving all other entries untouched.
    /// Returns how many flags were flipped.
    pub fn disable_all(&mut self) -> usize {
        let mut flipped = 0;
        for value in self.0.values_mut() {
            if matches!(value, Value::Bool(true)) {
                *value = Value::Bool(false);
                flipped += 1;
            }
        }
        flipped
    }
}
