use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Identifier substituted when a patient record carries no `id` key.
pub const UNKNOWN_PATIENT_ID: &str = "UNKNOWN";

/// Free-form patient demographics and history. An open key-value bag;
/// the analysis stage consumes it as serialized JSON. Known keys:
/// `id`, `first_name`, `last_name`, `age`, `gender`, `height`,
/// `weight`, `blood_type`, `allergies`, `medications`,
/// `existing_conditions`, `family_history`. All optional.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PatientData(BTreeMap<String, Value>);

impl PatientData {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.0.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The patient identifier, when present and textual.
    pub fn identifier(&self) -> Option<&str> {
        self.0.get("id").and_then(Value::as_str)
    }

    /// The identifier used in case ids: a textual `id` value, or
    /// `UNKNOWN`. A non-string `id` counts as absent.
    pub fn identifier_or_unknown(&self) -> &str {
        self.identifier().unwrap_or(UNKNOWN_PATIENT_ID)
    }
}

impl FromIterator<(String, Value)> for PatientData {
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}
