use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Recorded lab values, grouped panel → test name → value string.
/// Tests without a recorded value are absent, never null placeholders.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LabResults(BTreeMap<String, BTreeMap<String, String>>);

impl LabResults {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(
        &mut self,
        panel: impl Into<String>,
        test: impl Into<String>,
        value: impl Into<String>,
    ) {
        self.0
            .entry(panel.into())
            .or_default()
            .insert(test.into(), value.into());
    }

    pub fn get(&self, panel: &str, test: &str) -> Option<&str> {
        self.0.get(panel).and_then(|tests| tests.get(test)).map(String::as_str)
    }

    pub fn panels(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
