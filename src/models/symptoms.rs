use serde::{Deserialize, Serialize};

/// Symptom intake for one case. `symptom_list` keeps presentation
/// order, not clinical significance.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SymptomRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chief_complaint: Option<String>,
    #[serde(default)]
    pub symptom_list: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub additional_symptoms: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub onset_info: Option<OnsetInfo>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OnsetInfo {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>, // YYYY-MM-DD
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<String>, // e.g. "3 Days"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub severity: Option<String>,
}
