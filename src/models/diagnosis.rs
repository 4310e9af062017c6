use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Terminal artifact of a case: either the model's report or a failure
/// record. The two shapes share one file on disk, discriminated by a
/// string `error` value, so consumers must check [`Diagnosis::is_failure`]
/// before reading report fields. [`Diagnosis::report`] applies the same
/// rule when it builds the record.
///
/// Variant order matters: `serde(untagged)` tries `Failure` first, and
/// only a document carrying a string `error` matches it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Diagnosis {
    Failure(DiagnosisFailure),
    Report(DiagnosisReport),
}

/// A successfully extracted report. `fields` holds whatever mapping the
/// model produced, unvalidated; `case_id` and `timestamp` are stamped
/// by the pipeline and always win over model-supplied values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiagnosisReport {
    pub case_id: String,
    pub timestamp: String, // YYYY-MM-DD HH:MM:SS, local time
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiagnosisFailure {
    pub case_id: String,
    pub timestamp: String, // YYYY-MM-DD HH:MM:SS, local time
    pub error: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub raw_result: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DifferentialDiagnosis {
    pub condition: String,
    pub probability: f64,
}

impl Diagnosis {
    /// Build the terminal record for an extracted mapping, stamping
    /// `case_id` and `timestamp`. Model-supplied values under those two
    /// keys are dropped. A mapping that itself carries a string `error`
    /// value builds the failure record, the same rule the deserializer
    /// applies on read-back.
    pub fn report(
        case_id: impl Into<String>,
        timestamp: impl Into<String>,
        mut fields: Map<String, Value>,
    ) -> Self {
        fields.remove("case_id");
        fields.remove("timestamp");
        if let Some(Value::String(error)) = fields.get("error") {
            return Diagnosis::failure(case_id, timestamp, error.clone(), None);
        }
        Diagnosis::Report(DiagnosisReport {
            case_id: case_id.into(),
            timestamp: timestamp.into(),
            fields,
        })
    }

    pub fn failure(
        case_id: impl Into<String>,
        timestamp: impl Into<String>,
        error: impl Into<String>,
        raw_result: Option<String>,
    ) -> Self {
        Diagnosis::Failure(DiagnosisFailure {
            case_id: case_id.into(),
            timestamp: timestamp.into(),
            error: error.into(),
            raw_result,
        })
    }

    pub fn case_id(&self) -> &str {
        match self {
            Diagnosis::Failure(f) => &f.case_id,
            Diagnosis::Report(r) => &r.case_id,
        }
    }

    pub fn timestamp(&self) -> &str {
        match self {
            Diagnosis::Failure(f) => &f.timestamp,
            Diagnosis::Report(r) => &r.timestamp,
        }
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, Diagnosis::Failure(_))
    }

    pub fn as_report(&self) -> Option<&DiagnosisReport> {
        match self {
            Diagnosis::Report(r) => Some(r),
            Diagnosis::Failure(_) => None,
        }
    }

    pub fn as_failure(&self) -> Option<&DiagnosisFailure> {
        match self {
            Diagnosis::Failure(f) => Some(f),
            Diagnosis::Report(_) => None,
        }
    }
}

impl DiagnosisReport {
    /// Lenient getters over the open mapping: a missing or mistyped
    /// field yields None/empty rather than an error, since the model
    /// output is never schema-validated.
    pub fn primary_diagnosis(&self) -> Option<&str> {
        self.fields.get("primary_diagnosis").and_then(Value::as_str)
    }

    pub fn confidence(&self) -> Option<f64> {
        self.fields.get("confidence").and_then(Value::as_f64)
    }

    pub fn supporting_evidence(&self) -> Vec<&str> {
        string_list(self.fields.get("supporting_evidence"))
    }

    pub fn recommended_actions(&self) -> Vec<&str> {
        string_list(self.fields.get("recommended_actions"))
    }

    pub fn differential_diagnoses(&self) -> Vec<DifferentialDiagnosis> {
        let Some(entries) = self.fields.get("differential_diagnoses").and_then(Value::as_array)
        else {
            return Vec::new();
        };
        entries
            .iter()
            .filter_map(|entry| {
                let condition = entry.get("condition")?.as_str()?;
                let probability = entry.get("probability")?.as_f64()?;
                Some(DifferentialDiagnosis {
                    condition: condition.to_string(),
                    probability,
                })
            })
            .collect()
    }
}

fn string_list(value: Option<&Value>) -> Vec<&str> {
    value
        .and_then(Value::as_array)
        .map(|items| items.iter().filter_map(Value::as_str).collect())
        .unwrap_or_default()
}
