//! Demo entry point: runs one hard-coded case through the full
//! pipeline against a local Ollama server and prints the resulting
//! diagnosis record.

use medcase::models::OnsetInfo;
use medcase::pipeline::analysis::{AnalysisError, AnalysisGateway, OllamaClient};
use medcase::pipeline::DiagnosticPipeline;
use medcase::session::CaseDraft;
use medcase::store::CaseStore;
use medcase::{config, init_tracing};

fn main() {
    init_tracing();
    tracing::info!("Medcase starting v{}", config::APP_VERSION);

    let pipeline = DiagnosticPipeline::new(CaseStore::default_local(), select_gateway());

    let mut draft = sample_draft();

    match draft.submit(&pipeline) {
        Ok(diagnosis) => match serde_json::to_string_pretty(&diagnosis) {
            Ok(rendered) => println!("{rendered}"),
            Err(e) => tracing::error!(error = %e, "Could not render diagnosis"),
        },
        Err(e) => {
            tracing::error!(error = %e, "Pipeline failed");
            std::process::exit(1);
        }
    }
}

/// Probe the local Ollama server for the best installed analysis model
/// and wire the gateway to it. Falls back to the default wiring when
/// no model is installed or the server is unreachable; the case still
/// runs, and the analysis stage reports the failure in the diagnosis.
fn select_gateway() -> AnalysisGateway {
    match OllamaClient::default_local().find_best_model() {
        Ok(model) => {
            tracing::info!(model = %model, "Analysis model selected");
            AnalysisGateway::new(
                Box::new(OllamaClient::default_local()),
                &model,
                Box::new(OllamaClient::default_local()),
                &model,
            )
        }
        Err(AnalysisError::NoModelAvailable) => {
            tracing::warn!("Model not installed, analysis will fail");
            AnalysisGateway::default_local()
        }
        Err(e) => {
            tracing::warn!(error = %e, "Could not reach the model server");
            AnalysisGateway::default_local()
        }
    }
}

/// The walk-through case: a 45-year-old with chest pain and labs
/// pointing at a cardiac workup. No images attached.
fn sample_draft() -> CaseDraft {
    let mut draft = CaseDraft::new();

    draft.patient.set("age", 45);
    draft.patient.set("gender", "male");
    draft.patient.set(
        "existing_conditions",
        serde_json::json!(["hypertension", "type 2 diabetes"]),
    );
    draft
        .patient
        .set("medications", serde_json::json!(["metformin", "lisinopril"]));

    draft.symptoms.chief_complaint = Some("chest pain".to_string());
    draft.symptoms.symptom_list = vec![
        "shortness of breath".to_string(),
        "fatigue".to_string(),
        "dizziness".to_string(),
    ];
    draft.symptoms.onset_info = Some(OnsetInfo {
        date: None,
        duration: Some("3 days".to_string()),
        severity: Some("moderate".to_string()),
    });

    draft.labs.record("Vitals", "Blood Pressure", "150/95");
    draft.labs.record("Vitals", "Heart Rate", "95");
    draft.labs.record("Metabolic", "Blood Glucose", "180");
    draft.labs.record("Cardiac", "Troponin", "elevated");
    draft.labs.record("Cardiac", "EKG", "abnormal");

    draft
}
