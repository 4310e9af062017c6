use super::types::AnalysisPayload;

pub const IMAGE_ANALYST_SYSTEM: &str = r#"
You are a medical imaging assistant. You describe findings visible in
the provided medical image for a clinician to review.

RULES:
1. Describe ONLY what is visible in the image.
2. Note relevant negative findings (e.g., no consolidation, no fracture).
3. Do NOT state a diagnosis; findings only.
4. Be concise: a short paragraph of plain prose, no markdown.
"#;

/// Build the per-image findings prompt. One fixed template,
/// parameterized by the upload's type, region, and notes.
pub fn build_image_prompt(image_type: &str, region: &str, notes: &str) -> String {
    format!(
        "This is a {image_type} of the {region} region. Clinical notes from the \
         requesting clinician: {notes}\n\n\
         Describe the key findings visible in this image."
    )
}

pub const SYMPTOM_ANALYST_SYSTEM: &str = r#"
You are an experienced diagnostician performing the first pass over a
new case. You analyze the full intake bundle and identify clinically
significant patterns, abnormal values, and candidate conditions.

RULES:
1. Reason ONLY from the data provided; do not invent history or results.
2. Flag abnormal lab values against common reference ranges.
3. Relate imaging findings to the reported symptoms where relevant.
4. Output plain prose. A later step turns your analysis into a report.
"#;

/// Step 1 prompt: the full serialized case bundle.
pub fn build_symptom_analysis_prompt(payload: &AnalysisPayload) -> String {
    format!(
        r#"Analyze the following case.

PATIENT DATA:
{patient}

SYMPTOMS:
{symptoms}

LAB RESULTS:
{labs}

IMAGING FINDINGS:
{images}

Identify significant symptoms, abnormal results, and the conditions
they suggest, with your reasoning."#,
        patient = payload.patient_data,
        symptoms = payload.symptoms,
        labs = payload.lab_results,
        images = payload.image_results,
    )
}

pub const REPORT_SYNTHESIS_SYSTEM: &str = r#"
You are a medical report writer. You turn a diagnostician's case
analysis into one structured diagnostic report.

RULES:
1. Base the report ONLY on the analysis and case data provided.
2. Confidence and probabilities are decimals between 0 and 1.
3. Output the JSON block EXACTLY in the requested format; the
   surrounding text may be brief commentary.
"#;

/// Step 2 prompt: the first step's analysis plus the original bundle,
/// with the required fenced-JSON output format.
pub fn build_report_prompt(payload: &AnalysisPayload, analysis: &str) -> String {
    format!(
        r#"A diagnostician reviewed this case and wrote the following analysis:

<analysis>
{analysis}
</analysis>

Original case data for reference:

PATIENT DATA:
{patient}

SYMPTOMS:
{symptoms}

LAB RESULTS:
{labs}

IMAGING FINDINGS:
{images}

Write the final diagnostic report as a JSON block wrapped in ```json``` fences:

```json
{{
  "primary_diagnosis": "most likely condition",
  "confidence": 0.0,
  "supporting_evidence": ["evidence item", "evidence item"],
  "recommended_actions": ["action", "action"],
  "differential_diagnoses": [
    {{"condition": "alternative condition", "probability": 0.0}}
  ]
}}
```"#,
        analysis = analysis,
        patient = payload.patient_data,
        symptoms = payload.symptoms,
        labs = payload.lab_results,
        images = payload.image_results,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_payload() -> AnalysisPayload {
        AnalysisPayload {
            patient_data: r#"{"age": 45, "gender": "male"}"#.into(),
            symptoms: r#"{"chief_complaint": "chest pain"}"#.into(),
            lab_results: r#"{"Basic Metabolic Panel": {"Glucose": "180"}}"#.into(),
            image_results: r#"[{"type": "Chest X-ray", "findings": "slight mass"}]"#.into(),
        }
    }

    #[test]
    fn image_prompt_is_parameterized_by_all_three_fields() {
        let prompt = build_image_prompt("Chest X-ray", "Chest/Thorax", "rule out pneumonia");
        assert!(prompt.contains("Chest X-ray"));
        assert!(prompt.contains("Chest/Thorax"));
        assert!(prompt.contains("rule out pneumonia"));
    }

    #[test]
    fn image_system_prompt_forbids_diagnosis() {
        assert!(IMAGE_ANALYST_SYSTEM.contains("Do NOT state a diagnosis"));
    }

    #[test]
    fn analysis_prompt_embeds_whole_payload() {
        let prompt = build_symptom_analysis_prompt(&sample_payload());
        assert!(prompt.contains(r#""age": 45"#));
        assert!(prompt.contains("chest pain"));
        assert!(prompt.contains("Glucose"));
        assert!(prompt.contains("slight mass"));
    }

    #[test]
    fn report_prompt_includes_prior_analysis_and_payload() {
        let prompt = build_report_prompt(&sample_payload(), "Findings suggest cardiac origin.");
        assert!(prompt.contains("<analysis>"));
        assert!(prompt.contains("Findings suggest cardiac origin."));
        assert!(prompt.contains("chest pain"));
    }

    #[test]
    fn report_prompt_demands_fenced_json_with_report_fields() {
        let prompt = build_report_prompt(&sample_payload(), "analysis");
        assert!(prompt.contains("```json"));
        assert!(prompt.contains("primary_diagnosis"));
        assert!(prompt.contains("confidence"));
        assert!(prompt.contains("supporting_evidence"));
        assert!(prompt.contains("recommended_actions"));
        assert!(prompt.contains("differential_diagnoses"));
    }
}
