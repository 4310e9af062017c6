//! Fixed selection lists offered by the intake forms. Free-text entry
//! is always allowed alongside these; nothing in the pipeline validates
//! against them.

pub const COMMON_SYMPTOMS: &[&str] = &[
    "Fever",
    "Cough",
    "Shortness of breath",
    "Fatigue",
    "Headache",
    "Nausea",
    "Vomiting",
    "Diarrhea",
    "Chest pain",
    "Abdominal pain",
    "Back pain",
    "Joint pain",
    "Rash",
    "Sore throat",
    "Dizziness",
    "Loss of appetite",
];

pub const LAB_PANELS: &[&str] = &[
    "Complete Blood Count",
    "Basic Metabolic Panel",
    "Liver Function Tests",
    "Lipid Panel",
];

pub fn lab_tests_for(panel: &str) -> &'static [&'static str] {
    match panel {
        "Complete Blood Count" => &["WBC", "RBC", "Hemoglobin", "Hematocrit", "Platelets"],
        "Basic Metabolic Panel" => &[
            "Sodium", "Potassium", "Chloride", "CO2", "Glucose", "BUN", "Creatinine",
        ],
        "Liver Function Tests" => &["ALT", "AST", "ALP", "Bilirubin", "Albumin"],
        "Lipid Panel" => &["Total Cholesterol", "HDL", "LDL", "Triglycerides"],
        _ => &[],
    }
}

pub const MEDICAL_CONDITIONS: &[&str] = &[
    "Hypertension",
    "Diabetes",
    "Asthma",
    "COPD",
    "Heart Disease",
    "Stroke",
    "Cancer",
    "Kidney Disease",
    "Liver Disease",
    "Thyroid Disorder",
    "Other",
];

pub const IMAGE_TYPES: &[&str] = &[
    "Chest X-ray",
    "Brain MRI",
    "Abdominal CT",
    "Bone X-ray",
    "Ultrasound",
    "Other",
];

pub const BODY_REGIONS: &[&str] = &[
    "Chest/Thorax",
    "Abdomen",
    "Head/Brain",
    "Spine",
    "Extremities",
    "Other",
];

pub const BLOOD_TYPES: &[&str] = &["A+", "A-", "B+", "B-", "AB+", "AB-", "O+", "O-", "Unknown"];

pub const DURATION_UNITS: &[&str] = &["Days", "Weeks", "Months", "Years"];
