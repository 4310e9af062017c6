//! Domain records for the diagnostic case pipeline: patient intake,
//! symptoms, labs, images, the packaged case, and the terminal diagnosis.

pub mod case;
pub mod catalog;
pub mod diagnosis;
pub mod image;
pub mod labs;
pub mod patient;
pub mod symptoms;

pub use case::CaseRecord;
pub use diagnosis::{Diagnosis, DiagnosisFailure, DiagnosisReport, DifferentialDiagnosis};
pub use image::{ImageRecord, ImageUpload};
pub use labs::LabResults;
pub use patient::{PatientData, UNKNOWN_PATIENT_ID};
pub use symptoms::{OnsetInfo, SymptomRecord};
