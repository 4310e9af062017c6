//! Durable storage for case artifacts.
//!
//! Every case owns one directory under the store root, named by its
//! case id; artifact paths are derived from (case id, artifact kind)
//! alone. Per-case isolation is the only concurrency mechanism: no
//! locking, one sequential writer per case.

use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::Serialize;
use thiserror::Error;

use crate::config;
use crate::models::{CaseRecord, Diagnosis, ImageRecord};

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Could not create directory {path}: {source}")]
    CreateDir { path: PathBuf, source: io::Error },

    #[error("Could not write {path}: {source}")]
    WriteFile { path: PathBuf, source: io::Error },

    #[error("Could not read {path}: {source}")]
    ReadFile { path: PathBuf, source: io::Error },

    #[error("Could not encode {kind} document: {source}")]
    Encode {
        kind: &'static str,
        source: serde_json::Error,
    },

    #[error("Could not parse {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("Could not list cases under {path}: {source}")]
    ListCases { path: PathBuf, source: io::Error },
}

/// The three persisted documents of a case. Image binaries live next
/// to the image-metadata document and are addressed by filename, not
/// by kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArtifactKind {
    InputPackage,
    ImageMetadata,
    Diagnosis,
}

impl ArtifactKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ArtifactKind::InputPackage => "input-package",
            ArtifactKind::ImageMetadata => "image-metadata",
            ArtifactKind::Diagnosis => "diagnosis",
        }
    }

    /// Path of this document relative to the case directory.
    fn rel_path(&self) -> &'static str {
        match self {
            ArtifactKind::InputPackage => "data_package.json",
            ArtifactKind::ImageMetadata => "images/image_metadata.json",
            ArtifactKind::Diagnosis => "diagnosis.json",
        }
    }
}

impl fmt::Display for ArtifactKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Filesystem-backed store, one directory per case:
///
/// ```text
/// <root>/<case_id>/data_package.json
/// <root>/<case_id>/images/image_metadata.json
/// <root>/<case_id>/images/<stored_filename>
/// <root>/<case_id>/diagnosis.json
/// ```
#[derive(Debug, Clone)]
pub struct CaseStore {
    root: PathBuf,
}

impl CaseStore {
    pub fn open(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Store rooted at the per-user default, `~/Medcase/cases`.
    pub fn default_local() -> Self {
        Self::open(config::cases_dir())
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn case_dir(&self, case_id: &str) -> PathBuf {
        self.root.join(case_id)
    }

    pub fn images_dir(&self, case_id: &str) -> PathBuf {
        self.case_dir(case_id).join("images")
    }

    pub fn artifact_path(&self, case_id: &str, kind: ArtifactKind) -> PathBuf {
        self.case_dir(case_id).join(kind.rel_path())
    }

    /// Persist one document, pretty-printed, creating missing
    /// directories. A second save for the same (case id, kind)
    /// overwrites: last write wins, no history.
    pub fn save<T: Serialize>(
        &self,
        case_id: &str,
        kind: ArtifactKind,
        document: &T,
    ) -> Result<(), StorageError> {
        let path = self.artifact_path(case_id, kind);
        let parent = path.parent().unwrap_or(&self.root);
        fs::create_dir_all(parent).map_err(|source| StorageError::CreateDir {
            path: parent.to_path_buf(),
            source,
        })?;

        let json = serde_json::to_string_pretty(document).map_err(|source| {
            StorageError::Encode {
                kind: kind.as_str(),
                source,
            }
        })?;
        fs::write(&path, json).map_err(|source| StorageError::WriteFile {
            path: path.clone(),
            source,
        })?;

        tracing::debug!(case_id = %case_id, kind = %kind, path = %path.display(), "Saved case artifact");
        Ok(())
    }

    pub fn load<T: DeserializeOwned>(
        &self,
        case_id: &str,
        kind: ArtifactKind,
    ) -> Result<T, StorageError> {
        let path = self.artifact_path(case_id, kind);
        let text = fs::read_to_string(&path).map_err(|source| StorageError::ReadFile {
            path: path.clone(),
            source,
        })?;
        serde_json::from_str(&text).map_err(|source| StorageError::Parse { path, source })
    }

    pub fn load_case(&self, case_id: &str) -> Result<CaseRecord, StorageError> {
        self.load(case_id, ArtifactKind::InputPackage)
    }

    pub fn load_image_metadata(&self, case_id: &str) -> Result<Vec<ImageRecord>, StorageError> {
        self.load(case_id, ArtifactKind::ImageMetadata)
    }

    pub fn load_diagnosis(&self, case_id: &str) -> Result<Diagnosis, StorageError> {
        self.load(case_id, ArtifactKind::Diagnosis)
    }

    /// Write one image binary into the case's images directory.
    pub fn write_image(
        &self,
        case_id: &str,
        filename: &str,
        bytes: &[u8],
    ) -> Result<PathBuf, StorageError> {
        let dir = self.images_dir(case_id);
        fs::create_dir_all(&dir).map_err(|source| StorageError::CreateDir {
            path: dir.clone(),
            source,
        })?;

        let path = dir.join(filename);
        fs::write(&path, bytes).map_err(|source| StorageError::WriteFile {
            path: path.clone(),
            source,
        })?;
        Ok(path)
    }

    pub fn read_image(&self, case_id: &str, filename: &str) -> Result<Vec<u8>, StorageError> {
        let path = self.images_dir(case_id).join(filename);
        fs::read(&path).map_err(|source| StorageError::ReadFile { path, source })
    }

    pub fn case_exists(&self, case_id: &str) -> bool {
        self.artifact_path(case_id, ArtifactKind::InputPackage).is_file()
    }

    /// All case ids present under the root, sorted. A missing root is
    /// an empty store, not an error.
    pub fn list_cases(&self) -> Result<Vec<String>, StorageError> {
        if !self.root.exists() {
            return Ok(Vec::new());
        }
        let entries = fs::read_dir(&self.root).map_err(|source| StorageError::ListCases {
            path: self.root.clone(),
            source,
        })?;

        let mut ids = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|source| StorageError::ListCases {
                path: self.root.clone(),
                source,
            })?;
            if entry.path().is_dir() {
                if let Ok(name) = entry.file_name().into_string() {
                    ids.push(name);
                }
            }
        }
        ids.sort();
        Ok(ids)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{LabResults, PatientData, SymptomRecord};

    fn sample_case(case_id: &str) -> CaseRecord {
        let mut patient = PatientData::new();
        patient.set("id", "P-31");
        patient.set("age", 45);

        let mut labs = LabResults::new();
        labs.record("Complete Blood Count", "WBC", "11.2");

        CaseRecord {
            case_id: case_id.into(),
            created_at: "2024-03-11 14:23:55".into(),
            patient,
            symptom_record: SymptomRecord {
                chief_complaint: Some("Chest pain".into()),
                symptom_list: vec!["Chest pain".into(), "Fatigue".into()],
                ..Default::default()
            },
            lab_results: labs,
            image_count: 0,
        }
    }

    #[test]
    fn artifact_paths_are_derived_from_id_and_kind() {
        let store = CaseStore::open("/tmp/medcase-paths");
        let base = Path::new("/tmp/medcase-paths/CASE_X");

        assert_eq!(
            store.artifact_path("CASE_X", ArtifactKind::InputPackage),
            base.join("data_package.json")
        );
        assert_eq!(
            store.artifact_path("CASE_X", ArtifactKind::ImageMetadata),
            base.join("images/image_metadata.json")
        );
        assert_eq!(
            store.artifact_path("CASE_X", ArtifactKind::Diagnosis),
            base.join("diagnosis.json")
        );
    }

    #[test]
    fn save_creates_directories_and_pretty_prints() {
        let dir = tempfile::tempdir().unwrap();
        let store = CaseStore::open(dir.path());
        let case = sample_case("CASE_20240311_142355_P-31");

        store
            .save(&case.case_id, ArtifactKind::InputPackage, &case)
            .unwrap();

        let path = store.artifact_path(&case.case_id, ArtifactKind::InputPackage);
        let text = fs::read_to_string(path).unwrap();
        assert!(text.contains('\n'), "document should be pretty-printed");
        assert!(text.contains("\"case_id\""));
    }

    #[test]
    fn case_round_trips_losslessly() {
        let dir = tempfile::tempdir().unwrap();
        let store = CaseStore::open(dir.path());
        let case = sample_case("CASE_20240311_142355_P-31");

        store
            .save(&case.case_id, ArtifactKind::InputPackage, &case)
            .unwrap();
        let loaded = store.load_case(&case.case_id).unwrap();
        assert_eq!(loaded, case);
    }

    #[test]
    fn second_save_overwrites() {
        let dir = tempfile::tempdir().unwrap();
        let store = CaseStore::open(dir.path());
        let mut case = sample_case("CASE_X");

        store.save("CASE_X", ArtifactKind::InputPackage, &case).unwrap();
        case.image_count = 3;
        store.save("CASE_X", ArtifactKind::InputPackage, &case).unwrap();

        let loaded = store.load_case("CASE_X").unwrap();
        assert_eq!(loaded.image_count, 3);
    }

    #[test]
    fn load_missing_artifact_is_read_error() {
        let dir = tempfile::tempdir().unwrap();
        let store = CaseStore::open(dir.path());

        let result = store.load_case("CASE_NOPE");
        assert!(matches!(result, Err(StorageError::ReadFile { .. })));
    }

    #[test]
    fn corrupt_document_is_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let store = CaseStore::open(dir.path());

        let path = store.artifact_path("CASE_X", ArtifactKind::InputPackage);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, "{ not json").unwrap();

        let result = store.load_case("CASE_X");
        assert!(matches!(result, Err(StorageError::Parse { .. })));
    }

    #[test]
    fn image_bytes_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let store = CaseStore::open(dir.path());

        let written = store
            .write_image("CASE_X", "image_0_abcd1234.png", &[0x89, 0x50, 0x4E, 0x47])
            .unwrap();
        assert!(written.starts_with(store.images_dir("CASE_X")));

        let bytes = store.read_image("CASE_X", "image_0_abcd1234.png").unwrap();
        assert_eq!(bytes, vec![0x89, 0x50, 0x4E, 0x47]);
    }

    #[test]
    fn list_cases_sorted_and_dirs_only() {
        let dir = tempfile::tempdir().unwrap();
        let store = CaseStore::open(dir.path());

        store
            .save("CASE_B", ArtifactKind::InputPackage, &sample_case("CASE_B"))
            .unwrap();
        store
            .save("CASE_A", ArtifactKind::InputPackage, &sample_case("CASE_A"))
            .unwrap();
        fs::write(dir.path().join("stray.txt"), "not a case").unwrap();

        assert_eq!(store.list_cases().unwrap(), vec!["CASE_A", "CASE_B"]);
        assert!(store.case_exists("CASE_A"));
        assert!(!store.case_exists("CASE_C"));
    }

    #[test]
    fn missing_root_lists_empty() {
        let store = CaseStore::open("/tmp/medcase-does-not-exist-4718");
        assert!(store.list_cases().unwrap().is_empty());
    }
}
