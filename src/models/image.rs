use serde::{Deserialize, Serialize};

/// One image as handed over by the intake form: raw bytes plus the
/// user's annotations. Never persisted as-is; intake splits it into a
/// stored file and an [`ImageRecord`].
#[derive(Debug, Clone, PartialEq)]
pub struct ImageUpload {
    pub bytes: Vec<u8>,
    pub image_type: String,
    pub region: String,
    pub date: String, // YYYY-MM-DD
    pub notes: String,
}

/// Persisted metadata for one stored image. Belongs to exactly one
/// case; `index` is the 0-based position in that case's upload order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageRecord {
    pub index: usize,
    #[serde(rename = "type")]
    pub image_type: String,
    pub region: String,
    pub date: String, // YYYY-MM-DD
    pub notes: String,
    pub stored_filename: String,
    /// Location of the binary, relative to the case directory.
    pub storage_path: String,
}
