//! Image intake: write uploaded binaries into the case's images
//! directory and persist their metadata as one ordered document.

use rand::distributions::Alphanumeric;
use rand::Rng;
use thiserror::Error;

use crate::models::{ImageRecord, ImageUpload};
use crate::store::{ArtifactKind, CaseStore, StorageError};

#[derive(Error, Debug)]
pub enum IntakeError {
    #[error("Could not store image {index} as {filename}: {source}")]
    ImageWrite {
        index: usize,
        filename: String,
        source: StorageError,
    },

    #[error("Could not persist image metadata: {0}")]
    Metadata(#[from] StorageError),
}

/// Store every upload for a case, in input order.
///
/// Each image gets `index` = its input position and a filename built
/// from that index plus a random suffix, unique within the case and
/// never reused. The full metadata list is persisted once, after all
/// binaries are written. An empty upload list is a no-op, no file or
/// metadata write at all; "no images" never leaves an empty metadata
/// document behind.
///
/// There is no rollback: when a write fails partway, earlier images
/// stay on disk and the error carries the failing index.
pub fn store_images(
    store: &CaseStore,
    case_id: &str,
    uploads: &[ImageUpload],
) -> Result<Vec<ImageRecord>, IntakeError> {
    if uploads.is_empty() {
        tracing::debug!(case_id = %case_id, "No images attached, skipping intake");
        return Ok(Vec::new());
    }

    let mut records = Vec::with_capacity(uploads.len());
    for (index, upload) in uploads.iter().enumerate() {
        let stored_filename = format!("image_{index}_{}.png", random_suffix());

        store
            .write_image(case_id, &stored_filename, &upload.bytes)
            .map_err(|source| IntakeError::ImageWrite {
                index,
                filename: stored_filename.clone(),
                source,
            })?;

        records.push(ImageRecord {
            index,
            image_type: upload.image_type.clone(),
            region: upload.region.clone(),
            date: upload.date.clone(),
            notes: upload.notes.clone(),
            storage_path: format!("images/{stored_filename}"),
            stored_filename,
        });
    }

    store.save(case_id, ArtifactKind::ImageMetadata, &records)?;
    tracing::info!(case_id = %case_id, count = records.len(), "Stored case images");
    Ok(records)
}

fn random_suffix() -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(8)
        .map(char::from)
        .collect()
}
