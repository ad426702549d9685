//! Blob store
//!
//! Attachment bodies live outside the database behind an opaque
//! reference. Store failures surface as `DependencyUnavailable` so
//! clients can retry without the caller treating them as rule
//! rejections.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Mutex;

use uuid::Uuid;

use crate::utils::{AppError, AppResult};

pub trait BlobStore: Send + Sync {
    /// Persist `data` and return an opaque reference to it.
    fn store(&self, file_name: &str, data: &[u8]) -> AppResult<String>;

    /// Load the bytes behind a reference.
    fn load(&self, blob_ref: &str) -> AppResult<Vec<u8>>;
}

/// Filesystem store - files land under `<base>/uploads` with a UUID
/// prefix so duplicate upload names never collide.
pub struct FsBlobStore {
    dir: PathBuf,
}

impl FsBlobStore {
    pub fn new(work_dir: &str) -> AppResult<Self> {
        let dir = PathBuf::from(work_dir).join("uploads");
        std::fs::create_dir_all(&dir)
            .map_err(|e| AppError::dependency(format!("Cannot create upload dir: {e}")))?;
        Ok(Self { dir })
    }
}

impl BlobStore for FsBlobStore {
    fn store(&self, file_name: &str, data: &[u8]) -> AppResult<String> {
        // Strip any path components the client sent along
        let base = file_name.rsplit(['/', '\\']).next().unwrap_or(file_name);
        let blob_ref = format!("{}_{base}", Uuid::new_v4());

        std::fs::write(self.dir.join(&blob_ref), data)
            .map_err(|e| AppError::dependency(format!("Blob write failed: {e}")))?;
        Ok(blob_ref)
    }

    fn load(&self, blob_ref: &str) -> AppResult<Vec<u8>> {
        // References are generated server-side; reject anything that
        // tries to traverse out of the upload dir.
        if blob_ref.contains('/') || blob_ref.contains('\\') || blob_ref.contains("..") {
            return Err(AppError::not_found(format!("Unknown blob: {blob_ref}")));
        }

        match std::fs::read(self.dir.join(blob_ref)) {
            Ok(data) => Ok(data),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(AppError::not_found(format!("Unknown blob: {blob_ref}")))
            }
            Err(e) => Err(AppError::dependency(format!("Blob read failed: {e}"))),
        }
    }
}

/// In-memory store for tests.
#[derive(Default)]
pub struct MemoryBlobStore {
    blobs: Mutex<HashMap<String, Vec<u8>>>,
    /// When set, every `store` call fails (outage simulation).
    pub fail_writes: bool,
}

impl MemoryBlobStore {
    /// Store whose writes always fail, for outage tests.
    pub fn failing() -> Self {
        Self {
            blobs: Mutex::default(),
            fail_writes: true,
        }
    }
}

impl BlobStore for MemoryBlobStore {
    fn store(&self, file_name: &str, data: &[u8]) -> AppResult<String> {
        if self.fail_writes {
            return Err(AppError::dependency("Blob store offline"));
        }
        let blob_ref = format!("{}_{file_name}", Uuid::new_v4());
        self.blobs
            .lock()
            .unwrap()
            .insert(blob_ref.clone(), data.to_vec());
        Ok(blob_ref)
    }

    fn load(&self, blob_ref: &str) -> AppResult<Vec<u8>> {
        self.blobs
            .lock()
            .unwrap()
            .get(blob_ref)
            .cloned()
            .ok_or_else(|| AppError::not_found(format!("Unknown blob: {blob_ref}")))
    }
}
