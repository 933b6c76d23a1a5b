use async_trait::async_trait;
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use uuid::Uuid;

use crate::error::ApiError;

/// AttachmentStore
///
/// Contract for binary image storage. Paths returned by `write` are what
/// gets persisted in image rows and handed back to `delete`/`read`, so a
/// store implementation owns the full path lifecycle.
#[async_trait]
pub trait AttachmentStore: Send + Sync {
    /// Creates or overwrites the file for `key` and returns the stored
    /// path.
    async fn write(&self, key: &str, bytes: &[u8]) -> Result<String, ApiError>;

    /// Removes a stored file. A missing file is an error, not a no-op:
    /// announcement deletion fails hard when metadata and filesystem have
    /// drifted apart.
    async fn delete(&self, path: &str) -> Result<(), ApiError>;

    /// Reads a stored file back.
    async fn read(&self, path: &str) -> Result<Vec<u8>, ApiError>;
}

/// The concrete type used to share attachment storage across the
/// application state.
pub type StorageState = Arc<dyn AttachmentStore>;

/// Strips directory navigation components from a client-supplied filename,
/// leaving a single flat path segment.
pub fn sanitize_filename(name: &str) -> String {
    name.split(['/', '\\'])
        .filter(|segment| !segment.is_empty() && *segment != ".." && *segment != ".")
        .next_back()
        .unwrap_or("unnamed")
        .to_string()
}

/// Derives the server-side storage key for an upload: a fresh UUID plus
/// the sanitized extension of the original filename. The client's filename
/// itself never becomes part of a filesystem path.
pub fn storage_key(filename: &str) -> String {
    let sanitized = sanitize_filename(filename);
    let extension = std::path::Path::new(&sanitized)
        .extension()
        .and_then(std::ffi::OsStr::to_str)
        .unwrap_or("bin");
    format!("{}.{}", Uuid::new_v4(), extension)
}

/// FsAttachmentStore
///
/// Local-filesystem implementation rooted at a fixed base directory. All
/// keys are flat (see [`storage_key`]), so no subdirectories are created
/// under the root after startup.
#[derive(Clone)]
pub struct FsAttachmentStore {
    root: PathBuf,
}

impl FsAttachmentStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Creates the root directory if it does not exist. Idempotent; called
    /// once at startup.
    pub async fn ensure_root(&self) -> Result<(), ApiError> {
        tokio::fs::create_dir_all(&self.root).await?;
        Ok(())
    }
}

#[async_trait]
impl AttachmentStore for FsAttachmentStore {
    async fn write(&self, key: &str, bytes: &[u8]) -> Result<String, ApiError> {
        let path = self.root.join(key);
        tokio::fs::write(&path, bytes).await?;
        Ok(path.to_string_lossy().into_owned())
    }

    async fn delete(&self, path: &str) -> Result<(), ApiError> {
        tokio::fs::remove_file(path).await?;
        Ok(())
    }

    async fn read(&self, path: &str) -> Result<Vec<u8>, ApiError> {
        let bytes = tokio::fs::read(path).await?;
        Ok(bytes)
    }
}

/// MockAttachmentStore
///
/// In-memory implementation for unit and integration tests. Keeps written
/// bytes in a map keyed by the returned path and can be switched into a
/// failing mode to exercise the compensating-cleanup path in the create
/// flow.
#[derive(Default)]
pub struct MockAttachmentStore {
    files: Mutex<HashMap<String, Vec<u8>>>,
    pub should_fail: bool,
}

impl MockAttachmentStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn new_failing() -> Self {
        Self {
            files: Mutex::new(HashMap::new()),
            should_fail: true,
        }
    }

    /// Number of files currently held.
    pub fn len(&self) -> usize {
        self.files.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Snapshot of the stored paths, for assertions.
    pub fn paths(&self) -> Vec<String> {
        let mut paths: Vec<String> = self.files.lock().unwrap().keys().cloned().collect();
        paths.sort();
        paths
    }
}

#[async_trait]
impl AttachmentStore for MockAttachmentStore {
    async fn write(&self, key: &str, bytes: &[u8]) -> Result<String, ApiError> {
        if self.should_fail {
            return Err(ApiError::Internal(
                "mock storage failure requested".to_string(),
            ));
        }
        let path = format!("mock/{key}");
        self.files
            .lock()
            .unwrap()
            .insert(path.clone(), bytes.to_vec());
        Ok(path)
    }

    async fn delete(&self, path: &str) -> Result<(), ApiError> {
        self.files
            .lock()
            .unwrap()
            .remove(path)
            .map(|_| ())
            .ok_or_else(|| ApiError::Internal(format!("attachment store error: {path} not found")))
    }

    async fn read(&self, path: &str) -> Result<Vec<u8>, ApiError> {
        self.files
            .lock()
            .unwrap()
            .get(path)
            .cloned()
            .ok_or_else(|| ApiError::Internal(format!("attachment store error: {path} not found")))
    }
}
