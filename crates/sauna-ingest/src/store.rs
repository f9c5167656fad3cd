//! Verbatim persistence of accepted uploads.
//!
//! Uploads are written once to their final name; there is no
//! intermediate temp file to clean up.

use std::path::{Path, PathBuf};

use sha2::{Digest, Sha256};

use sauna_model::DataType;

use crate::error::{IngestError, Result};

/// Record of one saved upload.
#[derive(Debug, Clone)]
pub struct SavedUpload {
    pub path: PathBuf,
    pub size: u64,
    /// Hex SHA-256 of the file contents.
    pub digest: String,
}

/// A flat uploads directory storing files as
/// `{data_type}_{unix_ts}_{filename}`.
#[derive(Debug, Clone)]
pub struct UploadStore {
    root: PathBuf,
}

impl UploadStore {
    /// Opens (creating if necessary) the uploads directory.
    pub fn open(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        std::fs::create_dir_all(&root).map_err(|source| IngestError::StoreUnavailable {
            path: root.clone(),
            source,
        })?;
        Ok(Self { root })
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Saves upload bytes verbatim and returns the record.
    pub fn save(&self, data_type: DataType, filename: &str, bytes: &[u8]) -> Result<SavedUpload> {
        let timestamp = chrono::Utc::now().timestamp();
        let safe_name = sanitize_filename(filename);
        let path = self
            .root
            .join(format!("{data_type}_{timestamp}_{safe_name}"));
        std::fs::write(&path, bytes).map_err(|source| IngestError::SaveFailed {
            path: path.clone(),
            source,
        })?;
        let mut hasher = Sha256::new();
        hasher.update(bytes);
        let digest = hex::encode(hasher.finalize());
        tracing::info!(path = %path.display(), size = bytes.len(), "saved upload");
        Ok(SavedUpload {
            path,
            size: bytes.len() as u64,
            digest,
        })
    }
}

/// Keeps the basename only and replaces path separators, so a crafted
/// filename cannot escape the uploads directory.
fn sanitize_filename(filename: &str) -> String {
    let base = filename
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or(filename)
        .trim();
    if base.is_empty() {
        "upload.csv".to_string()
    } else {
        base.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn saves_with_type_and_timestamp_prefix() {
        let dir = tempfile::tempdir().unwrap();
        let store = UploadStore::open(dir.path()).unwrap();
        let saved = store
            .save(DataType::Members, "members.csv", b"a,b\n1,2\n")
            .unwrap();
        let name = saved.path.file_name().unwrap().to_string_lossy().to_string();
        assert!(name.starts_with("members_"));
        assert!(name.ends_with("_members.csv"));
        assert_eq!(saved.size, 8);
        assert_eq!(std::fs::read(&saved.path).unwrap(), b"a,b\n1,2\n");
    }

    #[test]
    fn digest_is_stable() {
        let dir = tempfile::tempdir().unwrap();
        let store = UploadStore::open(dir.path()).unwrap();
        let first = store.save(DataType::Sales, "s.csv", b"x").unwrap();
        let second = store.save(DataType::Sales, "s.csv", b"x").unwrap();
        assert_eq!(first.digest, second.digest);
        assert_eq!(first.digest.len(), 64);
    }

    #[test]
    fn sanitizes_path_components() {
        assert_eq!(sanitize_filename("../../etc/passwd"), "passwd");
        assert_eq!(sanitize_filename("c:\\exports\\march.csv"), "march.csv");
        assert_eq!(sanitize_filename(""), "upload.csv");
    }
}
