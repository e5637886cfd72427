use std::io;
use std::path::{Path, PathBuf};

use tokio::fs;
use tracing::{info, warn};
use uuid::Uuid;

/// Subdirectory of the storage root that holds uploaded fax files. The
/// whole `uploads` tree is also served statically, so `file_url` values
/// stay valid as public paths.
const FAX_SUBDIR: &str = "faxes";
const UPLOADS_DIR: &str = "uploads";

#[derive(Debug, Clone)]
pub struct StoredFile {
    pub file_path: String,
    pub file_url: String,
    pub file_size: i64,
}

/// Filesystem storage for uploaded documents. Files are written under
/// `{root}/uploads/faxes/` with a random name prefix, so concurrent
/// uploads never collide and need no locking.
#[derive(Debug, Clone)]
pub struct FileStorage {
    root: PathBuf,
}

impl FileStorage {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        FileStorage { root: root.into() }
    }

    pub fn uploads_dir(&self) -> PathBuf {
        self.root.join(UPLOADS_DIR)
    }

    fn fax_dir(&self) -> PathBuf {
        self.uploads_dir().join(FAX_SUBDIR)
    }

    pub async fn save(&self, original_name: &str, data: &[u8]) -> io::Result<StoredFile> {
        let dir = self.fax_dir();
        fs::create_dir_all(&dir).await?;

        let unique_name = format!("{}_{}", Uuid::new_v4(), sanitize_file_name(original_name));
        let path = dir.join(&unique_name);
        fs::write(&path, data).await?;

        info!(file = %path.display(), size = data.len(), "stored uploaded file");
        Ok(StoredFile {
            file_path: path.to_string_lossy().into_owned(),
            file_url: format!("/{}/{}/{}", UPLOADS_DIR, FAX_SUBDIR, unique_name),
            file_size: data.len() as i64,
        })
    }

    pub async fn read(&self, file_path: &str) -> io::Result<Vec<u8>> {
        fs::read(file_path).await
    }

    /// Best-effort removal; a missing file or I/O failure is logged and
    /// swallowed so cleanup never blocks the owning operation.
    pub async fn delete(&self, file_path: &str) {
        match fs::remove_file(file_path).await {
            Ok(()) => info!(file = file_path, "deleted stored file"),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {}
            Err(e) => warn!(file = file_path, error = %e, "failed to delete stored file"),
        }
    }
}

/// Keeps only the final path component of a client-supplied filename.
fn sanitize_file_name(name: &str) -> String {
    let base = Path::new(name)
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    if base.is_empty() {
        "unnamed".to_string()
    } else {
        base
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[actix_web::test]
    async fn save_writes_file_with_random_prefix() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileStorage::new(dir.path());

        let stored = storage.save("report.pdf", b"fax body").await.unwrap();
        assert!(stored.file_path.ends_with("_report.pdf"));
        assert!(stored.file_url.starts_with("/uploads/faxes/"));
        assert_eq!(stored.file_size, 8);
        assert_eq!(storage.read(&stored.file_path).await.unwrap(), b"fax body");
    }

    #[actix_web::test]
    async fn repeated_saves_never_collide() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileStorage::new(dir.path());

        let first = storage.save("fax.pdf", b"one").await.unwrap();
        let second = storage.save("fax.pdf", b"two").await.unwrap();
        assert_ne!(first.file_path, second.file_path);
    }

    #[actix_web::test]
    async fn delete_removes_file_and_tolerates_missing() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileStorage::new(dir.path());

        let stored = storage.save("fax.pdf", b"bytes").await.unwrap();
        storage.delete(&stored.file_path).await;
        assert!(storage.read(&stored.file_path).await.is_err());

        // Second delete is a no-op, not an error.
        storage.delete(&stored.file_path).await;
    }

    #[test]
    fn sanitize_strips_directories() {
        assert_eq!(sanitize_file_name("../../etc/passwd"), "passwd");
        assert_eq!(sanitize_file_name("plain.pdf"), "plain.pdf");
        assert_eq!(sanitize_file_name(""), "unnamed");
    }
}
