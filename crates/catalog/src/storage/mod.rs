use shared::errors::ServiceError;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{info, warn};
use uuid::Uuid;

/// A file received through a multipart form, still in memory.
#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

/// Writes uploaded files under the media root and builds the absolute URLs
/// they are served from.
#[derive(Debug, Clone)]
pub struct FileStorage {
    media_root: PathBuf,
    base_url: String,
}

impl FileStorage {
    pub fn new(media_root: impl Into<PathBuf>, base_url: impl Into<String>) -> Self {
        Self {
            media_root: media_root.into(),
            base_url: base_url.into(),
        }
    }

    pub fn media_root(&self) -> &Path {
        &self.media_root
    }

    /// Stores the file under `<media_root>/<subdir>/` with a generated name
    /// and returns the media-relative path recorded in the database.
    pub async fn save(&self, subdir: &str, file: &UploadedFile) -> Result<String, ServiceError> {
        let ext = Path::new(&file.file_name)
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| format!(".{e}"))
            .unwrap_or_default();

        let relative = format!("{subdir}/{}{ext}", Uuid::new_v4());
        let full_path = self.media_root.join(&relative);

        if let Some(parent) = full_path.parent() {
            fs::create_dir_all(parent)
                .await
                .map_err(|e| ServiceError::Internal(format!("Failed to create media dir: {e}")))?;
        }

        fs::write(&full_path, &file.bytes)
            .await
            .map_err(|e| ServiceError::Internal(format!("Failed to store file: {e}")))?;

        info!("💾 Stored uploaded file at {}", relative);
        Ok(relative)
    }

    /// Best-effort removal of a stored file; a missing file is not an error.
    pub async fn remove(&self, relative: &str) {
        let full_path = self.media_root.join(relative);
        if let Err(e) = fs::remove_file(&full_path).await {
            warn!("Failed to remove stored file '{}': {}", relative, e);
        }
    }

    pub fn public_url(&self, relative: &str) -> String {
        format!(
            "{}/media/{}",
            self.base_url.trim_end_matches('/'),
            relative
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn saves_and_removes_files_under_media_root() {
        let dir = tempfile::tempdir().expect("tempdir");
        let storage = FileStorage::new(dir.path(), "http://localhost:8000");

        let file = UploadedFile {
            file_name: "phone.jpg".into(),
            bytes: vec![1, 2, 3],
        };

        let relative = storage.save("products", &file).await.expect("save");
        assert!(relative.starts_with("products/"));
        assert!(relative.ends_with(".jpg"));

        let stored = dir.path().join(&relative);
        assert_eq!(std::fs::read(&stored).expect("read"), vec![1, 2, 3]);

        storage.remove(&relative).await;
        assert!(!stored.exists());
    }

    #[test]
    fn public_url_joins_base_and_media_path() {
        let storage = FileStorage::new("/tmp/media", "http://localhost:8000/");
        assert_eq!(
            storage.public_url("products/abc.jpg"),
            "http://localhost:8000/media/products/abc.jpg"
        );
    }
}
