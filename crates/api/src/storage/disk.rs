//! Local-disk object store.
//!
//! Objects live under `{root}/property-images/` and are served as static
//! files at `/storage/property-images/...` by the router's `ServeDir` mount,
//! which is what makes the returned URLs publicly resolvable.

use std::io;
use std::path::{Path, PathBuf};

use async_trait::async_trait;

use super::{ObjectStore, StorageError, PROPERTY_IMAGES_BUCKET};

#[derive(Debug, Clone)]
pub struct DiskObjectStore {
    root: PathBuf,
    public_base_url: String,
}

impl DiskObjectStore {
    /// Create a store rooted at `root`. `public_base_url` is the externally
    /// visible server origin (no trailing slash).
    pub fn new(root: impl Into<PathBuf>, public_base_url: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            public_base_url: public_base_url.into(),
        }
    }

    /// Absolute filesystem location of a bucket-relative object path.
    ///
    /// Object paths come from sanitized uploads or from URLs we issued, but
    /// anything containing a parent-directory component is refused outright.
    fn resolve(&self, path: &str) -> Result<PathBuf, StorageError> {
        if Path::new(path)
            .components()
            .any(|c| !matches!(c, std::path::Component::Normal(_)))
        {
            return Err(StorageError::Io(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("invalid object path: {path}"),
            )));
        }
        Ok(self.root.join(PROPERTY_IMAGES_BUCKET).join(path))
    }
}

#[async_trait]
impl ObjectStore for DiskObjectStore {
    async fn put(
        &self,
        namespace: &str,
        filename: &str,
        bytes: &[u8],
    ) -> Result<String, StorageError> {
        let object_path = format!("{namespace}/{filename}");
        let file_path = self.resolve(&object_path)?;

        if tokio::fs::try_exists(&file_path).await? {
            return Err(StorageError::AlreadyExists);
        }

        if let Some(parent) = file_path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        tokio::fs::write(&file_path, bytes).await?;

        tracing::debug!(path = %object_path, size = bytes.len(), "Stored object");

        Ok(object_path)
    }

    async fn exists(&self, namespace: &str, filename: &str) -> Result<bool, StorageError> {
        let file_path = self.resolve(&format!("{namespace}/{filename}"))?;
        Ok(tokio::fs::try_exists(&file_path).await?)
    }

    async fn remove(&self, path: &str) -> Result<(), StorageError> {
        let file_path = self.resolve(path)?;
        match tokio::fs::remove_file(&file_path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(StorageError::Io(e)),
        }
    }

    fn public_url(&self, path: &str) -> String {
        format!(
            "{}/storage/{PROPERTY_IMAGES_BUCKET}/{path}",
            self.public_base_url
        )
    }

    fn path_from_url(&self, url: &str) -> Option<String> {
        let marker = format!("/{PROPERTY_IMAGES_BUCKET}/");
        let start = url.find(&marker)? + marker.len();
        let rest = &url[start..];
        let path = rest.split('?').next().unwrap_or(rest);
        if path.is_empty() {
            None
        } else {
            Some(path.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store() -> DiskObjectStore {
        DiskObjectStore::new("/tmp/unused", "http://localhost:3000")
    }

    #[test]
    fn public_url_and_path_round_trip() {
        let s = store();
        let url = s.public_url("abc/cabin.jpg");
        assert_eq!(
            url,
            "http://localhost:3000/storage/property-images/abc/cabin.jpg"
        );
        assert_eq!(s.path_from_url(&url).as_deref(), Some("abc/cabin.jpg"));
    }

    #[test]
    fn path_from_url_strips_query_string() {
        let s = store();
        let path = s.path_from_url(
            "http://localhost:3000/storage/property-images/abc/cabin.jpg?token=xyz",
        );
        assert_eq!(path.as_deref(), Some("abc/cabin.jpg"));
    }

    #[test]
    fn path_from_url_rejects_foreign_urls() {
        let s = store();
        assert_eq!(s.path_from_url("http://elsewhere/other-bucket/x.jpg"), None);
    }

    #[test]
    fn resolve_rejects_parent_components() {
        let s = store();
        assert!(s.resolve("../../etc/passwd").is_err());
        assert!(s.resolve("ok/file.jpg").is_ok());
    }
}
