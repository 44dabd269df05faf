//! The object-store capability interface.
//!
//! Property images live in an external object store consumed through
//! [`ObjectStore`]; this crate ships [`disk::DiskObjectStore`], which keeps
//! objects under a local directory served as static files. Paths are always
//! relative to the `property-images` bucket and namespaced per provider
//! account (`{account_id}/{filename}`).

pub mod disk;

use async_trait::async_trait;

pub use disk::DiskObjectStore;

/// Bucket that holds every uploaded property image.
pub const PROPERTY_IMAGES_BUCKET: &str = "property-images";

/// Errors surfaced by an object store.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// An object with the same name already exists in the namespace.
    #[error("You have already uploaded this image.")]
    AlreadyExists,

    #[error("Storage error: {0}")]
    Io(#[from] std::io::Error),
}

/// Capability interface over the external object store.
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Store `bytes` as `{namespace}/{filename}`, returning the object path.
    ///
    /// Never overwrites: an existing object with the same path fails with
    /// [`StorageError::AlreadyExists`].
    async fn put(
        &self,
        namespace: &str,
        filename: &str,
        bytes: &[u8],
    ) -> Result<String, StorageError>;

    /// Whether `{namespace}/{filename}` already exists.
    async fn exists(&self, namespace: &str, filename: &str) -> Result<bool, StorageError>;

    /// Remove the object at `path`. Removing a missing object is not an error.
    async fn remove(&self, path: &str) -> Result<(), StorageError>;

    /// Publicly resolvable URL for the object at `path`.
    fn public_url(&self, path: &str) -> String;

    /// Extract the bucket-relative object path from a public URL, if the URL
    /// points into this store's bucket.
    fn path_from_url(&self, url: &str) -> Option<String>;
}
