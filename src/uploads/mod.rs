//! Uploaded asset persistence.

pub mod filename;

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::RwLock;

use async_trait::async_trait;
use bytes::Bytes;

use crate::error::AppError;

pub use filename::{intro_filename, secure_filename};

/// Capability to persist bytes under a name. Names are expected to be
/// already sanitized with [`secure_filename`].
#[async_trait]
pub trait AssetStore: Send + Sync {
    async fn put(&self, name: &str, data: Bytes) -> Result<(), AppError>;
}

/// Rejects names that `secure_filename` would have changed.
fn check_name(name: &str) -> Result<(), AppError> {
    if name.is_empty() || name != secure_filename(name) {
        return Err(AppError::Validation(format!("unsafe asset name '{}'", name)));
    }
    Ok(())
}

/// Writes assets into a single directory.
pub struct FsAssetStore {
    root: PathBuf,
}

impl FsAssetStore {
    /// Creates the directory if needed.
    pub fn new(root: PathBuf) -> Result<Self, AppError> {
        std::fs::create_dir_all(&root)?;
        Ok(Self { root })
    }

    pub fn root(&self) -> &PathBuf {
        &self.root
    }
}

#[async_trait]
impl AssetStore for FsAssetStore {
    async fn put(&self, name: &str, data: Bytes) -> Result<(), AppError> {
        check_name(name)?;

        let path = self.root.join(name);
        tokio::fs::write(&path, &data).await?;
        tracing::info!(path = %path.display(), bytes = data.len(), "Asset stored");
        Ok(())
    }
}

/// Keeps assets in memory. Used where touching disk is undesirable.
#[derive(Default)]
pub struct MemoryAssetStore {
    assets: RwLock<HashMap<String, Bytes>>,
}

impl MemoryAssetStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &str) -> Option<Bytes> {
        self.assets.read().ok()?.get(name).cloned()
    }
}

#[async_trait]
impl AssetStore for MemoryAssetStore {
    async fn put(&self, name: &str, data: Bytes) -> Result<(), AppError> {
        check_name(name)?;
        self.assets
            .write()
            .map_err(|_| AppError::Internal("asset map lock poisoned".into()))?
            .insert(name.to_string(), data);
        Ok(())
    }
}
