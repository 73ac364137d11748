use super::kv::KeyValueStore;
use crate::error::{DrinkError, Result};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs;
use uuid::Uuid;

/// Key-value store keeping one JSON file per key under a root directory.
pub struct FsKeyValueStore {
    root: PathBuf,
}

impl FsKeyValueStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// On-disk location of the value stored under `key`.
    pub fn path_for(&self, key: &str) -> PathBuf {
        self.root.join(format!("{}.json", file_stem(key)))
    }

    async fn ensure_root(&self) -> Result<()> {
        fs::create_dir_all(&self.root).await.map_err(DrinkError::Io)
    }
}

/// Keys may contain characters that are not valid in file names (`@`, `:`).
fn file_stem(key: &str) -> String {
    key.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '-' || c == '_' || c == '.' {
                c
            } else {
                '_'
            }
        })
        .collect()
}

impl KeyValueStore for FsKeyValueStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        match fs::read_to_string(self.path_for(key)).await {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(DrinkError::Io(e)),
        }
    }

    async fn set(&self, key: &str, value: &str) -> Result<()> {
        self.ensure_root().await?;
        let target = self.path_for(key);

        // Atomic write
        let tmp = self
            .root
            .join(format!(".{}-{}.tmp", file_stem(key), Uuid::new_v4()));
        fs::write(&tmp, value).await.map_err(DrinkError::Io)?;
        if let Err(e) = fs::rename(&tmp, &target).await {
            let _ = fs::remove_file(&tmp).await;
            return Err(DrinkError::Io(e));
        }
        Ok(())
    }
}
