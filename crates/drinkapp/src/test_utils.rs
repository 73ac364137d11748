use crate::repository::{LocalRepository, RemoteRepository, Repository};
use crate::store::{FsKeyValueStore, MemTables};
use std::path::PathBuf;
use tempfile::TempDir;

pub struct TestEnv {
    // Keeps the directory alive until the test is done
    pub _temp_dir: TempDir,
    pub store: FsKeyValueStore,
    pub tables: MemTables,
    pub root: PathBuf,
}

impl Default for TestEnv {
    fn default() -> Self {
        Self::new()
    }
}

impl TestEnv {
    pub fn new() -> Self {
        let temp_dir = tempfile::tempdir().expect("failed to create temp dir");
        let root = temp_dir.path().to_path_buf();
        Self {
            _temp_dir: temp_dir,
            store: FsKeyValueStore::new(root.clone()),
            tables: MemTables::new().with_cascade("ingredients", "drink_id", "drinks"),
            root,
        }
    }

    /// Local repository on the temp dir.
    pub fn local(&self) -> Repository<&FsKeyValueStore, &MemTables> {
        Repository::Local(LocalRepository::new(&self.store))
    }

    /// Remote repository on the in-memory tables.
    pub fn remote(&self) -> Repository<&FsKeyValueStore, &MemTables> {
        Repository::Remote(RemoteRepository::new(&self.tables))
    }
}
