//! # Repository Facade
//!
//! [`Repository`] is the single persistence entry point for the rest of the
//! crate. It is a tagged union over the two implementations, chosen once from
//! a [`BackendSelector`]:
//!
//! - [`local::LocalRepository`]: whole collection in one key-value entry,
//!   seeded with sample drinks on first use, ids derived from timestamps.
//! - [`remote::RemoteRepository`]: `drinks` and `ingredients` tables, ids
//!   generated by the backend, no seeding.
//!
//! Each of `load`, `add`, `update` and `remove` goes to the selected variant
//! and nowhere else. A failing remote never falls back to local storage.
//!
//! ## Errors
//!
//! Transport failures are logged with their cause and returned as
//! [`DrinkError::Failed`] carrying only the operation. Errors that mean
//! something to the caller ([`DrinkError::DrinkNotFound`],
//! [`DrinkError::Invalid`], [`DrinkError::CorruptStore`]) pass through as is.

use crate::config::{BackendSelector, DrinksConfig};
use crate::error::{DrinkError, Operation, Result};
use crate::model::{Drink, NewDrink};
use crate::store::{FsKeyValueStore, KeyValueStore, PostgrestClient, TableClient};

pub mod local;
pub mod remote;

pub use local::{LocalRepository, STORAGE_KEY};
pub use remote::RemoteRepository;

/// Log the cause of a failed operation and collapse it into its category.
pub(crate) fn surface(op: Operation, err: DrinkError) -> DrinkError {
    if err.is_domain() {
        tracing::warn!(operation = ?op, error = %err, "repository operation rejected");
        err
    } else {
        tracing::error!(operation = ?op, error = %err, "repository operation failed");
        DrinkError::Failed(op)
    }
}

pub enum Repository<K, T> {
    Local(LocalRepository<K>),
    Remote(RemoteRepository<T>),
}

/// The repository used by the application: files on disk or a PostgREST
/// endpoint.
pub type AppRepository = Repository<FsKeyValueStore, PostgrestClient>;

impl AppRepository {
    /// Select and build the backend described by `config`.
    pub fn open(config: &DrinksConfig) -> Result<Self> {
        let selector = BackendSelector::from_config(config);
        if selector.is_remote() {
            let client = PostgrestClient::new(&config.backend.url, &config.backend.key)?;
            Ok(Repository::Remote(RemoteRepository::new(client)))
        } else {
            let store = FsKeyValueStore::new(config.data_dir()?);
            Ok(Repository::Local(LocalRepository::new(store)))
        }
    }
}

impl<K: KeyValueStore, T: TableClient> Repository<K, T> {
    /// Pick one of two prepared repositories. The other one is dropped.
    pub fn from_selector(
        selector: BackendSelector,
        local: LocalRepository<K>,
        remote: RemoteRepository<T>,
    ) -> Self {
        if selector.is_remote() {
            Repository::Remote(remote)
        } else {
            Repository::Local(local)
        }
    }

    pub fn selector(&self) -> BackendSelector {
        match self {
            Repository::Local(_) => BackendSelector::local(),
            Repository::Remote(_) => BackendSelector::remote(),
        }
    }

    pub async fn load(&self) -> Result<Vec<Drink>> {
        match self {
            Repository::Local(repo) => repo.load().await,
            Repository::Remote(repo) => repo.load().await,
        }
    }

    /// Persist a new drink and return the id the backend assigned to it.
    pub async fn add(&self, drink: NewDrink) -> Result<String> {
        drink.ensure_valid()?;
        match self {
            Repository::Local(repo) => repo.add(drink).await,
            Repository::Remote(repo) => repo.add(drink).await,
        }
    }

    pub async fn update(&self, drink: &Drink) -> Result<()> {
        drink.ensure_valid()?;
        match self {
            Repository::Local(repo) => repo.update(drink).await,
            Repository::Remote(repo) => repo.update(drink).await,
        }
    }

    pub async fn remove(&self, id: &str) -> Result<()> {
        match self {
            Repository::Local(repo) => repo.remove(id).await,
            Repository::Remote(repo) => repo.remove(id).await,
        }
    }
}
