use super::surface;
use crate::error::{DrinkError, Operation, Result};
use crate::model::{Drink, NewDrink};
use crate::seed::seed_drinks;
use crate::store::KeyValueStore;
use chrono::Utc;
use tracing::{debug, info};

/// Key under which the whole collection is stored.
pub const STORAGE_KEY: &str = "@drinks:drinks";

/// Persists the full drink collection as one JSON array in a key-value store.
///
/// Every mutation is load, modify, save. There is no locking: two
/// overlapping mutations can race and the last write wins.
pub struct LocalRepository<K> {
    store: K,
    key: String,
}

impl<K: KeyValueStore> LocalRepository<K> {
    pub fn new(store: K) -> Self {
        Self::with_key(store, STORAGE_KEY)
    }

    pub fn with_key(store: K, key: &str) -> Self {
        Self {
            store,
            key: key.to_string(),
        }
    }

    pub fn store(&self) -> &K {
        &self.store
    }

    /// Load every drink, seeding storage on first use.
    ///
    /// A stored value that does not parse is reported as
    /// [`DrinkError::CorruptStore`] and left untouched.
    pub async fn load(&self) -> Result<Vec<Drink>> {
        self.read_all()
            .await
            .map_err(|e| surface(Operation::Load, e))
    }

    /// Overwrite the stored collection in a single write.
    pub async fn save_all(&self, drinks: &[Drink]) -> Result<()> {
        self.write_all(drinks)
            .await
            .map_err(|e| surface(Operation::Save, e))
    }

    /// Append a drink under a fresh timestamp-derived id and return the id.
    pub async fn add(&self, drink: NewDrink) -> Result<String> {
        let result = async {
            let mut drinks = self.read_all().await?;
            let id = next_id(&drinks);
            debug!(%id, name = %drink.name, "adding drink");
            drinks.push(drink.with_id(id.clone()));
            self.write_all(&drinks).await?;
            Ok::<_, DrinkError>(id)
        }
        .await;

        let id = result.map_err(|e| surface(Operation::Add, e))?;
        info!(%id, "drink added");
        Ok(id)
    }

    /// Replace the drink with the same id.
    ///
    /// Fails with [`DrinkError::DrinkNotFound`] if no stored drink has that
    /// id; nothing is written in that case.
    pub async fn update(&self, drink: &Drink) -> Result<()> {
        let result = async {
            let mut drinks = self.read_all().await?;
            let slot = drinks
                .iter_mut()
                .find(|d| d.id == drink.id)
                .ok_or_else(|| DrinkError::DrinkNotFound(drink.id.clone()))?;
            *slot = drink.clone();
            self.write_all(&drinks).await
        }
        .await;

        result.map_err(|e| surface(Operation::Update, e))?;
        info!(id = %drink.id, "drink updated");
        Ok(())
    }

    /// Remove the drink with `id`. Removing an unknown id is a no-op.
    pub async fn remove(&self, id: &str) -> Result<()> {
        let result = async {
            let mut drinks = self.read_all().await?;
            let before = drinks.len();
            drinks.retain(|d| d.id != id);
            if drinks.len() == before {
                debug!(%id, "no drink with this id, nothing to remove");
            }
            self.write_all(&drinks).await
        }
        .await;

        result.map_err(|e| surface(Operation::Remove, e))?;
        info!(%id, "drink removed");
        Ok(())
    }

    async fn write_all(&self, drinks: &[Drink]) -> Result<()> {
        debug!(count = drinks.len(), "saving drinks");
        let data = serde_json::to_string(drinks)?;
        self.store.set(&self.key, &data).await
    }

    async fn read_all(&self) -> Result<Vec<Drink>> {
        let Some(data) = self.store.get(&self.key).await? else {
            info!("no stored drinks, writing sample data");
            let seed = seed_drinks();
            self.write_all(&seed).await?;
            return Ok(seed);
        };

        let drinks: Vec<Drink> =
            serde_json::from_str(&data).map_err(|e| DrinkError::CorruptStore(e.to_string()))?;
        debug!(count = drinks.len(), "loaded drinks");
        Ok(drinks)
    }
}

/// Milliseconds since the epoch, bumped until no drink in `drinks` uses it.
fn next_id(drinks: &[Drink]) -> String {
    let mut candidate = Utc::now().timestamp_millis();
    loop {
        let id = candidate.to_string();
        if drinks.iter().all(|d| d.id != id) {
            return id;
        }
        candidate += 1;
    }
}
