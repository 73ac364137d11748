use crate::error::{DrinkError, Result};
use crate::model::{sort_drinks, Drink, NewDrink, SortOrder};
use crate::repository::Repository;
use crate::store::{KeyValueStore, TableClient};
use tracing::{debug, error, info};

/// The loaded drink collection and the status of the last operation.
pub struct DrinkList<K, T> {
    repository: Repository<K, T>,
    drinks: Vec<Drink>,
    loading: bool,
    error: Option<String>,
}

impl<K: KeyValueStore, T: TableClient> DrinkList<K, T> {
    /// Wrap `repository` and perform the initial load.
    ///
    /// A failed initial load is recorded in [`DrinkList::error`], not returned.
    pub async fn open(repository: Repository<K, T>) -> Self {
        let mut list = Self {
            repository,
            drinks: Vec::new(),
            loading: true,
            error: None,
        };
        list.refresh().await;
        list
    }

    pub fn repository(&self) -> &Repository<K, T> {
        &self.repository
    }

    pub fn drinks(&self) -> &[Drink] {
        &self.drinks
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn get(&self, id: &str) -> Option<&Drink> {
        self.drinks.iter().find(|d| d.id == id)
    }

    /// A copy of the collection in the given display order.
    pub fn sorted(&self, order: SortOrder) -> Vec<Drink> {
        let mut drinks = self.drinks.clone();
        sort_drinks(&mut drinks, order);
        drinks
    }

    /// Reload the collection from the repository.
    ///
    /// On failure the previous collection is kept and the message recorded.
    pub async fn refresh(&mut self) {
        self.loading = true;
        self.error = None;
        debug!("loading drinks");

        match self.repository.load().await {
            Ok(drinks) => {
                debug!(count = drinks.len(), "drinks loaded");
                self.drinks = drinks;
            }
            Err(e) => {
                error!(error = %e, "could not load drinks");
                self.error = Some(e.to_string());
            }
        }
        self.loading = false;
    }

    /// Persist a new drink, then reload. Returns the assigned id.
    pub async fn add_new_drink(&mut self, drink: NewDrink) -> Result<String> {
        self.error = None;
        debug!(name = %drink.name, "adding drink");
        let id = self.repository.add(drink).await.map_err(|e| self.record(e))?;
        self.refresh().await;
        info!(%id, "drink added");
        Ok(id)
    }

    pub async fn update_existing_drink(&mut self, drink: &Drink) -> Result<()> {
        self.error = None;
        debug!(id = %drink.id, "updating drink");
        self.repository
            .update(drink)
            .await
            .map_err(|e| self.record(e))?;
        self.refresh().await;
        info!(id = %drink.id, "drink updated");
        Ok(())
    }

    pub async fn remove_drink(&mut self, id: &str) -> Result<()> {
        self.error = None;
        debug!(%id, "removing drink");
        self.repository.remove(id).await.map_err(|e| self.record(e))?;
        self.refresh().await;
        info!(%id, "drink removed");
        Ok(())
    }

    fn record(&mut self, e: DrinkError) -> DrinkError {
        error!(error = %e, "drink operation failed");
        self.error = Some(e.to_string());
        e
    }
}
