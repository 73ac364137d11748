use super::surface;
use crate::date;
use crate::error::{DrinkError, Operation, Result};
use crate::model::{normalize_photo, Drink, Ingredient, NewDrink};
use crate::store::{Filter, Row, Select, TableClient};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use tracing::{debug, info, warn};

pub const DRINKS_TABLE: &str = "drinks";
pub const INGREDIENTS_TABLE: &str = "ingredients";
pub const DRINK_FK: &str = "drink_id";

/// Persists drinks in a relational backend: one `drinks` row per drink and
/// one `ingredients` row per ingredient.
///
/// The drink row is the unit of success. Ingredient writes that fail after
/// the drink row was written are logged and dropped, so a drink can end up
/// with fewer ingredients than it was saved with.
pub struct RemoteRepository<T> {
    client: T,
}

/// A `drinks` row with its embedded `ingredients`.
#[derive(Debug, Deserialize)]
struct DrinkRow {
    #[serde(deserialize_with = "id_string")]
    id: String,
    name: String,
    rating: u8,
    date: String,
    #[serde(default)]
    instructions: Option<String>,
    #[serde(default)]
    photo: Option<String>,
    #[serde(default)]
    ingredients: Vec<IngredientRow>,
}

#[derive(Debug, Deserialize)]
struct IngredientRow {
    name: String,
    quantity: f64,
    unit: String,
}

/// Writable scalar columns of `drinks`.
#[derive(Debug, Serialize)]
struct DrinkColumns<'a> {
    name: &'a str,
    rating: u8,
    date: String,
    instructions: &'a str,
    photo: Option<&'a str>,
}

impl<'a> DrinkColumns<'a> {
    fn new(
        name: &'a str,
        rating: u8,
        date: &DateTime<Utc>,
        instructions: &'a str,
        photo: Option<&'a str>,
    ) -> Self {
        Self {
            name,
            rating,
            date: date::to_wire(date),
            instructions,
            photo: photo.filter(|p| !p.trim().is_empty()),
        }
    }
}

#[derive(Debug, Serialize)]
struct IngredientColumns<'a> {
    drink_id: &'a Value,
    name: &'a str,
    quantity: f64,
    unit: &'a str,
}

fn id_string<'de, D: Deserializer<'de>>(d: D) -> std::result::Result<String, D::Error> {
    match Value::deserialize(d)? {
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        other => Err(serde::de::Error::custom(format!("unexpected id {}", other))),
    }
}

fn to_row<S: Serialize>(value: &S) -> Result<Row> {
    match serde_json::to_value(value)? {
        Value::Object(map) => Ok(map),
        other => Err(DrinkError::Store(format!("expected a row object, got {}", other))),
    }
}

impl DrinkRow {
    fn into_drink(self) -> Result<Drink> {
        Ok(Drink {
            id: self.id,
            name: self.name,
            rating: self.rating,
            date: date::parse_wire(&self.date)?,
            ingredients: self
                .ingredients
                .into_iter()
                .map(|i| Ingredient::new(i.name, i.quantity, i.unit))
                .collect(),
            instructions: self.instructions.unwrap_or_default(),
            photo: normalize_photo(self.photo),
        })
    }
}

impl<T: TableClient> RemoteRepository<T> {
    pub fn new(client: T) -> Self {
        Self { client }
    }

    pub fn client(&self) -> &T {
        &self.client
    }

    /// Every drink with its ingredients, most recent first.
    pub async fn load(&self) -> Result<Vec<Drink>> {
        let result = async {
            let query = Select::all()
                .embed(INGREDIENTS_TABLE, DRINK_FK)
                .order_by("date", true);
            let rows = self.client.select(DRINKS_TABLE, &query).await?;
            if rows.is_empty() {
                debug!("no drinks stored remotely");
            }
            rows.into_iter()
                .map(|row| {
                    let row: DrinkRow = serde_json::from_value(Value::Object(row))?;
                    row.into_drink()
                })
                .collect::<Result<Vec<_>>>()
        }
        .await;

        let drinks = result.map_err(|e| surface(Operation::Load, e))?;
        debug!(count = drinks.len(), "loaded drinks");
        Ok(drinks)
    }

    /// Insert the drink row, then its ingredients under the server-assigned id.
    pub async fn add(&self, drink: NewDrink) -> Result<String> {
        let result = async {
            debug!(
                name = %drink.name,
                ingredients = drink.ingredients.len(),
                "adding drink"
            );
            let columns = DrinkColumns::new(
                &drink.name,
                drink.rating,
                &drink.date,
                &drink.instructions,
                drink.photo.as_deref(),
            );
            let created = self
                .client
                .insert(DRINKS_TABLE, vec![to_row(&columns)?])
                .await?;
            let id_value = created
                .into_iter()
                .next()
                .and_then(|mut row| row.remove("id"))
                .ok_or_else(|| DrinkError::Store("drink created but no row returned".into()))?;

            self.insert_ingredients(&id_value, &drink.ingredients).await;
            let id = match id_value {
                Value::String(s) => s,
                other => other.to_string(),
            };
            Ok::<_, DrinkError>(id)
        }
        .await;

        let id = result.map_err(|e| surface(Operation::Add, e))?;
        info!(%id, "drink added");
        Ok(id)
    }

    /// Update the drink row, then replace its ingredients.
    ///
    /// Fails with [`DrinkError::DrinkNotFound`] if no row has the drink's id.
    pub async fn update(&self, drink: &Drink) -> Result<()> {
        let result = async {
            debug!(id = %drink.id, name = %drink.name, "updating drink");
            let columns = DrinkColumns::new(
                &drink.name,
                drink.rating,
                &drink.date,
                &drink.instructions,
                drink.photo.as_deref(),
            );
            let updated = self
                .client
                .update(
                    DRINKS_TABLE,
                    to_row(&columns)?,
                    &[Filter::eq("id", drink.id.as_str())],
                )
                .await?;
            if updated.is_empty() {
                return Err(DrinkError::DrinkNotFound(drink.id.clone()));
            }

            let id_value = Value::String(drink.id.clone());
            if let Err(e) = self
                .client
                .delete(INGREDIENTS_TABLE, &[Filter::eq(DRINK_FK, id_value.clone())])
                .await
            {
                warn!(id = %drink.id, error = %e, "failed to clear old ingredients");
            }
            self.insert_ingredients(&id_value, &drink.ingredients).await;
            Ok::<_, DrinkError>(())
        }
        .await;

        result.map_err(|e| surface(Operation::Update, e))?;
        info!(id = %drink.id, "drink updated");
        Ok(())
    }

    /// Delete the drink row; its ingredients go with it.
    pub async fn remove(&self, id: &str) -> Result<()> {
        debug!(%id, "removing drink");
        self.client
            .delete(DRINKS_TABLE, &[Filter::eq("id", id)])
            .await
            .map_err(|e| surface(Operation::Remove, e))?;
        info!(%id, "drink removed");
        Ok(())
    }

    /// Best effort: failures are logged, never returned.
    async fn insert_ingredients(&self, drink_id: &Value, ingredients: &[Ingredient]) {
        if ingredients.is_empty() {
            return;
        }
        let rows: Result<Vec<Row>> = ingredients
            .iter()
            .map(|i| {
                to_row(&IngredientColumns {
                    drink_id,
                    name: &i.name,
                    quantity: i.quantity,
                    unit: &i.unit,
                })
            })
            .collect();

        let outcome = match rows {
            Ok(rows) => self.client.insert(INGREDIENTS_TABLE, rows).await.map(|_| ()),
            Err(e) => Err(e),
        };
        match outcome {
            Ok(()) => debug!(%drink_id, count = ingredients.len(), "ingredients inserted"),
            Err(e) => warn!(%drink_id, error = %e, "failed to insert ingredients, drink kept"),
        }
    }
}
