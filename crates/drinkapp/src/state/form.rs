use crate::model::{is_valid_rating, normalize_photo, Drink, Ingredient, NewDrink};
use chrono::{DateTime, Utc};
use std::collections::BTreeMap;
use std::fmt;
use tracing::debug;

/// Form fields that can carry a validation message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FormField {
    Name,
    Rating,
}

impl fmt::Display for FormField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FormField::Name => write!(f, "name"),
            FormField::Rating => write!(f, "rating"),
        }
    }
}

pub const NAME_REQUIRED: &str = "Drink name is required";
pub const RATING_REQUIRED: &str = "Select a rating from 1 to 5";

/// Editable draft of a drink, used for both creating and editing.
///
/// A rating of `0` means "not chosen yet".
#[derive(Debug, Clone, PartialEq)]
pub struct DrinkForm {
    name: String,
    rating: u8,
    date: DateTime<Utc>,
    ingredients: Vec<Ingredient>,
    instructions: String,
    photo: Option<String>,
    errors: BTreeMap<FormField, String>,
}

impl Default for DrinkForm {
    fn default() -> Self {
        Self::new()
    }
}

impl DrinkForm {
    /// An empty form dated now.
    pub fn new() -> Self {
        Self {
            name: String::new(),
            rating: 0,
            date: Utc::now(),
            ingredients: Vec::new(),
            instructions: String::new(),
            photo: None,
            errors: BTreeMap::new(),
        }
    }

    /// A form pre-filled from an existing drink.
    pub fn from_drink(drink: &Drink) -> Self {
        let mut form = Self::new();
        form.load_drink(drink);
        form
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub fn rating(&self) -> u8 {
        self.rating
    }

    pub fn set_rating(&mut self, rating: u8) {
        self.rating = rating;
    }

    pub fn date(&self) -> DateTime<Utc> {
        self.date
    }

    pub fn set_date(&mut self, date: DateTime<Utc>) {
        self.date = date;
    }

    pub fn ingredients(&self) -> &[Ingredient] {
        &self.ingredients
    }

    pub fn instructions(&self) -> &str {
        &self.instructions
    }

    pub fn set_instructions(&mut self, instructions: impl Into<String>) {
        self.instructions = instructions.into();
    }

    pub fn photo(&self) -> Option<&str> {
        self.photo.as_deref()
    }

    pub fn set_photo(&mut self, photo: Option<String>) {
        self.photo = photo;
    }

    /// Messages from the last [`DrinkForm::validate`] call.
    pub fn errors(&self) -> &BTreeMap<FormField, String> {
        &self.errors
    }

    pub fn add_ingredient(&mut self, ingredient: Ingredient) {
        debug!(name = %ingredient.name, "adding ingredient");
        self.ingredients.push(ingredient);
    }

    /// # Panics
    ///
    /// Panics if `index` is out of bounds.
    pub fn remove_ingredient(&mut self, index: usize) -> Ingredient {
        debug!(index, "removing ingredient");
        self.ingredients.remove(index)
    }

    /// # Panics
    ///
    /// Panics if `index` is out of bounds.
    pub fn update_ingredient(&mut self, index: usize, ingredient: Ingredient) {
        debug!(index, "updating ingredient");
        self.ingredients[index] = ingredient;
    }

    pub fn clear_ingredients(&mut self) {
        self.ingredients.clear();
    }

    /// Check the required fields and replace the error map with the result.
    ///
    /// Returns `true` when there are no errors.
    pub fn validate(&mut self) -> bool {
        let mut errors = BTreeMap::new();
        if self.name.trim().is_empty() {
            errors.insert(FormField::Name, NAME_REQUIRED.to_string());
        }
        if !is_valid_rating(self.rating) {
            errors.insert(FormField::Rating, RATING_REQUIRED.to_string());
        }
        self.errors = errors;
        self.errors.is_empty()
    }

    /// Replace every field with the values of `drink` and clear errors.
    pub fn load_drink(&mut self, drink: &Drink) {
        debug!(id = %drink.id, "loading drink into form");
        self.name = drink.name.clone();
        self.rating = drink.rating;
        self.date = drink.date;
        self.ingredients = drink.ingredients.clone();
        self.instructions = drink.instructions.clone();
        self.photo = drink.photo.clone();
        self.errors.clear();
    }

    /// The draft as a drink to be created. The repository assigns the id.
    pub fn new_drink(&self) -> NewDrink {
        NewDrink {
            name: self.name.trim().to_string(),
            rating: self.rating,
            date: self.date,
            ingredients: self.ingredients.clone(),
            instructions: self.instructions.trim().to_string(),
            photo: normalize_photo(self.photo.clone()),
        }
    }

    /// The draft as the drink with `id`, for saving an edit.
    pub fn drink_data(&self, id: impl Into<String>) -> Drink {
        self.new_drink().with_id(id)
    }

    pub fn reset(&mut self) {
        debug!("resetting form");
        *self = Self::new();
    }
}
