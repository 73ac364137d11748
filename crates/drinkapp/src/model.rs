use crate::error::{DrinkError, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

pub const MIN_RATING: u8 = 1;
pub const MAX_RATING: u8 = 5;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ingredient {
    pub name: String,
    pub quantity: f64,
    pub unit: String,
}

impl Ingredient {
    pub fn new(name: impl Into<String>, quantity: f64, unit: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            quantity,
            unit: unit.into(),
        }
    }

    /// A usable ingredient has a name and a finite, positive quantity.
    pub fn ensure_valid(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(DrinkError::Invalid("ingredient name is required".to_string()));
        }
        if !self.quantity.is_finite() || self.quantity <= 0.0 {
            return Err(DrinkError::Invalid(format!(
                "ingredient quantity must be positive, got {} for '{}'",
                self.quantity, self.name
            )));
        }
        Ok(())
    }
}

impl fmt::Display for Ingredient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.quantity, self.unit, self.name)
    }
}

/// Parses the `"<quantity> <unit> <name>"` shorthand, e.g. `"50 ml Rum branco"`.
impl FromStr for Ingredient {
    type Err = DrinkError;

    fn from_str(s: &str) -> Result<Self> {
        let input = s.trim();
        let (quantity, rest) = input
            .split_once(char::is_whitespace)
            .unwrap_or((input, ""));
        let rest = rest.trim_start();
        let (unit, name) = rest.split_once(char::is_whitespace).unwrap_or((rest, ""));
        let name = name.trim();

        let quantity: f64 = quantity
            .replace(',', ".")
            .parse()
            .map_err(|_| DrinkError::Invalid(format!("bad ingredient quantity in '{}'", s)))?;
        if !quantity.is_finite() || quantity <= 0.0 {
            return Err(DrinkError::Invalid(format!(
                "ingredient quantity must be positive in '{}'",
                s
            )));
        }
        if unit.is_empty() || name.is_empty() {
            return Err(DrinkError::Invalid(format!(
                "expected '<quantity> <unit> <name>', got '{}'",
                s
            )));
        }
        Ok(Ingredient::new(name, quantity, unit))
    }
}

/// A drink that has not been persisted yet and therefore has no id.
#[derive(Debug, Clone, PartialEq)]
pub struct NewDrink {
    pub name: String,
    pub rating: u8,
    pub date: DateTime<Utc>,
    pub ingredients: Vec<Ingredient>,
    pub instructions: String,
    pub photo: Option<String>,
}

impl NewDrink {
    pub fn with_id(self, id: impl Into<String>) -> Drink {
        Drink {
            id: id.into(),
            name: self.name,
            rating: self.rating,
            date: self.date,
            ingredients: self.ingredients,
            instructions: self.instructions,
            photo: self.photo,
        }
    }

    pub fn ensure_valid(&self) -> Result<()> {
        check_fields(&self.name, self.rating, &self.ingredients)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Drink {
    pub id: String,
    pub name: String,
    pub rating: u8,
    #[serde(with = "crate::date::wire")]
    pub date: DateTime<Utc>,
    #[serde(default)]
    pub ingredients: Vec<Ingredient>,
    #[serde(default)]
    pub instructions: String,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "deserialize_photo"
    )]
    pub photo: Option<String>,
}

impl Drink {
    /// Checks the invariants every persisted drink must hold.
    pub fn ensure_valid(&self) -> Result<()> {
        check_fields(&self.name, self.rating, &self.ingredients)
    }

    /// Star string for display, e.g. `★★★☆☆`.
    pub fn stars(&self) -> String {
        stars(self.rating)
    }
}

pub fn is_valid_rating(rating: u8) -> bool {
    (MIN_RATING..=MAX_RATING).contains(&rating)
}

pub fn stars(rating: u8) -> String {
    let filled = rating.min(MAX_RATING) as usize;
    let empty = MAX_RATING as usize - filled;
    format!("{}{}", "★".repeat(filled), "☆".repeat(empty))
}

/// Empty photo references mean "no photo".
pub fn normalize_photo(photo: Option<String>) -> Option<String> {
    photo.filter(|p| !p.trim().is_empty())
}

fn deserialize_photo<'de, D: Deserializer<'de>>(d: D) -> std::result::Result<Option<String>, D::Error> {
    let raw: Option<String> = Option::deserialize(d)?;
    Ok(normalize_photo(raw))
}

fn check_fields(name: &str, rating: u8, ingredients: &[Ingredient]) -> Result<()> {
    if name.trim().is_empty() {
        return Err(DrinkError::Invalid("name is required".to_string()));
    }
    if !is_valid_rating(rating) {
        return Err(DrinkError::Invalid(format!(
            "rating must be between {} and {}, got {}",
            MIN_RATING, MAX_RATING, rating
        )));
    }
    ingredients.iter().try_for_each(Ingredient::ensure_valid)
}

/// Display orderings offered by the list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    /// Name ascending, case-insensitive.
    #[default]
    Name,
    /// Rating descending, most recent first among equal ratings.
    Rating,
    /// Date descending.
    Recent,
}

impl FromStr for SortOrder {
    type Err = DrinkError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "name" | "all" => Ok(SortOrder::Name),
            "rating" => Ok(SortOrder::Rating),
            "recent" | "date" => Ok(SortOrder::Recent),
            other => Err(DrinkError::Invalid(format!("unknown sort order '{}'", other))),
        }
    }
}

pub fn sort_drinks(drinks: &mut [Drink], order: SortOrder) {
    match order {
        SortOrder::Name => drinks.sort_by(compare_names),
        SortOrder::Rating => drinks.sort_by(|a, b| {
            b.rating
                .cmp(&a.rating)
                .then_with(|| b.date.cmp(&a.date))
        }),
        SortOrder::Recent => drinks.sort_by(|a, b| b.date.cmp(&a.date)),
    }
}

fn compare_names(a: &Drink, b: &Drink) -> Ordering {
    a.name
        .to_lowercase()
        .cmp(&b.name.to_lowercase())
        .then_with(|| a.name.cmp(&b.name))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Timelike};

    fn drink(id: &str, name: &str, rating: u8, day: u32) -> Drink {
        Drink {
            id: id.to_string(),
            name: name.to_string(),
            rating,
            date: Utc.with_ymd_and_hms(2024, 11, day, 12, 0, 0).unwrap(),
            ingredients: vec![],
            instructions: String::new(),
            photo: None,
        }
    }

    #[test]
    fn test_round_trip_keeps_every_field() {
        let original = Drink {
            id: "1731700000000".to_string(),
            name: "Mojito".to_string(),
            rating: 5,
            date: Utc
                .with_ymd_and_hms(2024, 11, 15, 21, 4, 9)
                .unwrap()
                .with_nanosecond(987_000_000)
                .unwrap(),
            ingredients: vec![
                Ingredient::new("Rum branco", 50.0, "ml"),
                Ingredient::new("Açúcar", 2.5, "colheres"),
            ],
            instructions: "Amasse a hortelã".to_string(),
            photo: Some("file:///photos/mojito.jpg".to_string()),
        };

        let json = serde_json::to_string(&original).unwrap();
        let decoded: Drink = serde_json::from_str(&json).unwrap();
        assert_eq!(decoded, original);
    }

    #[test]
    fn test_absent_photo_is_not_serialized() {
        let json = serde_json::to_value(drink("1", "Mojito", 5, 15)).unwrap();
        assert!(json.get("photo").is_none());
        assert_eq!(json["date"], "2024-11-15T12:00:00Z");
    }

    #[test]
    fn test_empty_photo_decodes_as_none() {
        let json = r#"{"id":"1","name":"A","rating":3,"date":"2024-11-15","photo":""}"#;
        let decoded: Drink = serde_json::from_str(json).unwrap();
        assert_eq!(decoded.photo, None);
        assert!(decoded.ingredients.is_empty());
        assert_eq!(decoded.instructions, "");
    }

    #[test]
    fn test_ensure_valid() {
        assert!(drink("1", "Mojito", 5, 1).ensure_valid().is_ok());
        assert!(drink("1", "   ", 5, 1).ensure_valid().is_err());
        assert!(drink("1", "Mojito", 0, 1).ensure_valid().is_err());
        assert!(drink("1", "Mojito", 6, 1).ensure_valid().is_err());
    }

    #[test]
    fn test_ensure_valid_checks_every_ingredient() {
        let bad = [
            Ingredient::new("Rum", f64::NAN, "ml"),
            Ingredient::new("Rum", f64::INFINITY, "ml"),
            Ingredient::new("Rum", 0.0, "ml"),
            Ingredient::new("Rum", -5.0, "ml"),
            Ingredient::new("  ", 50.0, "ml"),
        ];
        for ingredient in bad {
            assert!(ingredient.ensure_valid().is_err(), "{:?}", ingredient);
            let mut d = drink("1", "Mojito", 5, 1);
            d.ingredients = vec![Ingredient::new("Lima", 1.0, "unidade"), ingredient];
            assert!(matches!(d.ensure_valid(), Err(DrinkError::Invalid(_))));
        }
        assert!(Ingredient::new("Lima", 0.5, "unidade").ensure_valid().is_ok());
    }

    #[test]
    fn test_stars() {
        assert_eq!(stars(3), "★★★☆☆");
        assert_eq!(stars(0), "☆☆☆☆☆");
        assert_eq!(stars(9), "★★★★★");
    }

    #[test]
    fn test_parse_ingredient_shorthand() {
        let ing: Ingredient = "50 ml Rum branco".parse().unwrap();
        assert_eq!(ing, Ingredient::new("Rum branco", 50.0, "ml"));

        let ing: Ingredient = "0,5 unidade Lima".parse().unwrap();
        assert_eq!(ing.quantity, 0.5);
    }

    #[test]
    fn test_parse_ingredient_rejects_bad_input() {
        assert!("ml Rum".parse::<Ingredient>().is_err());
        assert!("0 ml Rum".parse::<Ingredient>().is_err());
        assert!("-3 ml Rum".parse::<Ingredient>().is_err());
        assert!("50 ml".parse::<Ingredient>().is_err());
    }

    #[test]
    fn test_sort_by_name_is_case_insensitive() {
        let mut drinks = vec![
            drink("1", "piña colada", 4, 1),
            drink("2", "Caipirinha", 5, 2),
            drink("3", "Mojito", 5, 3),
        ];
        sort_drinks(&mut drinks, SortOrder::Name);
        let names: Vec<_> = drinks.iter().map(|d| d.name.as_str()).collect();
        assert_eq!(names, vec!["Caipirinha", "Mojito", "piña colada"]);
    }

    #[test]
    fn test_sort_by_rating_breaks_ties_by_date() {
        let mut drinks = vec![
            drink("1", "Mojito", 5, 15),
            drink("2", "Caipirinha", 5, 20),
            drink("3", "Piña Colada", 4, 30),
        ];
        sort_drinks(&mut drinks, SortOrder::Rating);
        let ids: Vec<_> = drinks.iter().map(|d| d.id.as_str()).collect();
        assert_eq!(ids, vec!["2", "1", "3"]);
    }

    #[test]
    fn test_sort_recent_first() {
        let mut drinks = vec![
            drink("1", "Mojito", 5, 15),
            drink("2", "Caipirinha", 5, 20),
            drink("3", "Piña Colada", 4, 1),
        ];
        sort_drinks(&mut drinks, SortOrder::Recent);
        let ids: Vec<_> = drinks.iter().map(|d| d.id.as_str()).collect();
        assert_eq!(ids, vec!["2", "1", "3"]);
    }

    #[test]
    fn test_sort_order_parsing() {
        assert_eq!("rating".parse::<SortOrder>().unwrap(), SortOrder::Rating);
        assert_eq!("RECENT".parse::<SortOrder>().unwrap(), SortOrder::Recent);
        assert_eq!("all".parse::<SortOrder>().unwrap(), SortOrder::Name);
        assert!("stars".parse::<SortOrder>().is_err());
    }
}
