//! Sample drinks written to empty local storage on first run.

use crate::model::{Drink, Ingredient};
use chrono::{DateTime, NaiveDate, Utc};

fn day(year: i32, month: u32, day: u32) -> DateTime<Utc> {
    NaiveDate::from_ymd_opt(year, month, day)
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc())
        .unwrap_or_default()
}

pub fn seed_drinks() -> Vec<Drink> {
    vec![
        Drink {
            id: "1".to_string(),
            name: "Mojito".to_string(),
            rating: 5,
            date: day(2024, 11, 15),
            ingredients: vec![
                Ingredient::new("Rum branco", 50.0, "ml"),
                Ingredient::new("Açúcar", 2.0, "colheres"),
                Ingredient::new("Hortelã", 10.0, "folhas"),
                Ingredient::new("Lima", 1.0, "unidade"),
                Ingredient::new("Água com gás", 100.0, "ml"),
            ],
            instructions: "Amasse a hortelã com açúcar no copo. Adicione o rum e o suco de lima. \
                           Complete com água com gás e gelo. Mexa suavemente."
                .to_string(),
            photo: None,
        },
        Drink {
            id: "2".to_string(),
            name: "Caipirinha".to_string(),
            rating: 5,
            date: day(2024, 11, 20),
            ingredients: vec![
                Ingredient::new("Cachaça", 50.0, "ml"),
                Ingredient::new("Limão", 1.0, "unidade"),
                Ingredient::new("Açúcar", 2.0, "colheres"),
                Ingredient::new("Gelo", 4.0, "cubos"),
            ],
            instructions: "Corte o limão em pedaços. Coloque no copo com açúcar e amasse. \
                           Adicione a cachaça e o gelo. Mexa bem."
                .to_string(),
            photo: None,
        },
        Drink {
            id: "3".to_string(),
            name: "Piña Colada".to_string(),
            rating: 4,
            date: day(2024, 12, 1),
            ingredients: vec![
                Ingredient::new("Rum", 50.0, "ml"),
                Ingredient::new("Leite de coco", 100.0, "ml"),
                Ingredient::new("Abacaxi", 150.0, "ml"),
                Ingredient::new("Gelo", 6.0, "cubos"),
            ],
            instructions: "Bata todos os ingredientes no liquidificador até ficar cremoso. \
                           Sirva em copo alto com gelo."
                .to_string(),
            photo: None,
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use std::collections::HashSet;

    #[test]
    fn test_seed_is_three_valid_drinks_with_unique_ids() {
        let drinks = seed_drinks();
        assert_eq!(drinks.len(), 3);
        assert!(drinks.iter().all(|d| d.ensure_valid().is_ok()));
        let ids: HashSet<_> = drinks.iter().map(|d| d.id.as_str()).collect();
        assert_eq!(ids.len(), 3);
    }

    #[test]
    fn test_seed_dates_are_utc_midnight() {
        let drinks = seed_drinks();
        assert_eq!(drinks[0].date, Utc.with_ymd_and_hms(2024, 11, 15, 0, 0, 0).unwrap());
        assert_eq!(drinks[2].date, Utc.with_ymd_and_hms(2024, 12, 1, 0, 0, 0).unwrap());
    }
}
