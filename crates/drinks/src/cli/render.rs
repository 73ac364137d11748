//! # Rendering
//!
//! Plain text output for the terminal. Every function returns a `String`;
//! printing is left to the command handlers.

use drinkapp::config::BackendSelector;
use drinkapp::date;
use drinkapp::model::Drink;
use drinkapp::state::FormField;
use std::collections::BTreeMap;
use std::fmt::Write;

/// Width of the id column in the list view. Local ids are 13-digit timestamps.
pub const COL_ID: usize = 13;

pub fn drink_list(drinks: &[Drink]) -> String {
    if drinks.is_empty() {
        return "No drinks yet. Add one with `drinks add --name <NAME> --rating <1-5>`.\n"
            .to_string();
    }
    let mut out = String::new();
    for drink in drinks {
        let _ = writeln!(out, "{}", drink_row(drink));
    }
    out
}

pub fn drink_row(drink: &Drink) -> String {
    format!(
        "{:>width$}  {}  {}  {}",
        drink.id,
        drink.stars(),
        date::format_display(&drink.date),
        drink.name,
        width = COL_ID
    )
}

pub fn drink_detail(drink: &Drink) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", drink.name);
    let _ = writeln!(out, "{}  {}", drink.stars(), date::format_display(&drink.date));

    if !drink.ingredients.is_empty() {
        let _ = writeln!(out, "\nIngredients:");
        for ingredient in &drink.ingredients {
            let _ = writeln!(out, "  - {}", ingredient);
        }
    }
    if !drink.instructions.is_empty() {
        let _ = writeln!(out, "\nInstructions:\n  {}", drink.instructions);
    }
    if let Some(photo) = &drink.photo {
        let _ = writeln!(out, "\nPhoto: {}", photo);
    }
    let _ = writeln!(out, "\nid: {}", drink.id);
    out
}

/// One line per field, in field order.
pub fn form_errors(errors: &BTreeMap<FormField, String>) -> String {
    errors
        .iter()
        .map(|(field, message)| format!("{}: {}", field, message))
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn backend(selector: BackendSelector, location: &str) -> String {
    format!("{} ({})\n", selector.name(), location)
}
