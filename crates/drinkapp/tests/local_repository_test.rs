//! End-to-end flows against local storage on disk.

use chrono::{TimeZone, Utc};
use drinkapp::config::BackendSelector;
use drinkapp::error::DrinkError;
use drinkapp::model::Ingredient;
use drinkapp::repository::{LocalRepository, RemoteRepository, Repository, STORAGE_KEY};
use drinkapp::state::{DrinkForm, DrinkList, FormField};
use drinkapp::store::{FsKeyValueStore, MemTables};
use std::collections::HashSet;
use tempfile::TempDir;

fn repository(dir: &TempDir) -> Repository<FsKeyValueStore, MemTables> {
    Repository::from_selector(
        BackendSelector::local(),
        LocalRepository::new(FsKeyValueStore::new(dir.path())),
        RemoteRepository::new(MemTables::new()),
    )
}

fn mojito_form() -> DrinkForm {
    let mut form = DrinkForm::new();
    form.set_name("Mojito");
    form.set_rating(5);
    form.set_date(Utc.with_ymd_and_hms(2025, 1, 10, 20, 0, 0).unwrap());
    form.add_ingredient(Ingredient::new("Rum", 50.0, "ml"));
    form.set_instructions("mix");
    form
}

#[tokio::test]
async fn test_first_run_writes_the_sample_drinks() {
    let dir = tempfile::tempdir().unwrap();
    let list = DrinkList::open(repository(&dir)).await;

    let names: Vec<_> = list.drinks().iter().map(|d| d.name.as_str()).collect();
    assert_eq!(names, vec!["Mojito", "Caipirinha", "Piña Colada"]);

    let stored = FsKeyValueStore::new(dir.path()).path_for(STORAGE_KEY);
    let on_disk: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(stored).unwrap()).unwrap();
    assert_eq!(on_disk.as_array().map(Vec::len), Some(3));
}

#[tokio::test]
async fn test_adding_a_drink_to_seeded_storage() {
    let dir = tempfile::tempdir().unwrap();
    let mut list = DrinkList::open(repository(&dir)).await;

    let mut form = mojito_form();
    assert!(form.validate());
    let id = list.add_new_drink(form.new_drink()).await.unwrap();

    assert_eq!(list.drinks().len(), 4);
    let added = list.get(&id).unwrap();
    assert_eq!(added.name, "Mojito");
    assert_eq!(added.rating, 5);
    assert_eq!(added.ingredients, vec![Ingredient::new("Rum", 50.0, "ml")]);
    assert_eq!(added.instructions, "mix");

    // Survives a fresh process
    let reopened = DrinkList::open(repository(&dir)).await;
    assert_eq!(reopened.get(&id), Some(added));
}

#[tokio::test]
async fn test_editing_only_the_rating() {
    let dir = tempfile::tempdir().unwrap();
    let mut list = DrinkList::open(repository(&dir)).await;
    let mut form = mojito_form();
    form.set_rating(3);
    let id = list.add_new_drink(form.new_drink()).await.unwrap();
    let original = list.get(&id).cloned().unwrap();

    let mut form = DrinkForm::from_drink(&original);
    form.set_rating(5);
    list.update_existing_drink(&form.drink_data(&id)).await.unwrap();

    let updated = list.get(&id).cloned().unwrap();
    assert_eq!(updated.rating, 5);
    assert_eq!(
        drinkapp::model::Drink {
            rating: original.rating,
            ..updated
        },
        original
    );
}

#[tokio::test]
async fn test_removing_a_drink() {
    let dir = tempfile::tempdir().unwrap();
    let mut list = DrinkList::open(repository(&dir)).await;

    list.remove_drink("2").await.unwrap();
    assert_eq!(list.drinks().len(), 2);
    assert!(list.get("2").is_none());
}

#[tokio::test]
async fn test_ids_stay_unique_across_quick_adds() {
    let dir = tempfile::tempdir().unwrap();
    let mut list = DrinkList::open(repository(&dir)).await;

    for _ in 0..5 {
        list.add_new_drink(mojito_form().new_drink()).await.unwrap();
    }

    let ids: HashSet<_> = list.drinks().iter().map(|d| d.id.clone()).collect();
    assert_eq!(list.drinks().len(), 8);
    assert_eq!(ids.len(), 8);
}

#[tokio::test]
async fn test_invalid_form_never_reaches_storage() {
    let dir = tempfile::tempdir().unwrap();
    let mut list = DrinkList::open(repository(&dir)).await;

    let mut form = DrinkForm::new();
    form.set_rating(3);
    assert!(!form.validate());
    assert_eq!(
        form.errors().keys().copied().collect::<Vec<_>>(),
        vec![FormField::Name]
    );

    let err = list.add_new_drink(form.new_drink()).await.unwrap_err();
    assert!(matches!(err, DrinkError::Invalid(_)));
    assert_eq!(list.drinks().len(), 3);
}

#[tokio::test]
async fn test_corrupt_file_is_reported_and_kept() {
    let dir = tempfile::tempdir().unwrap();
    let path = FsKeyValueStore::new(dir.path()).path_for(STORAGE_KEY);
    std::fs::write(&path, "not json at all").unwrap();

    let list = DrinkList::open(repository(&dir)).await;
    assert!(list.drinks().is_empty());
    assert!(list.error().is_some());
    assert_eq!(std::fs::read_to_string(&path).unwrap(), "not json at all");
}

#[tokio::test]
async fn test_bad_ingredient_is_rejected_and_storage_stays_readable() {
    let dir = tempfile::tempdir().unwrap();
    let mut list = DrinkList::open(repository(&dir)).await;

    for bad in [
        Ingredient::new("Rum", f64::NAN, "ml"),
        Ingredient::new("Rum", 0.0, "ml"),
        Ingredient::new("Rum", -5.0, "ml"),
        Ingredient::new("  ", 50.0, "ml"),
    ] {
        let mut form = mojito_form();
        form.add_ingredient(bad);
        let err = list.add_new_drink(form.new_drink()).await.unwrap_err();
        assert!(matches!(err, DrinkError::Invalid(_)));

        let mut edit = DrinkForm::from_drink(list.get("1").unwrap());
        edit.update_ingredient(0, Ingredient::new("Rum", f64::INFINITY, "ml"));
        let err = list
            .update_existing_drink(&edit.drink_data("1"))
            .await
            .unwrap_err();
        assert!(matches!(err, DrinkError::Invalid(_)));
    }

    let reopened = DrinkList::open(repository(&dir)).await;
    assert_eq!(reopened.error(), None);
    assert_eq!(reopened.drinks().len(), 3);
}
