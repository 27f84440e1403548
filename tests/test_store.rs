//! Store contract tests against both implementations. The file store runs
//! inside a tempdir.

use cardvault::store::{JsonFileStore, MemoryStore, Store, Theme, UserSettings};

mod common;

fn exercise_store(store: &mut dyn Store) {
    // cards
    let card = common::sample_card("c1", "First");
    store.upsert_card(card.clone()).unwrap();
    assert_eq!(store.list_cards().unwrap().len(), 1);

    // upsert replaces by identity
    let mut edited = card.clone();
    edited.description = "edited".to_string();
    store.upsert_card(edited).unwrap();
    let cards = store.list_cards().unwrap();
    assert_eq!(cards.len(), 1);
    assert_eq!(cards[0].description, "edited");

    assert!(store.delete_card("c1").unwrap());
    assert!(!store.delete_card("c1").unwrap());
    assert!(store.list_cards().unwrap().is_empty());

    // decks
    let deck = cardvault::import::convert_deck(
        &cardvault::models::DraftDeck {
            name: "D".to_string(),
            description: "d".to_string(),
            ..Default::default()
        },
        vec!["c1".to_string()],
    );
    let deck_id = deck.id.clone();
    store.upsert_deck(deck).unwrap();
    assert_eq!(store.list_decks().unwrap().len(), 1);
    assert!(store.delete_deck(&deck_id).unwrap());
    assert!(store.list_decks().unwrap().is_empty());

    // settings
    assert_eq!(store.settings().unwrap(), UserSettings::default());
    let custom = UserSettings {
        theme: Theme::Dark,
        auto_sync: true,
        ..Default::default()
    };
    store.save_settings(custom.clone()).unwrap();
    assert_eq!(store.settings().unwrap(), custom);

    // replace_all
    store
        .replace_all(
            vec![common::sample_card("c2", "Second")],
            Vec::new(),
        )
        .unwrap();
    assert_eq!(store.list_cards().unwrap().len(), 1);
    assert_eq!(store.list_cards().unwrap()[0].id, "c2");
}

#[test]
fn memory_store_honors_the_contract() {
    let mut store = MemoryStore::new();
    exercise_store(&mut store);
}

#[test]
fn file_store_honors_the_contract() {
    let tmp = tempfile::tempdir().unwrap();
    let mut store = JsonFileStore::open(Some(tmp.path().to_path_buf())).unwrap();
    exercise_store(&mut store);
}

#[test]
fn file_store_persists_across_reopens() {
    let tmp = tempfile::tempdir().unwrap();
    {
        let mut store = JsonFileStore::open(Some(tmp.path().to_path_buf())).unwrap();
        store.upsert_card(common::sample_card("c1", "Durable")).unwrap();
    }
    let store = JsonFileStore::open(Some(tmp.path().to_path_buf())).unwrap();
    let cards = store.list_cards().unwrap();
    assert_eq!(cards.len(), 1);
    assert_eq!(cards[0].title, "Durable");
}

#[test]
fn corrupt_file_reads_as_empty_collection() {
    let tmp = tempfile::tempdir().unwrap();
    std::fs::write(tmp.path().join("cards.json"), "{definitely no[t json").unwrap();
    let store = JsonFileStore::open(Some(tmp.path().to_path_buf())).unwrap();
    assert!(store.list_cards().unwrap().is_empty());
}

#[test]
fn missing_files_read_as_defaults() {
    let tmp = tempfile::tempdir().unwrap();
    let store = JsonFileStore::open(Some(tmp.path().to_path_buf())).unwrap();
    assert!(store.list_cards().unwrap().is_empty());
    assert!(store.list_decks().unwrap().is_empty());
    assert_eq!(store.settings().unwrap(), UserSettings::default());
}
