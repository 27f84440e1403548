//! Deck membership operations: idempotent insertion, removal, reordering,
//! and dangling-reference resolution.

use cardvault::models::{Deck, DraftDeck};
use cardvault::CardVaultError;

mod common;

fn deck_with(ids: &[&str]) -> Deck {
    let mut deck = cardvault::import::convert_deck(
        &DraftDeck {
            name: "D".to_string(),
            description: "d".to_string(),
            ..Default::default()
        },
        Vec::new(),
    );
    for id in ids {
        deck.add_card(id);
    }
    deck
}

// ---------------------------------------------------------------------------
// add / remove
// ---------------------------------------------------------------------------

#[test]
fn add_card_is_idempotent() {
    let mut deck = deck_with(&["a"]);
    assert!(!deck.add_card("a"));
    assert_eq!(deck.card_ids, vec!["a"]);
    assert!(deck.add_card("b"));
    assert_eq!(deck.card_ids, vec!["a", "b"]);
}

#[test]
fn add_cards_skips_present_ids_and_keeps_order() {
    let mut deck = deck_with(&["a"]);
    let added = deck.add_cards(["b", "a", "c"]);
    assert_eq!(added, 2);
    assert_eq!(deck.card_ids, vec!["a", "b", "c"]);
}

#[test]
fn remove_card_reports_presence() {
    let mut deck = deck_with(&["a", "b"]);
    assert!(deck.remove_card("a"));
    assert!(!deck.remove_card("a"));
    assert_eq!(deck.card_ids, vec!["b"]);
}

// ---------------------------------------------------------------------------
// move_card
// ---------------------------------------------------------------------------

#[test]
fn move_preserves_membership_and_length_for_all_valid_pairs() {
    let ids = ["a", "b", "c", "d"];
    for from in 0..ids.len() {
        for to in 0..ids.len() {
            let mut deck = deck_with(&ids);
            deck.move_card(from, to).unwrap();
            assert_eq!(deck.card_ids.len(), ids.len(), "move {from}->{to}");
            let mut sorted = deck.card_ids.clone();
            sorted.sort();
            assert_eq!(sorted, vec!["a", "b", "c", "d"], "move {from}->{to}");
        }
    }
}

#[test]
fn move_to_front_and_back() {
    let mut deck = deck_with(&["a", "b", "c"]);
    deck.move_card(2, 0).unwrap();
    assert_eq!(deck.card_ids, vec!["c", "a", "b"]);
    deck.move_card(0, 2).unwrap();
    assert_eq!(deck.card_ids, vec!["a", "b", "c"]);
}

#[test]
fn move_out_of_bounds_is_an_error() {
    let mut deck = deck_with(&["a", "b"]);
    let err = deck.move_card(0, 2).unwrap_err();
    assert!(matches!(err, CardVaultError::InvalidArgument(_)));
    let err = deck.move_card(5, 0).unwrap_err();
    assert!(matches!(err, CardVaultError::InvalidArgument(_)));
    // the failed move changed nothing
    assert_eq!(deck.card_ids, vec!["a", "b"]);
}

// ---------------------------------------------------------------------------
// duplicate
// ---------------------------------------------------------------------------

#[test]
fn duplicate_copies_members_under_a_fresh_private_identity() {
    let mut original = deck_with(&["a", "b"]);
    original.is_public = true;
    original.tags = vec!["shared".to_string()];

    let copy = original.duplicate(None);
    assert_ne!(copy.id, original.id);
    assert_eq!(copy.name, "D (copy)");
    assert_eq!(copy.card_ids, original.card_ids);
    assert_eq!(copy.tags, original.tags);
    // copies are always private, whatever the original was
    assert!(!copy.is_public);

    let named = original.duplicate(Some("Fork"));
    assert_eq!(named.name, "Fork");
}

// ---------------------------------------------------------------------------
// resolve_cards
// ---------------------------------------------------------------------------

#[test]
fn dangling_references_resolve_to_no_card() {
    let cards = vec![
        common::sample_card("c1", "A"),
        common::sample_card("c2", "B"),
    ];
    let deck = deck_with(&["c2", "deleted", "c1"]);
    let resolved = deck.resolve_cards(&cards);
    // deck order kept, dangling id silently dropped
    assert_eq!(resolved.len(), 2);
    assert_eq!(resolved[0].id, "c2");
    assert_eq!(resolved[1].id, "c1");
}
