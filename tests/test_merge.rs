//! Merge engine tests: identity-by-title dedup, processing order, summary
//! counts, and idempotence.

use cardvault::import::{merge_import, parse_import};
use cardvault::models::Rarity;

mod common;

// ---------------------------------------------------------------------------
// Scenarios from the import contract
// ---------------------------------------------------------------------------

#[test]
fn single_card_into_empty_collection() {
    let data = parse_import(r#"{"title":"X","description":"Y"}"#).unwrap();
    let outcome = merge_import(&data, &[], &[]);

    assert_eq!(outcome.cards.len(), 1);
    assert_eq!(outcome.cards[0].title, "X");
    // price absent → free → common
    assert_eq!(outcome.cards[0].rarity, Rarity::Common);
    assert!(outcome.decks.is_empty());
    assert_eq!(outcome.summary.cards_added, 1);
    assert_eq!(outcome.summary.decks_added, 0);
}

#[test]
fn importing_the_same_payload_twice_adds_nothing() {
    let data = parse_import(r#"{"cards":[{"title":"X","description":"Y"}]}"#).unwrap();
    let first = merge_import(&data, &[], &[]);
    assert_eq!(first.summary.cards_added, 1);

    let second = merge_import(&data, &first.cards, &first.decks);
    assert_eq!(second.summary.cards_added, 0);
    assert_eq!(second.summary.decks_added, 0);
    assert_eq!(second.cards.len(), first.cards.len());
}

#[test]
fn deck_payload_imported_twice_is_idempotent() {
    let text = r#"{"name":"D","description":"d","cards":[{"title":"X","description":"Y"}]}"#;
    let data = parse_import(text).unwrap();
    let first = merge_import(&data, &[], &[]);
    // the deck itself lands, along with its nested card
    assert_eq!(first.summary.cards_added, 1);
    assert_eq!(first.summary.decks_added, 1);
    assert_eq!(first.decks[0].name, "D");
    assert_eq!(first.decks[0].card_ids.len(), 1);

    let second = merge_import(&data, &first.cards, &first.decks);
    assert_eq!(second.summary.cards_added, 0);
    assert_eq!(second.summary.decks_added, 0);
    assert_eq!(second.decks.len(), 1);
}

// ---------------------------------------------------------------------------
// Card dedup
// ---------------------------------------------------------------------------

#[test]
fn title_collisions_are_case_insensitive() {
    let existing = vec![common::sample_card("c1", "My Tool")];
    let data = parse_import(r#"{"cards":[{"title":"MY TOOL","description":"dup"}]}"#).unwrap();
    let outcome = merge_import(&data, &existing, &[]);
    assert_eq!(outcome.summary.cards_added, 0);
    assert_eq!(outcome.cards.len(), 1);
    // the pre-existing card is untouched
    assert_eq!(outcome.cards[0].description, "My Tool description");
}

#[test]
fn duplicate_titles_within_one_payload_collapse() {
    let data = parse_import(
        r#"{"cards":[
            {"title":"Same","description":"first"},
            {"title":"same","description":"second"}
        ]}"#,
    )
    .unwrap();
    let outcome = merge_import(&data, &[], &[]);
    assert_eq!(outcome.summary.cards_added, 1);
    assert_eq!(outcome.cards[0].description, "first");
}

// ---------------------------------------------------------------------------
// Deck merge and nested card wiring
// ---------------------------------------------------------------------------

#[test]
fn nested_cards_reuse_existing_identities() {
    let existing = vec![common::sample_card("c1", "Shared")];
    let payload = r#"{"decks":[{
        "name":"D","description":"d",
        "cards":[
            {"title":"Shared","description":"dup"},
            {"title":"Fresh","description":"new"}
        ]
    }]}"#;
    let data = parse_import(payload).unwrap();
    let outcome = merge_import(&data, &existing, &[]);

    assert_eq!(outcome.summary.cards_added, 1);
    assert_eq!(outcome.summary.decks_added, 1);

    let deck = &outcome.decks[0];
    assert_eq!(deck.card_ids.len(), 2);
    // first member is the pre-existing card's id, not a fresh one
    assert_eq!(deck.card_ids[0], "c1");
    let fresh = outcome.cards.iter().find(|c| c.title == "Fresh").unwrap();
    assert_eq!(deck.card_ids[1], fresh.id);
}

#[test]
fn deck_name_collision_skips_the_deck_but_not_its_cards() {
    let data = parse_import(
        r#"{"decks":[{"name":"D","description":"d","cards":[{"title":"X","description":"x"}]}]}"#,
    )
    .unwrap();
    let first = merge_import(&data, &[], &[]);

    let again = parse_import(
        r#"{"decks":[{"name":"d","description":"other","cards":[{"title":"Y","description":"y"}]}]}"#,
    )
    .unwrap();
    let second = merge_import(&again, &first.cards, &first.decks);

    // nested card Y is new and lands, but the colliding deck does not
    assert_eq!(second.summary.cards_added, 1);
    assert_eq!(second.summary.decks_added, 0);
    assert_eq!(second.decks.len(), 1);
}

#[test]
fn summary_counts_post_dedup_additions_only() {
    let existing = vec![common::sample_card("c1", "A")];
    let data = parse_import(
        r#"{"cards":[
            {"title":"A","description":"dup"},
            {"title":"B","description":"new"},
            {"title":"C","description":"new"}
        ]}"#,
    )
    .unwrap();
    let outcome = merge_import(&data, &existing, &[]);
    assert_eq!(outcome.summary.cards_added, 2);
    assert_eq!(outcome.cards.len(), 3);
}

#[test]
fn inputs_are_never_mutated() {
    let existing_cards = vec![common::sample_card("c1", "A")];
    let existing_decks = Vec::new();
    let data = parse_import(r#"{"cards":[{"title":"B","description":"b"}]}"#).unwrap();

    let before = existing_cards.clone();
    let _ = merge_import(&data, &existing_cards, &existing_decks);
    assert_eq!(existing_cards.len(), before.len());
    assert_eq!(existing_cards[0].id, before[0].id);
    assert!(existing_decks.is_empty());
}

#[test]
fn top_level_cards_merge_before_decks() {
    // the deck's nested card collides with a top-level card from the same
    // payload, so the deck wires up to the top-level card's identity
    let payload = r#"{
        "cards":[{"title":"Both","description":"top-level"}],
        "decks":[{"name":"D","description":"d","cards":[{"title":"Both","description":"nested"}]}]
    }"#;
    let data = parse_import(payload).unwrap();
    let outcome = merge_import(&data, &[], &[]);

    assert_eq!(outcome.summary.cards_added, 1);
    let card = &outcome.cards[0];
    assert_eq!(card.description, "top-level");
    assert_eq!(outcome.decks[0].card_ids, vec![card.id.clone()]);
}
