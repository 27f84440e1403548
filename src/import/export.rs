//! Export cards and decks back into the import wire shapes.
//!
//! Exports are pretty-printed JSON that round-trips through
//! [`parse_import`](crate::import::parse_import): title, description,
//! category, rarity, price, url, and tags survive exactly. Persisted-only
//! fields (identity, timestamps, metadata) are intentionally left out so an
//! export re-imports as a fresh draft.

use serde_json::json;

use crate::models::{Card, Deck, DraftCard, DraftDeck};

fn card_to_draft(card: &Card) -> DraftCard {
    DraftCard {
        title: card.title.clone(),
        description: card.description.clone(),
        category: card.category,
        rarity: Some(card.rarity),
        price: card.price,
        url: card.url.clone(),
        image_url: card.image_url.clone(),
        tags: card.tags.clone(),
        metadata: Default::default(),
    }
}

fn deck_to_draft(deck: &Deck, cards: &[Card]) -> DraftDeck {
    DraftDeck {
        name: deck.name.clone(),
        description: deck.description.clone(),
        is_public: deck.is_public,
        tags: deck.tags.clone(),
        // Dangling member ids resolve to no card and are skipped.
        cards: deck.resolve_cards(cards).iter().map(|c| card_to_draft(c)).collect(),
    }
}

/// Single-card export in the import shape.
pub fn export_card(card: &Card) -> String {
    serde_json::to_string_pretty(&card_to_draft(card)).expect("draft card serializes")
}

/// Single-deck export with member cards inlined as drafts.
pub fn export_deck(deck: &Deck, cards: &[Card]) -> String {
    serde_json::to_string_pretty(&deck_to_draft(deck, cards)).expect("draft deck serializes")
}

/// Batch export of a whole collection.
pub fn export_collection(cards: &[Card], decks: &[Deck]) -> String {
    let payload = json!({
        "cards": cards.iter().map(card_to_draft).collect::<Vec<_>>(),
        "decks": decks.iter().map(|d| deck_to_draft(d, cards)).collect::<Vec<_>>(),
    });
    serde_json::to_string_pretty(&payload).expect("collection serializes")
}
