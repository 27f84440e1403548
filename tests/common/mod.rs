//! Shared fixtures for the cardvault integration tests.

use cardvault::{Card, CardCategory, CardVault, MemoryStore, Rarity};
use chrono::Utc;

/// A persisted card with the given identity and title, everything else at
/// plain defaults.
pub fn sample_card(id: &str, title: &str) -> Card {
    let now = Utc::now();
    Card {
        id: id.to_string(),
        title: title.to_string(),
        description: format!("{title} description"),
        category: CardCategory::Custom,
        rarity: Rarity::Common,
        price: None,
        url: None,
        image_url: None,
        tags: Vec::new(),
        created_at: now,
        updated_at: now,
        metadata: Default::default(),
    }
}

/// A vault backed by an in-memory store, offline so no test ever touches
/// the network.
pub fn memory_vault() -> CardVault {
    CardVault::builder()
        .store(Box::new(MemoryStore::new()))
        .offline(true)
        .build()
        .unwrap()
}
