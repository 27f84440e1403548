//! In-memory collection queries: filtering, sorting, statistics, and tag
//! aggregation over a card set.

use std::collections::HashMap;

use chrono::{DateTime, Duration, Utc};

use crate::models::{Card, CardCategory, PriceTier, Rarity};
use crate::scoring::price_tier;

// ---------------------------------------------------------------------------
// Filtering
// ---------------------------------------------------------------------------

/// Conjunctive search filters. Empty lists and `None` fields match anything.
#[derive(Debug, Clone, Default)]
pub struct SearchFilters {
    pub categories: Vec<CardCategory>,
    pub rarities: Vec<Rarity>,
    /// Case-insensitive substring match against the card's tags.
    pub tags: Vec<String>,
    /// Case-insensitive substring match over title, description, and tags.
    pub query: Option<String>,
    pub date_range: Option<(DateTime<Utc>, DateTime<Utc>)>,
}

pub fn filter_cards<'a>(cards: &'a [Card], filters: &SearchFilters) -> Vec<&'a Card> {
    cards
        .iter()
        .filter(|card| {
            if !filters.categories.is_empty() && !filters.categories.contains(&card.category) {
                return false;
            }
            if !filters.rarities.is_empty() && !filters.rarities.contains(&card.rarity) {
                return false;
            }
            if !filters.tags.is_empty() {
                let any = filters.tags.iter().any(|want| {
                    let want = want.to_lowercase();
                    card.tags.iter().any(|t| t.to_lowercase().contains(&want))
                });
                if !any {
                    return false;
                }
            }
            if let Some(query) = filters.query.as_deref() {
                let query = query.trim().to_lowercase();
                if !query.is_empty() {
                    let haystack = format!(
                        "{} {} {}",
                        card.title,
                        card.description,
                        card.tags.join(" ")
                    )
                    .to_lowercase();
                    if !haystack.contains(&query) {
                        return false;
                    }
                }
            }
            if let Some((start, end)) = filters.date_range {
                if card.created_at < start || card.created_at > end {
                    return false;
                }
            }
            true
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Sorting
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKey {
    Date,
    Title,
    Rarity,
    Category,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Ascending,
    Descending,
}

pub fn sort_cards(cards: &mut [Card], key: SortKey, order: SortOrder) {
    cards.sort_by(|a, b| {
        let cmp = match key {
            SortKey::Date => a.created_at.cmp(&b.created_at),
            SortKey::Title => a.title.cmp(&b.title),
            SortKey::Rarity => a.rarity.cmp(&b.rarity),
            SortKey::Category => a.category.as_str().cmp(b.category.as_str()),
        };
        match order {
            SortOrder::Ascending => cmp,
            SortOrder::Descending => cmp.reverse(),
        }
    });
}

// ---------------------------------------------------------------------------
// Statistics
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default)]
pub struct CollectionStats {
    pub total: usize,
    pub by_category: HashMap<CardCategory, usize>,
    pub by_rarity: HashMap<Rarity, usize>,
    /// Cards created within the last seven days.
    pub recent: usize,
}

pub fn collection_stats(cards: &[Card]) -> CollectionStats {
    let mut stats = CollectionStats {
        total: cards.len(),
        ..Default::default()
    };
    for category in CardCategory::ALL {
        stats.by_category.insert(category, 0);
    }
    for rarity in Rarity::ALL {
        stats.by_rarity.insert(rarity, 0);
    }

    let week_ago = Utc::now() - Duration::days(7);
    for card in cards {
        *stats.by_category.entry(card.category).or_insert(0) += 1;
        *stats.by_rarity.entry(card.rarity).or_insert(0) += 1;
        if card.created_at > week_ago {
            stats.recent += 1;
        }
    }
    stats
}

/// The most-used tags, normalized to lowercase, most frequent first.
pub fn popular_tags(cards: &[Card], limit: usize) -> Vec<(String, usize)> {
    let mut counts: HashMap<String, usize> = HashMap::new();
    for card in cards {
        for tag in &card.tags {
            *counts.entry(tag.trim().to_lowercase()).or_insert(0) += 1;
        }
    }
    let mut tags: Vec<(String, usize)> = counts.into_iter().collect();
    tags.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    tags.truncate(limit);
    tags
}

/// Per-deck statistics over the deck's resolved member cards.
#[derive(Debug, Clone, Default)]
pub struct DeckStats {
    pub card_count: usize,
    pub by_category: HashMap<CardCategory, usize>,
    pub by_rarity: HashMap<Rarity, usize>,
}

/// Statistics for one deck's resolved members. Dangling references are not
/// counted; pass the output of [`Deck::resolve_cards`](crate::models::Deck).
pub fn deck_stats(cards: &[&Card]) -> DeckStats {
    let mut stats = DeckStats {
        card_count: cards.len(),
        ..Default::default()
    };
    for category in CardCategory::ALL {
        stats.by_category.insert(category, 0);
    }
    for rarity in Rarity::ALL {
        stats.by_rarity.insert(rarity, 0);
    }
    for card in cards {
        *stats.by_category.entry(card.category).or_insert(0) += 1;
        *stats.by_rarity.entry(card.rarity).or_insert(0) += 1;
    }
    stats
}

/// Total monetary value of a set of cards; unpriced cards count as zero.
pub fn deck_value(cards: &[&Card]) -> f64 {
    cards.iter().map(|c| c.price.unwrap_or(0.0)).sum()
}

/// The price tier of a deck, based on its total value.
pub fn deck_price_tier(cards: &[&Card]) -> PriceTier {
    price_tier(Some(deck_value(cards)))
}
