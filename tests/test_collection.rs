//! Collection utility tests: filtering, sorting, tag aggregation, and deck
//! valuation.

use cardvault::collection::{
    deck_price_tier, deck_stats, deck_value, filter_cards, popular_tags, sort_cards,
    SearchFilters, SortKey, SortOrder,
};
use cardvault::models::{Card, CardCategory, PriceTier, Rarity};

mod common;

fn sample_set() -> Vec<Card> {
    let mut a = common::sample_card("c1", "Rust CLI");
    a.category = CardCategory::GithubRepo;
    a.rarity = Rarity::Epic;
    a.tags = vec!["Rust".to_string(), "cli".to_string()];
    a.price = Some(120.0);

    let mut b = common::sample_card("c2", "Prompt pack");
    b.category = CardCategory::PromptShare;
    b.tags = vec!["AI".to_string(), "rust".to_string()];

    let mut c = common::sample_card("c3", "Design tool");
    c.category = CardCategory::ToolWebsite;
    c.rarity = Rarity::Rare;
    c.price = Some(30.0);

    vec![a, b, c]
}

// ---------------------------------------------------------------------------
// filter_cards
// ---------------------------------------------------------------------------

#[test]
fn empty_filters_match_everything() {
    let cards = sample_set();
    assert_eq!(filter_cards(&cards, &SearchFilters::default()).len(), 3);
}

#[test]
fn category_and_rarity_filters_are_conjunctive() {
    let cards = sample_set();
    let hits = filter_cards(
        &cards,
        &SearchFilters {
            categories: vec![CardCategory::GithubRepo, CardCategory::ToolWebsite],
            rarities: vec![Rarity::Rare],
            ..Default::default()
        },
    );
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].id, "c3");
}

#[test]
fn tag_filter_is_case_insensitive_substring() {
    let cards = sample_set();
    let hits = filter_cards(
        &cards,
        &SearchFilters {
            tags: vec!["RUST".to_string()],
            ..Default::default()
        },
    );
    assert_eq!(hits.len(), 2);
}

#[test]
fn query_searches_title_description_and_tags() {
    let cards = sample_set();
    let hits = filter_cards(
        &cards,
        &SearchFilters {
            query: Some("prompt".to_string()),
            ..Default::default()
        },
    );
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].id, "c2");

    // blank query matches everything
    let hits = filter_cards(
        &cards,
        &SearchFilters {
            query: Some("   ".to_string()),
            ..Default::default()
        },
    );
    assert_eq!(hits.len(), 3);
}

// ---------------------------------------------------------------------------
// sort_cards
// ---------------------------------------------------------------------------

#[test]
fn sort_by_rarity_descending_puts_epic_first() {
    let mut cards = sample_set();
    sort_cards(&mut cards, SortKey::Rarity, SortOrder::Descending);
    assert_eq!(cards[0].rarity, Rarity::Epic);
    assert_eq!(cards[2].rarity, Rarity::Common);
}

#[test]
fn sort_by_title_ascending() {
    let mut cards = sample_set();
    sort_cards(&mut cards, SortKey::Title, SortOrder::Ascending);
    let titles: Vec<&str> = cards.iter().map(|c| c.title.as_str()).collect();
    assert_eq!(titles, vec!["Design tool", "Prompt pack", "Rust CLI"]);
}

// ---------------------------------------------------------------------------
// popular_tags / deck valuation
// ---------------------------------------------------------------------------

#[test]
fn popular_tags_normalize_case_and_rank_by_count() {
    let cards = sample_set();
    let tags = popular_tags(&cards, 2);
    assert_eq!(tags[0], ("rust".to_string(), 2));
    assert_eq!(tags.len(), 2);
}

#[test]
fn deck_value_treats_unpriced_as_zero() {
    let cards = sample_set();
    let refs: Vec<&Card> = cards.iter().collect();
    assert_eq!(deck_value(&refs), 150.0);
    assert_eq!(deck_price_tier(&refs), PriceTier::Standard);
}

#[test]
fn empty_deck_is_free() {
    assert_eq!(deck_price_tier(&[]), PriceTier::Free);
}

#[test]
fn deck_stats_distribute_by_category_and_rarity() {
    let cards = sample_set();
    let refs: Vec<&Card> = cards.iter().collect();
    let stats = deck_stats(&refs);
    assert_eq!(stats.card_count, 3);
    assert_eq!(stats.by_category[&CardCategory::GithubRepo], 1);
    assert_eq!(stats.by_category[&CardCategory::Custom], 0);
    assert_eq!(stats.by_rarity[&Rarity::Epic], 1);
    assert_eq!(stats.by_rarity[&Rarity::Common], 1);
}
