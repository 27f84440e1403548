//! Pure scoring functions: price → tier, tier → rarity, and the heuristic
//! content-based rarity estimate used by the quick-add flow.
//!
//! No side effects and no error conditions; an invalid (negative or NaN)
//! price reads as absent, i.e. free.

use crate::models::{CardCategory, DraftCard, PriceTier, Rarity};

/// Map a monetary price to its tier. Bands are inclusive on their upper end:
/// `(0, 50]` budget, `(50, 200]` standard, `(200, 500]` premium, above that
/// enterprise. Absent, zero, negative, or NaN prices are free.
pub fn price_tier(price: Option<f64>) -> PriceTier {
    let p = match price {
        Some(p) if p.is_finite() && p > 0.0 => p,
        _ => return PriceTier::Free,
    };
    if p <= 50.0 {
        PriceTier::Budget
    } else if p <= 200.0 {
        PriceTier::Standard
    } else if p <= 500.0 {
        PriceTier::Premium
    } else {
        PriceTier::Enterprise
    }
}

/// The canonical price-to-rarity mapping, used whenever an explicit rarity
/// is not supplied.
pub fn tier_to_rarity(tier: PriceTier) -> Rarity {
    match tier {
        PriceTier::Free | PriceTier::Budget => Rarity::Common,
        PriceTier::Standard => Rarity::Rare,
        PriceTier::Premium => Rarity::Epic,
        PriceTier::Enterprise => Rarity::Legendary,
    }
}

/// Shorthand for `tier_to_rarity(price_tier(price))`.
pub fn rarity_from_price(price: Option<f64>) -> Rarity {
    tier_to_rarity(price_tier(price))
}

/// Heuristic rarity from draft content: an additive point score rewarding
/// richer entries. Purely cosmetic; used only when no explicit or
/// price-derived rarity applies (manual quick-add).
///
/// Points: repository stars (>10000: 30, >1000: 20, >100: 10), 2 per tag
/// capped at 10, description length (>200 chars: 10, >100: 5), image
/// present: 5. Thresholds: ≥40 legendary, ≥25 epic, ≥15 rare.
pub fn content_rarity(draft: &DraftCard) -> Rarity {
    let mut score = 0u32;

    if draft.category == CardCategory::GithubRepo {
        let stars = draft.stars();
        if stars > 10_000 {
            score += 30;
        } else if stars > 1_000 {
            score += 20;
        } else if stars > 100 {
            score += 10;
        }
    }

    score += (draft.tags.len() as u32 * 2).min(10);

    let desc_len = draft.description.chars().count();
    if desc_len > 200 {
        score += 10;
    } else if desc_len > 100 {
        score += 5;
    }

    if draft.image_url.is_some() {
        score += 5;
    }

    if score >= 40 {
        Rarity::Legendary
    } else if score >= 25 {
        Rarity::Epic
    } else if score >= 15 {
        Rarity::Rare
    } else {
        Rarity::Common
    }
}
