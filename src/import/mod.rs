//! Import normalization: untrusted JSON text in, validated drafts out.
//!
//! The accepted payload shapes are sniffed once at the JSON boundary by
//! [`classify_payload`] (single card, single deck, or batch), and each batch
//! entry is classified once as a full persisted record or a draft by
//! [`deck_record_shape`]/[`card_record_shape`]. Malformed JSON is the only
//! hard error; a well-formed payload matching nothing yields an empty
//! [`ImportData`], and individual invalid entries are silently dropped.

pub mod export;
pub mod merge;

pub use export::{export_card, export_collection, export_deck};
pub use merge::{merge_import, MergeOutcome, MergeSummary};

use chrono::Utc;
use log::debug;
use serde_json::Value;

use crate::error::Result;
use crate::models::{generate_id, normalize_tags, Card, CardCategory, Deck, DraftCard, DraftDeck};
use crate::scoring::rarity_from_price;

// ---------------------------------------------------------------------------
// ImportData
// ---------------------------------------------------------------------------

/// Validated drafts extracted from one import payload.
#[derive(Debug, Clone, Default)]
pub struct ImportData {
    pub cards: Vec<DraftCard>,
    pub decks: Vec<DraftDeck>,
}

impl ImportData {
    /// True when the payload held nothing importable. Callers render
    /// "nothing to import" for this, not an error.
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty() && self.decks.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Shape discriminators
// ---------------------------------------------------------------------------

/// Top-level payload shape, decided exactly once per import.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImportShape {
    SingleCard,
    SingleDeck,
    Batch,
    Unrecognized,
}

/// Whether a batch entry is a full persisted record or an already-draft-shaped
/// one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordShape {
    Full,
    Draft,
}

fn non_empty_str(value: &Value, key: &str) -> bool {
    value
        .get(key)
        .and_then(Value::as_str)
        .map(|s| !s.trim().is_empty())
        .unwrap_or(false)
}

/// Sniff the payload shape. Priority order: single card, single deck, batch.
pub fn classify_payload(value: &Value) -> ImportShape {
    let has_cards = value.get("cards").is_some();
    let has_decks = value.get("decks").is_some();

    if non_empty_str(value, "title") && non_empty_str(value, "description") && !has_cards && !has_decks
    {
        return ImportShape::SingleCard;
    }
    // A deck carries its members in a nested `cards` array, so that key does
    // not disqualify the single-deck shape; only a `decks` key does.
    if non_empty_str(value, "name")
        && non_empty_str(value, "description")
        && !non_empty_str(value, "title")
        && !has_decks
    {
        return ImportShape::SingleDeck;
    }
    if value.get("cards").map(Value::is_array).unwrap_or(false)
        || value.get("decks").map(Value::is_array).unwrap_or(false)
    {
        return ImportShape::Batch;
    }
    ImportShape::Unrecognized
}

/// A card entry is "full" when it carries an identity and a creation
/// timestamp; otherwise it is draft-shaped. Full records project onto the
/// draft shape through the same field validation (the extra persisted keys
/// are simply ignored).
pub fn card_record_shape(value: &Value) -> RecordShape {
    if value.get("id").is_some() && value.get("createdAt").is_some() {
        RecordShape::Full
    } else {
        RecordShape::Draft
    }
}

/// A deck entry is "full" when it carries an identity and a member-identity
/// list. Full decks resolve their members against the top-level cards array.
pub fn deck_record_shape(value: &Value) -> RecordShape {
    if value.get("id").is_some() && value.get("cardIds").is_some() {
        RecordShape::Full
    } else {
        RecordShape::Draft
    }
}

// ---------------------------------------------------------------------------
// parse_import
// ---------------------------------------------------------------------------

/// Parse untrusted JSON text into validated drafts.
///
/// Malformed JSON is a hard error surfaced with the parser's message.
/// Anything else degrades: unrecognized shapes yield an empty result and
/// invalid entries are dropped from their batch.
pub fn parse_import(text: &str) -> Result<ImportData> {
    let value: Value = serde_json::from_str(text)?;

    let shape = classify_payload(&value);
    debug!("import payload classified as {shape:?}");

    let data = match shape {
        ImportShape::SingleCard => ImportData {
            cards: validate_card(&value).into_iter().collect(),
            decks: Vec::new(),
        },
        ImportShape::SingleDeck => ImportData {
            cards: Vec::new(),
            decks: validate_deck(&value).into_iter().collect(),
        },
        ImportShape::Batch => parse_batch(&value),
        ImportShape::Unrecognized => ImportData::default(),
    };
    Ok(data)
}

fn parse_batch(value: &Value) -> ImportData {
    let empty = Vec::new();
    let raw_cards = value
        .get("cards")
        .and_then(Value::as_array)
        .unwrap_or(&empty);

    let cards: Vec<DraftCard> = raw_cards
        .iter()
        .filter_map(|entry| match card_record_shape(entry) {
            RecordShape::Full => full_card_to_draft(entry),
            RecordShape::Draft => validate_card(entry),
        })
        .collect();

    let decks: Vec<DraftDeck> = value
        .get("decks")
        .and_then(Value::as_array)
        .unwrap_or(&empty)
        .iter()
        .filter_map(|entry| match deck_record_shape(entry) {
            RecordShape::Full => full_deck_to_draft(entry, raw_cards),
            RecordShape::Draft => validate_deck(entry),
        })
        .collect();

    ImportData { cards, decks }
}

/// Project a full persisted card back onto the draft shape. The persisted
/// keys (identity, timestamps) are a superset of the draft fields, so the
/// projection is the same field validation a draft entry gets; conversion
/// assigns a fresh identity later.
fn full_card_to_draft(entry: &Value) -> Option<DraftCard> {
    validate_card(entry)
}

/// Project a full persisted deck back onto the draft shape. Member cards are
/// resolved by identity inside the top-level cards array (not inside the deck
/// object) and converted to drafts; dangling identities are skipped.
fn full_deck_to_draft(entry: &Value, raw_cards: &[Value]) -> Option<DraftDeck> {
    let name = entry.get("name")?.as_str()?.trim();
    let description = entry.get("description")?.as_str()?.trim();
    if name.is_empty() || description.is_empty() {
        return None;
    }

    let cards = entry
        .get("cardIds")
        .and_then(Value::as_array)
        .map(|ids| {
            ids.iter()
                .filter_map(Value::as_str)
                .filter_map(|id| {
                    raw_cards
                        .iter()
                        .find(|c| c.get("id").and_then(Value::as_str) == Some(id))
                })
                .filter_map(validate_card)
                .collect()
        })
        .unwrap_or_default();

    Some(DraftDeck {
        name: name.to_string(),
        description: description.to_string(),
        is_public: entry.get("isPublic").and_then(Value::as_bool).unwrap_or(false),
        tags: validate_tags(entry.get("tags")),
        cards,
    })
}

// ---------------------------------------------------------------------------
// Field validation
// ---------------------------------------------------------------------------

/// Validate one candidate card. Returns `None` (the entry is dropped from
/// its batch) when title or description is missing or blank; every other
/// malformed field is coerced or dropped individually.
pub fn validate_card(value: &Value) -> Option<DraftCard> {
    let obj = value.as_object()?;

    let title = obj.get("title")?.as_str()?.trim();
    let description = obj.get("description")?.as_str()?.trim();
    if title.is_empty() || description.is_empty() {
        return None;
    }

    let category = obj
        .get("type")
        .and_then(Value::as_str)
        .and_then(CardCategory::parse)
        .unwrap_or(CardCategory::Custom);

    let rarity = obj
        .get("rarity")
        .and_then(Value::as_str)
        .and_then(crate::models::Rarity::parse);

    let price = obj
        .get("price")
        .and_then(Value::as_f64)
        .filter(|p| p.is_finite() && *p >= 0.0);

    Some(DraftCard {
        title: title.to_string(),
        description: description.to_string(),
        category,
        rarity,
        price,
        url: trimmed_str(obj.get("url")),
        image_url: trimmed_str(obj.get("imageUrl")),
        tags: validate_tags(obj.get("tags")),
        metadata: Default::default(),
    })
}

/// Validate one candidate deck, including its nested draft cards.
pub fn validate_deck(value: &Value) -> Option<DraftDeck> {
    let obj = value.as_object()?;

    let name = obj.get("name")?.as_str()?.trim();
    let description = obj.get("description")?.as_str()?.trim();
    if name.is_empty() || description.is_empty() {
        return None;
    }

    let cards = obj
        .get("cards")
        .and_then(Value::as_array)
        .map(|arr| arr.iter().filter_map(validate_card).collect())
        .unwrap_or_default();

    Some(DraftDeck {
        name: name.to_string(),
        description: description.to_string(),
        is_public: obj.get("isPublic").and_then(Value::as_bool).unwrap_or(false),
        tags: validate_tags(obj.get("tags")),
        cards,
    })
}

fn trimmed_str(value: Option<&Value>) -> Option<String> {
    value
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
}

/// Tags must be an array of strings; non-string entries are dropped, the
/// rest trimmed and deduplicated.
fn validate_tags(value: Option<&Value>) -> Vec<String> {
    value
        .and_then(Value::as_array)
        .map(|arr| normalize_tags(arr.iter().filter_map(Value::as_str)))
        .unwrap_or_default()
}

// ---------------------------------------------------------------------------
// Draft → entity conversion
// ---------------------------------------------------------------------------

/// Promote a draft to a full card: fresh identity, current timestamps, and
/// rarity derived from price when not explicit.
pub fn convert_card(draft: DraftCard) -> Card {
    let now = Utc::now();
    let rarity = draft.rarity.unwrap_or_else(|| rarity_from_price(draft.price));
    Card {
        id: generate_id(),
        title: draft.title,
        description: draft.description,
        category: draft.category,
        rarity,
        price: draft.price,
        url: draft.url,
        image_url: draft.image_url,
        tags: normalize_tags(draft.tags),
        created_at: now,
        updated_at: now,
        metadata: draft.metadata,
    }
}

/// Promote a draft deck, wiring in the already-resolved member identities.
pub fn convert_deck(draft: &DraftDeck, card_ids: Vec<String>) -> Deck {
    let now = Utc::now();
    Deck {
        id: generate_id(),
        name: draft.name.clone(),
        description: draft.description.clone(),
        card_ids,
        is_public: draft.is_public,
        tags: normalize_tags(&draft.tags),
        created_at: now,
        updated_at: now,
    }
}
