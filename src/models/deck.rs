use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{CardVaultError, Result};
use crate::models::card::{Card, DraftCard};
use crate::models::generate_id;

// ---------------------------------------------------------------------------
// Deck — a named, ordered collection of card identities
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Deck {
    pub id: String,
    pub name: String,
    pub description: String,
    /// Ordered member identities. Order is display/navigation order, not a
    /// set. May reference cards no longer in the working set; dangling ids
    /// are filtered at read time, never an error.
    #[serde(default)]
    pub card_ids: Vec<String>,
    #[serde(default)]
    pub is_public: bool,
    #[serde(default)]
    pub tags: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Deck {
    /// Append a card identity if not already present. Returns `true` when
    /// the deck changed. Insertion is idempotent.
    pub fn add_card(&mut self, card_id: &str) -> bool {
        if self.card_ids.iter().any(|id| id == card_id) {
            return false;
        }
        self.card_ids.push(card_id.to_string());
        self.updated_at = Utc::now();
        true
    }

    /// Append several identities, skipping ones already present. Input order
    /// is preserved for the ones actually added. Returns how many were added.
    pub fn add_cards<'a, I: IntoIterator<Item = &'a str>>(&mut self, card_ids: I) -> usize {
        let mut added = 0;
        for id in card_ids {
            if self.add_card(id) {
                added += 1;
            }
        }
        added
    }

    /// Remove a card identity. Returns `true` if it was present.
    pub fn remove_card(&mut self, card_id: &str) -> bool {
        let before = self.card_ids.len();
        self.card_ids.retain(|id| id != card_id);
        let removed = self.card_ids.len() != before;
        if removed {
            self.updated_at = Utc::now();
        }
        removed
    }

    pub fn remove_cards<'a, I: IntoIterator<Item = &'a str>>(&mut self, card_ids: I) -> usize {
        let mut removed = 0;
        for id in card_ids {
            if self.remove_card(id) {
                removed += 1;
            }
        }
        removed
    }

    /// Move the identity at `from` to position `to`. A removal followed by
    /// reinsertion, so membership and length are unchanged.
    pub fn move_card(&mut self, from: usize, to: usize) -> Result<()> {
        let len = self.card_ids.len();
        if from >= len || to >= len {
            return Err(CardVaultError::InvalidArgument(format!(
                "move indices {from}..{to} out of bounds for deck of {len} cards"
            )));
        }
        if from != to {
            let id = self.card_ids.remove(from);
            self.card_ids.insert(to, id);
            self.updated_at = Utc::now();
        }
        Ok(())
    }

    /// Copy this deck under a fresh identity. The copy keeps the member
    /// list, description, and tags, but is always private and gets new
    /// timestamps. Without an explicit name the copy is "<name> (copy)".
    pub fn duplicate(&self, new_name: Option<&str>) -> Deck {
        let now = Utc::now();
        Deck {
            id: generate_id(),
            name: new_name
                .map(str::to_string)
                .unwrap_or_else(|| format!("{} (copy)", self.name)),
            description: self.description.clone(),
            card_ids: self.card_ids.clone(),
            is_public: false,
            tags: self.tags.clone(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Resolve member identities against a working set of cards, in deck
    /// order. Dangling references resolve to "no card" and are dropped.
    pub fn resolve_cards<'a>(&self, cards: &'a [Card]) -> Vec<&'a Card> {
        self.card_ids
            .iter()
            .filter_map(|id| cards.iter().find(|c| &c.id == id))
            .collect()
    }
}

// ---------------------------------------------------------------------------
// DraftDeck — imported deck awaiting identity and member resolution
// ---------------------------------------------------------------------------

/// Intermediate deck shape from import validation. Member cards travel as
/// nested drafts; identities are wired up during merge.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DraftDeck {
    pub name: String,
    pub description: String,
    #[serde(default)]
    pub is_public: bool,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub cards: Vec<DraftCard>,
}
