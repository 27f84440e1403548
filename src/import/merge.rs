//! Deduplicating union of imported drafts with an existing collection.
//!
//! Merge identity is content-based, not identity-field-based: imported cards
//! never carry a meaningful pre-existing id, so a card is "the same" as an
//! existing one when the titles match case-insensitively, and a deck when
//! the names do. First occurrence wins; collisions are skipped, never
//! overwritten. The whole operation is a pure function of its three inputs.

use crate::import::{convert_card, convert_deck, ImportData};
use crate::models::{Card, Deck};

/// Counts of entities actually appended, post-dedup. Items presented for
/// import but suppressed by a collision are not counted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MergeSummary {
    pub cards_added: usize,
    pub decks_added: usize,
}

/// The merged collection plus the change summary. Callers persist `cards`
/// and `decks` themselves; the inputs are never mutated.
#[derive(Debug, Clone)]
pub struct MergeOutcome {
    pub cards: Vec<Card>,
    pub decks: Vec<Deck>,
    pub summary: MergeSummary,
}

/// Merge an import payload into an existing collection.
///
/// Processing order: all top-level cards in input order, then all decks in
/// input order, each deck's nested cards before the deck itself. A nested
/// card that collides with an existing title reuses the existing card's
/// identity for the deck's member list, so a deck can legitimately reference
/// cards it did not introduce.
pub fn merge_import(
    data: &ImportData,
    existing_cards: &[Card],
    existing_decks: &[Deck],
) -> MergeOutcome {
    let mut cards = existing_cards.to_vec();
    let mut decks = existing_decks.to_vec();
    let mut summary = MergeSummary::default();

    for draft in &data.cards {
        if find_by_title(&cards, &draft.title).is_none() {
            cards.push(convert_card(draft.clone()));
            summary.cards_added += 1;
        }
    }

    for draft_deck in &data.decks {
        let mut member_ids = Vec::with_capacity(draft_deck.cards.len());
        for draft in &draft_deck.cards {
            let id = match find_by_title(&cards, &draft.title) {
                Some(existing) => existing.id.clone(),
                None => {
                    let card = convert_card(draft.clone());
                    let id = card.id.clone();
                    cards.push(card);
                    summary.cards_added += 1;
                    id
                }
            };
            // Idempotent membership: a duplicated nested title wires up once.
            if !member_ids.contains(&id) {
                member_ids.push(id);
            }
        }

        let name = draft_deck.name.to_lowercase();
        let name_taken = decks.iter().any(|d| d.name.to_lowercase() == name);
        if !name_taken {
            decks.push(convert_deck(draft_deck, member_ids));
            summary.decks_added += 1;
        }
    }

    MergeOutcome {
        cards,
        decks,
        summary,
    }
}

fn find_by_title<'a>(cards: &'a [Card], title: &str) -> Option<&'a Card> {
    let title = title.to_lowercase();
    cards.iter().find(|c| c.title.to_lowercase() == title)
}
