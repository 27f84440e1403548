//! cardvault: a link-card collection engine.
//!
//! Turns arbitrary URLs and externally-authored JSON payloads into a
//! normalized, deduplicated, scored collection of cards and decks. URL
//! classification picks one of a closed set of parsing strategies, scoring
//! maps prices to collectible rarity tiers, and the import pipeline sniffs
//! payload shapes and merges by content identity without ever overwriting
//! existing entries.
//!
//! # Quick start
//!
//! ```no_run
//! use cardvault::CardVault;
//!
//! let mut vault = CardVault::builder().build().unwrap();
//!
//! // Save a link as a card
//! let card = vault.add_card_from_link("https://github.com/rust-lang/rust").unwrap();
//!
//! // Import a shared collection
//! let summary = vault.import_json(r#"{"title":"X","description":"Y"}"#).unwrap();
//! assert_eq!(summary.cards_added, 1);
//! ```

pub mod collection;
pub mod config;
pub mod error;
pub mod github;
pub mod import;
pub mod linkparse;
pub mod models;
pub mod polish;
pub mod scoring;
pub mod store;

pub use error::{CardVaultError, Result};
pub use github::GithubClient;
pub use import::{MergeOutcome, MergeSummary};
pub use linkparse::{LinkParser, Strategy};
pub use models::{Card, CardCategory, Deck, DraftCard, DraftDeck, PriceTier, Rarity};
pub use polish::{PolishClient, PolishRequest, PolishResponse};
pub use store::{JsonFileStore, MemoryStore, Store, UserSettings};

use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::collection::{CollectionStats, DeckStats, SearchFilters};
use crate::models::normalize_tags;

// ---------------------------------------------------------------------------
// CardVaultBuilder
// ---------------------------------------------------------------------------

/// Builder for configuring and constructing a [`CardVault`] instance.
pub struct CardVaultBuilder {
    store: Option<Box<dyn Store>>,
    data_dir: Option<PathBuf>,
    offline: bool,
    timeout: Duration,
    polish_api_key: Option<String>,
}

impl Default for CardVaultBuilder {
    fn default() -> Self {
        Self {
            store: None,
            data_dir: None,
            offline: false,
            timeout: Duration::from_secs(30),
            polish_api_key: None,
        }
    }
}

impl CardVaultBuilder {
    /// Use an explicit store handle instead of the default file store.
    pub fn store(mut self, store: Box<dyn Store>) -> Self {
        self.store = Some(store);
        self
    }

    /// Set the data directory for the default file store.
    pub fn data_dir<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.data_dir = Some(path.as_ref().to_path_buf());
        self
    }

    /// When offline, the repository strategy skips its metadata lookup and
    /// always produces URL-derived drafts. Defaults to `false`.
    pub fn offline(mut self, offline: bool) -> Self {
        self.offline = offline;
        self
    }

    /// HTTP timeout for external lookups. Defaults to 30 seconds.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Enable the polish (text-rewrite) client with the given API key.
    pub fn polish_api_key(mut self, key: impl Into<String>) -> Self {
        self.polish_api_key = Some(key.into());
        self
    }

    pub fn build(self) -> Result<CardVault> {
        let store = match self.store {
            Some(store) => store,
            None => Box::new(JsonFileStore::open(self.data_dir)?),
        };
        let links = LinkParser::new(GithubClient::new(self.timeout), self.offline);
        let polish = self
            .polish_api_key
            .map(|key| PolishClient::new(key, self.timeout));
        Ok(CardVault {
            store,
            links,
            polish,
        })
    }
}

// ---------------------------------------------------------------------------
// CardVault
// ---------------------------------------------------------------------------

/// The main entry point: a collection bound to an explicit store handle.
pub struct CardVault {
    store: Box<dyn Store>,
    links: LinkParser,
    polish: Option<PolishClient>,
}

impl CardVault {
    pub fn builder() -> CardVaultBuilder {
        CardVaultBuilder::default()
    }

    // -- Ingestion ---------------------------------------------------------

    /// Parse a URL into a card and persist it. Rarity defaults from price
    /// (links carry none, so they start common) unless a later edit reprices
    /// the card.
    pub fn add_card_from_link(&mut self, url: &str) -> Result<Card> {
        let draft = self.links.parse(url)?;
        let card = import::convert_card(draft);
        self.store.upsert_card(card.clone())?;
        Ok(card)
    }

    /// Manual quick-add. The heuristic content score decides the rarity
    /// here, rewarding richer entries.
    pub fn quick_add(
        &mut self,
        title: &str,
        description: &str,
        url: Option<&str>,
    ) -> Result<Card> {
        let title = title.trim();
        let description = description.trim();
        if title.is_empty() || description.is_empty() {
            return Err(CardVaultError::InvalidArgument(
                "title and description must be non-empty".to_string(),
            ));
        }
        let mut draft = DraftCard {
            title: title.to_string(),
            description: description.to_string(),
            category: url
                .map(LinkParser::detect_category)
                .unwrap_or(CardCategory::Custom),
            url: url.map(String::from),
            ..Default::default()
        };
        draft.rarity = Some(scoring::content_rarity(&draft));
        let card = import::convert_card(draft);
        self.store.upsert_card(card.clone())?;
        Ok(card)
    }

    /// Access the link parser directly, e.g. for batch parsing.
    pub fn links(&self) -> &LinkParser {
        &self.links
    }

    /// The polish client, when configured with an API key.
    pub fn polish(&self) -> Option<&PolishClient> {
        self.polish.as_ref()
    }

    // -- Import / export ---------------------------------------------------

    /// Parse an import payload, merge it with the stored collection, persist
    /// the result, and report what was actually added.
    pub fn import_json(&mut self, text: &str) -> Result<MergeSummary> {
        let data = import::parse_import(text)?;
        let existing_cards = self.store.list_cards()?;
        let existing_decks = self.store.list_decks()?;
        let outcome = import::merge_import(&data, &existing_cards, &existing_decks);
        self.store.replace_all(outcome.cards, outcome.decks)?;
        Ok(outcome.summary)
    }

    /// Export the whole collection in the import wire shape.
    pub fn export_json(&self) -> Result<String> {
        let cards = self.store.list_cards()?;
        let decks = self.store.list_decks()?;
        Ok(import::export_collection(&cards, &decks))
    }

    // -- Cards -------------------------------------------------------------

    pub fn cards(&self) -> Result<Vec<Card>> {
        self.store.list_cards()
    }

    pub fn get_card(&self, id: &str) -> Result<Option<Card>> {
        Ok(self.store.list_cards()?.into_iter().find(|c| c.id == id))
    }

    /// Persist an edited card, refreshing its last-modified timestamp.
    pub fn update_card(&mut self, mut card: Card) -> Result<Card> {
        card.tags = normalize_tags(card.tags);
        card.touch();
        self.store.upsert_card(card.clone())?;
        Ok(card)
    }

    /// Delete a card. Deck member lists are left alone; dangling references
    /// are filtered at read time.
    pub fn delete_card(&mut self, id: &str) -> Result<bool> {
        self.store.delete_card(id)
    }

    pub fn search(&self, filters: &SearchFilters) -> Result<Vec<Card>> {
        let cards = self.store.list_cards()?;
        Ok(collection::filter_cards(&cards, filters)
            .into_iter()
            .cloned()
            .collect())
    }

    pub fn stats(&self) -> Result<CollectionStats> {
        Ok(collection::collection_stats(&self.store.list_cards()?))
    }

    // -- Decks -------------------------------------------------------------

    pub fn decks(&self) -> Result<Vec<Deck>> {
        self.store.list_decks()
    }

    pub fn create_deck(
        &mut self,
        name: &str,
        description: &str,
        is_public: bool,
        tags: Vec<String>,
    ) -> Result<Deck> {
        let name = name.trim();
        if name.is_empty() {
            return Err(CardVaultError::InvalidArgument(
                "deck name must be non-empty".to_string(),
            ));
        }
        let deck = import::convert_deck(
            &DraftDeck {
                name: name.to_string(),
                description: description.trim().to_string(),
                is_public,
                tags,
                cards: Vec::new(),
            },
            Vec::new(),
        );
        self.store.upsert_deck(deck.clone())?;
        Ok(deck)
    }

    pub fn delete_deck(&mut self, id: &str) -> Result<bool> {
        self.store.delete_deck(id)
    }

    pub fn add_card_to_deck(&mut self, deck_id: &str, card_id: &str) -> Result<bool> {
        let mut deck = self.require_deck(deck_id)?;
        let added = deck.add_card(card_id);
        if added {
            self.store.upsert_deck(deck)?;
        }
        Ok(added)
    }

    pub fn remove_card_from_deck(&mut self, deck_id: &str, card_id: &str) -> Result<bool> {
        let mut deck = self.require_deck(deck_id)?;
        let removed = deck.remove_card(card_id);
        if removed {
            self.store.upsert_deck(deck)?;
        }
        Ok(removed)
    }

    pub fn move_card_in_deck(&mut self, deck_id: &str, from: usize, to: usize) -> Result<()> {
        let mut deck = self.require_deck(deck_id)?;
        deck.move_card(from, to)?;
        self.store.upsert_deck(deck)
    }

    /// Member cards in deck order, dangling references filtered out.
    pub fn cards_in_deck(&self, deck_id: &str) -> Result<Vec<Card>> {
        let deck = self.require_deck(deck_id)?;
        let cards = self.store.list_cards()?;
        Ok(deck.resolve_cards(&cards).into_iter().cloned().collect())
    }

    /// Copy a deck under a new name (or "<name> (copy)"). The copy is
    /// always private.
    pub fn duplicate_deck(&mut self, deck_id: &str, new_name: Option<&str>) -> Result<Deck> {
        let copy = self.require_deck(deck_id)?.duplicate(new_name);
        self.store.upsert_deck(copy.clone())?;
        Ok(copy)
    }

    /// Category and rarity distributions over a deck's resolved members.
    pub fn deck_stats(&self, deck_id: &str) -> Result<DeckStats> {
        let deck = self.require_deck(deck_id)?;
        let cards = self.store.list_cards()?;
        Ok(collection::deck_stats(&deck.resolve_cards(&cards)))
    }

    fn require_deck(&self, deck_id: &str) -> Result<Deck> {
        self.store
            .list_decks()?
            .into_iter()
            .find(|d| d.id == deck_id)
            .ok_or_else(|| CardVaultError::NotFound(format!("deck {deck_id}")))
    }

    // -- Settings ----------------------------------------------------------

    pub fn settings(&self) -> Result<UserSettings> {
        self.store.settings()
    }

    pub fn save_settings(&mut self, settings: UserSettings) -> Result<()> {
        self.store.save_settings(settings)
    }
}
