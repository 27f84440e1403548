//! Persistence: an explicit store handle passed into the facade, never a
//! global singleton, so tests can substitute an in-memory fake.
//!
//! Two implementations ship: [`MemoryStore`] for tests and embedding, and
//! [`JsonFileStore`] keeping one JSON file per collection on disk. The store
//! is a last-write-wins single-writer contract; no transactionality is
//! assumed across calls.

use std::fs;
use std::path::PathBuf;

use log::warn;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::config;
use crate::error::Result;
use crate::models::{Card, Deck};

// ---------------------------------------------------------------------------
// UserSettings
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Light,
    Dark,
    Auto,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserSettings {
    pub theme: Theme,
    pub language: String,
    pub auto_sync: bool,
    pub notifications: bool,
}

impl Default for UserSettings {
    fn default() -> Self {
        Self {
            theme: Theme::Auto,
            language: "en".to_string(),
            auto_sync: false,
            notifications: true,
        }
    }
}

// ---------------------------------------------------------------------------
// Store trait
// ---------------------------------------------------------------------------

/// Read/write contract for card and deck persistence.
pub trait Store {
    fn list_cards(&self) -> Result<Vec<Card>>;
    fn upsert_card(&mut self, card: Card) -> Result<()>;
    fn delete_card(&mut self, id: &str) -> Result<bool>;

    fn list_decks(&self) -> Result<Vec<Deck>>;
    fn upsert_deck(&mut self, deck: Deck) -> Result<()>;
    fn delete_deck(&mut self, id: &str) -> Result<bool>;

    fn settings(&self) -> Result<UserSettings>;
    fn save_settings(&mut self, settings: UserSettings) -> Result<()>;

    /// Replace both collections wholesale, e.g. after a merge.
    fn replace_all(&mut self, cards: Vec<Card>, decks: Vec<Deck>) -> Result<()>;
}

// ---------------------------------------------------------------------------
// MemoryStore
// ---------------------------------------------------------------------------

/// Volatile in-memory store.
#[derive(Debug, Default)]
pub struct MemoryStore {
    cards: Vec<Card>,
    decks: Vec<Deck>,
    settings: UserSettings,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Store for MemoryStore {
    fn list_cards(&self) -> Result<Vec<Card>> {
        Ok(self.cards.clone())
    }

    fn upsert_card(&mut self, card: Card) -> Result<()> {
        match self.cards.iter_mut().find(|c| c.id == card.id) {
            Some(slot) => *slot = card,
            None => self.cards.push(card),
        }
        Ok(())
    }

    fn delete_card(&mut self, id: &str) -> Result<bool> {
        let before = self.cards.len();
        self.cards.retain(|c| c.id != id);
        Ok(self.cards.len() != before)
    }

    fn list_decks(&self) -> Result<Vec<Deck>> {
        Ok(self.decks.clone())
    }

    fn upsert_deck(&mut self, deck: Deck) -> Result<()> {
        match self.decks.iter_mut().find(|d| d.id == deck.id) {
            Some(slot) => *slot = deck,
            None => self.decks.push(deck),
        }
        Ok(())
    }

    fn delete_deck(&mut self, id: &str) -> Result<bool> {
        let before = self.decks.len();
        self.decks.retain(|d| d.id != id);
        Ok(self.decks.len() != before)
    }

    fn settings(&self) -> Result<UserSettings> {
        Ok(self.settings.clone())
    }

    fn save_settings(&mut self, settings: UserSettings) -> Result<()> {
        self.settings = settings;
        Ok(())
    }

    fn replace_all(&mut self, cards: Vec<Card>, decks: Vec<Deck>) -> Result<()> {
        self.cards = cards;
        self.decks = decks;
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// JsonFileStore
// ---------------------------------------------------------------------------

/// Durable store keeping `cards.json`, `decks.json`, and `settings.json`
/// under a data directory.
///
/// Writes go to a temp file and rename into place, so an interrupted write
/// never leaves a corrupt half-file behind. An unreadable or corrupt file
/// reads as an empty collection, never an error.
pub struct JsonFileStore {
    data_dir: PathBuf,
}

impl JsonFileStore {
    /// Open (creating if needed) a store at `data_dir`, or the platform
    /// default data directory when `None`.
    pub fn open(data_dir: Option<PathBuf>) -> Result<Self> {
        let dir = data_dir.unwrap_or_else(config::default_data_dir);
        fs::create_dir_all(&dir)?;
        Ok(Self { data_dir: dir })
    }

    pub fn data_dir(&self) -> &PathBuf {
        &self.data_dir
    }

    fn load<T: DeserializeOwned + Default>(&self, filename: &str) -> T {
        let path = self.data_dir.join(filename);
        if !path.exists() {
            return T::default();
        }
        match fs::read_to_string(&path) {
            Ok(text) => match serde_json::from_str(&text) {
                Ok(value) => value,
                Err(e) => {
                    warn!("corrupt store file {}: {e}", path.display());
                    T::default()
                }
            },
            Err(e) => {
                warn!("unreadable store file {}: {e}", path.display());
                T::default()
            }
        }
    }

    fn save<T: Serialize>(&self, filename: &str, value: &T) -> Result<()> {
        let path = self.data_dir.join(filename);
        let tmp = path.with_extension("json.tmp");
        let text = serde_json::to_string_pretty(value)?;
        let result = fs::write(&tmp, text).and_then(|_| fs::rename(&tmp, &path));
        if result.is_err() {
            let _ = fs::remove_file(&tmp);
        }
        result.map_err(Into::into)
    }
}

impl Store for JsonFileStore {
    fn list_cards(&self) -> Result<Vec<Card>> {
        Ok(self.load(config::CARDS_FILE))
    }

    fn upsert_card(&mut self, card: Card) -> Result<()> {
        let mut cards: Vec<Card> = self.load(config::CARDS_FILE);
        match cards.iter_mut().find(|c| c.id == card.id) {
            Some(slot) => *slot = card,
            None => cards.push(card),
        }
        self.save(config::CARDS_FILE, &cards)
    }

    fn delete_card(&mut self, id: &str) -> Result<bool> {
        let mut cards: Vec<Card> = self.load(config::CARDS_FILE);
        let before = cards.len();
        cards.retain(|c| c.id != id);
        let removed = cards.len() != before;
        if removed {
            self.save(config::CARDS_FILE, &cards)?;
        }
        Ok(removed)
    }

    fn list_decks(&self) -> Result<Vec<Deck>> {
        Ok(self.load(config::DECKS_FILE))
    }

    fn upsert_deck(&mut self, deck: Deck) -> Result<()> {
        let mut decks: Vec<Deck> = self.load(config::DECKS_FILE);
        match decks.iter_mut().find(|d| d.id == deck.id) {
            Some(slot) => *slot = deck,
            None => decks.push(deck),
        }
        self.save(config::DECKS_FILE, &decks)
    }

    fn delete_deck(&mut self, id: &str) -> Result<bool> {
        let mut decks: Vec<Deck> = self.load(config::DECKS_FILE);
        let before = decks.len();
        decks.retain(|d| d.id != id);
        let removed = decks.len() != before;
        if removed {
            self.save(config::DECKS_FILE, &decks)?;
        }
        Ok(removed)
    }

    fn settings(&self) -> Result<UserSettings> {
        Ok(self.load(config::SETTINGS_FILE))
    }

    fn save_settings(&mut self, settings: UserSettings) -> Result<()> {
        self.save(config::SETTINGS_FILE, &settings)
    }

    fn replace_all(&mut self, cards: Vec<Card>, decks: Vec<Deck>) -> Result<()> {
        self.save(config::CARDS_FILE, &cards)?;
        self.save(config::DECKS_FILE, &decks)
    }
}
