use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

// ---------------------------------------------------------------------------
// Closed enumerations
// ---------------------------------------------------------------------------

/// What kind of external resource a card points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CardCategory {
    GithubRepo,
    ToolWebsite,
    PromptShare,
    Custom,
}

impl CardCategory {
    pub const ALL: [CardCategory; 4] = [
        CardCategory::GithubRepo,
        CardCategory::ToolWebsite,
        CardCategory::PromptShare,
        CardCategory::Custom,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            CardCategory::GithubRepo => "github_repo",
            CardCategory::ToolWebsite => "tool_website",
            CardCategory::PromptShare => "prompt_share",
            CardCategory::Custom => "custom",
        }
    }

    /// Parse a wire name; unknown names map to `None` (callers default to
    /// [`CardCategory::Custom`]).
    pub fn parse(s: &str) -> Option<CardCategory> {
        match s {
            "github_repo" => Some(CardCategory::GithubRepo),
            "tool_website" => Some(CardCategory::ToolWebsite),
            "prompt_share" => Some(CardCategory::PromptShare),
            "custom" => Some(CardCategory::Custom),
            _ => None,
        }
    }
}

impl Default for CardCategory {
    fn default() -> Self {
        CardCategory::Custom
    }
}

/// Collectible tier, lowest to highest. The derive order is the display
/// order, so `Ord` sorts common < rare < epic < legendary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Rarity {
    Common,
    Rare,
    Epic,
    Legendary,
}

impl Rarity {
    pub const ALL: [Rarity; 4] = [Rarity::Common, Rarity::Rare, Rarity::Epic, Rarity::Legendary];

    pub fn as_str(&self) -> &'static str {
        match self {
            Rarity::Common => "common",
            Rarity::Rare => "rare",
            Rarity::Epic => "epic",
            Rarity::Legendary => "legendary",
        }
    }

    pub fn parse(s: &str) -> Option<Rarity> {
        match s {
            "common" => Some(Rarity::Common),
            "rare" => Some(Rarity::Rare),
            "epic" => Some(Rarity::Epic),
            "legendary" => Some(Rarity::Legendary),
            _ => None,
        }
    }
}

/// Monetary band a price falls into. See [`crate::scoring::price_tier`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PriceTier {
    Free,
    Budget,
    Standard,
    Premium,
    Enterprise,
}

// ---------------------------------------------------------------------------
// Card — the persisted collectible unit
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Card {
    pub id: String,
    pub title: String,
    pub description: String,
    #[serde(rename = "type")]
    pub category: CardCategory,
    pub rarity: Rarity,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    /// Open key-value bag whose shape depends on the category (e.g. star
    /// count and primary language for repository cards).
    #[serde(default)]
    pub metadata: Map<String, Value>,
}

impl Card {
    /// Refresh the last-modified timestamp. Every in-place mutation goes
    /// through this.
    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }

    /// Replace the tag list, trimming and deduplicating case-insensitively.
    pub fn set_tags<I, S>(&mut self, tags: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.tags = normalize_tags(tags);
        self.touch();
    }
}

// ---------------------------------------------------------------------------
// DraftCard — parsed/imported card awaiting identity and timestamps
// ---------------------------------------------------------------------------

/// Intermediate, not-yet-persisted card produced by link parsing or import
/// validation. Serializes to the import/export wire shape.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DraftCard {
    pub title: String,
    pub description: String,
    #[serde(rename = "type", default)]
    pub category: CardCategory,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rarity: Option<Rarity>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub metadata: Map<String, Value>,
}

impl DraftCard {
    /// Star count from the metadata bag, for repository drafts. Missing or
    /// non-numeric values read as zero.
    pub fn stars(&self) -> u64 {
        self.metadata
            .get("stars")
            .and_then(Value::as_u64)
            .unwrap_or(0)
    }
}

// ---------------------------------------------------------------------------
// Tag normalization
// ---------------------------------------------------------------------------

/// Trim, drop empties, and deduplicate case-insensitively. The first
/// occurrence's casing is the one stored.
pub fn normalize_tags<I, S>(tags: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut seen: Vec<String> = Vec::new();
    let mut out = Vec::new();
    for tag in tags {
        let trimmed = tag.as_ref().trim();
        if trimmed.is_empty() {
            continue;
        }
        let lower = trimmed.to_lowercase();
        if seen.contains(&lower) {
            continue;
        }
        seen.push(lower);
        out.push(trimmed.to_string());
    }
    out
}
