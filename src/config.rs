use std::path::PathBuf;

pub const GITHUB_API_BASE: &str = "https://api.github.com";

/// Case-insensitive substring markers for AI-prompt sharing platforms.
pub const PROMPT_KEYWORDS: &[&str] = &["prompt", "chatgpt", "claude", "openai", "anthropic"];

/// Default endpoint for the card polish (text rewrite) service.
pub const POLISH_URL: &str =
    "https://generativelanguage.googleapis.com/v1beta/models/gemini-2.0-flash-exp:generateContent";

pub const CARDS_FILE: &str = "cards.json";
pub const DECKS_FILE: &str = "decks.json";
pub const SETTINGS_FILE: &str = "settings.json";

pub fn default_data_dir() -> PathBuf {
    if let Some(data) = dirs::data_dir() {
        data.join("cardvault")
    } else {
        PathBuf::from(".cardvault")
    }
}
