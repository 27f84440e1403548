//! Link classification: turn a raw URL into a normalized draft card.
//!
//! A closed set of parsing strategies is scanned in a fixed order and the
//! first matching one wins. Only the repository strategy performs network
//! I/O (one metadata lookup, degraded to a URL-derived draft on failure);
//! the prompt-share and generic strategies work purely off the URL text.

use std::thread;

use log::{debug, warn};
use serde_json::{json, Map};
use url::Url;

use crate::config;
use crate::error::{CardVaultError, Result};
use crate::github::GithubClient;
use crate::models::{normalize_tags, CardCategory, DraftCard};

// ---------------------------------------------------------------------------
// Strategy
// ---------------------------------------------------------------------------

/// The parsing strategies, in selection order. Generic is the fallback and
/// matches any http(s) URL, so every valid web URL classifies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    Repository,
    PromptShare,
    Generic,
}

impl Strategy {
    /// Scan order. First match wins.
    pub const ORDER: [Strategy; 3] = [Strategy::Repository, Strategy::PromptShare, Strategy::Generic];

    /// Whether this strategy accepts the given URL.
    pub fn matches(&self, url: &Url) -> bool {
        match self {
            Strategy::Repository => {
                let host = url.host_str().unwrap_or("");
                let path = url.path();
                host.contains("github.com") && !path.contains("/issues") && !path.contains("/pull")
            }
            Strategy::PromptShare => {
                let lower = url.as_str().to_lowercase();
                config::PROMPT_KEYWORDS.iter().any(|kw| lower.contains(kw))
            }
            Strategy::Generic => matches!(url.scheme(), "http" | "https"),
        }
    }

    /// Pick the first strategy in [`Strategy::ORDER`] that accepts `url`.
    pub fn select(url: &Url) -> Option<Strategy> {
        Strategy::ORDER.iter().copied().find(|s| s.matches(url))
    }
}

// ---------------------------------------------------------------------------
// LinkParser
// ---------------------------------------------------------------------------

/// Parses URLs into draft cards via the strategy table.
pub struct LinkParser {
    github: GithubClient,
    /// When set, the repository strategy skips its metadata lookup and goes
    /// straight to the URL-derived fallback draft.
    offline: bool,
}

impl LinkParser {
    pub fn new(github: GithubClient, offline: bool) -> Self {
        Self { github, offline }
    }

    /// Parse a single URL into a draft card.
    ///
    /// Syntactically invalid input fails with [`CardVaultError::MalformedUrl`]
    /// before any strategy is attempted. A metadata lookup failure inside the
    /// repository strategy never fails the parse.
    pub fn parse(&self, raw: &str) -> Result<DraftCard> {
        let url = Url::parse(raw)?;
        let strategy = Strategy::select(&url).ok_or_else(|| {
            CardVaultError::InvalidArgument(format!("no parsing strategy for '{raw}'"))
        })?;
        debug!("classified {raw} as {strategy:?}");
        match strategy {
            Strategy::Repository => Ok(self.parse_repository(&url)),
            Strategy::PromptShare => Ok(parse_prompt_share(&url)),
            Strategy::Generic => Ok(parse_generic(&url)),
        }
    }

    /// Parse a batch of URLs. Network lookups are fanned out concurrently,
    /// but results come back in input order and one URL's failure never
    /// aborts the batch: it degrades to a placeholder draft carrying the
    /// failure reason in metadata. The result length equals the input length.
    pub fn parse_batch(&self, raws: &[&str]) -> Vec<DraftCard> {
        let results: Vec<Result<DraftCard>> = thread::scope(|scope| {
            let handles: Vec<_> = raws
                .iter()
                .map(|raw| scope.spawn(move || self.parse(raw)))
                .collect();
            handles
                .into_iter()
                .map(|h| match h.join() {
                    Ok(res) => res,
                    Err(_) => Err(CardVaultError::InvalidArgument(
                        "link parsing panicked".to_string(),
                    )),
                })
                .collect()
        });

        results
            .into_iter()
            .enumerate()
            .map(|(i, res)| match res {
                Ok(draft) => draft,
                Err(e) => {
                    warn!("failed to parse {}: {e}", raws[i]);
                    placeholder_draft(i, raws[i], &e)
                }
            })
            .collect()
    }

    /// Cheap category classification without building a draft.
    pub fn detect_category(raw: &str) -> CardCategory {
        if raw.contains("github.com") {
            return CardCategory::GithubRepo;
        }
        let lower = raw.to_lowercase();
        if config::PROMPT_KEYWORDS.iter().any(|kw| lower.contains(kw)) {
            return CardCategory::PromptShare;
        }
        CardCategory::ToolWebsite
    }

    // -- Repository strategy -----------------------------------------------

    fn parse_repository(&self, url: &Url) -> DraftCard {
        let (owner, repo) = owner_repo(url);

        if !self.offline {
            match self.github.fetch_repo(&owner, &repo) {
                Ok(meta) => return repository_draft_from_metadata(url, meta),
                Err(e) => warn!("metadata lookup for {owner}/{repo} failed: {e}"),
            }
        }

        // Minimal draft derived purely from the URL path.
        let mut metadata = Map::new();
        metadata.insert("owner".into(), json!(owner));
        metadata.insert("repo".into(), json!(repo));
        metadata.insert("stars".into(), json!(0));
        metadata.insert("language".into(), json!("Unknown"));
        DraftCard {
            title: repo.clone(),
            description: format!("GitHub repository: {owner}/{repo}"),
            category: CardCategory::GithubRepo,
            url: Some(url.to_string()),
            tags: normalize_tags(["GitHub", "open-source"]),
            metadata,
            ..Default::default()
        }
    }
}

/// Owner and repo from the first two path segments, `.git` suffix stripped.
/// Segments missing from the URL are guessed as "unknown".
fn owner_repo(url: &Url) -> (String, String) {
    let mut segments = url
        .path_segments()
        .into_iter()
        .flatten()
        .filter(|s| !s.is_empty());
    let owner = segments.next().unwrap_or("unknown").to_string();
    let repo = segments
        .next()
        .unwrap_or("unknown")
        .trim_end_matches(".git")
        .to_string();
    (owner, repo)
}

fn repository_draft_from_metadata(url: &Url, meta: crate::github::RepoMetadata) -> DraftCard {
    let mut tags: Vec<String> = Vec::new();
    if let Some(lang) = &meta.language {
        tags.push(lang.clone());
    }
    tags.push("GitHub".to_string());
    tags.push("open-source".to_string());
    tags.extend(meta.topics.iter().cloned());

    let mut metadata = Map::new();
    metadata.insert("owner".into(), json!(meta.owner.login));
    metadata.insert("repo".into(), json!(meta.name));
    metadata.insert("stars".into(), json!(meta.stars));
    metadata.insert(
        "language".into(),
        json!(meta.language.clone().unwrap_or_else(|| "Unknown".to_string())),
    );
    if let Some(updated) = &meta.updated_at {
        metadata.insert("lastUpdated".into(), json!(updated));
    }

    DraftCard {
        title: meta.name.clone(),
        description: meta
            .description
            .clone()
            .unwrap_or_else(|| "A GitHub repository".to_string()),
        category: CardCategory::GithubRepo,
        url: Some(url.to_string()),
        image_url: meta.owner.avatar_url.clone(),
        tags: normalize_tags(tags),
        metadata,
        ..Default::default()
    }
}

// -- Prompt-share strategy --------------------------------------------------

fn parse_prompt_share(url: &Url) -> DraftCard {
    let domain = url.host_str().unwrap_or("unknown").to_string();
    let mut metadata = Map::new();
    metadata.insert("domain".into(), json!(domain));
    metadata.insert("url".into(), json!(url.to_string()));
    DraftCard {
        title: format!("Prompt share - {domain}"),
        description: format!("An AI prompt shared via {domain}"),
        category: CardCategory::PromptShare,
        url: Some(url.to_string()),
        tags: normalize_tags(["Prompt", "AI", domain.as_str()]),
        metadata,
        ..Default::default()
    }
}

// -- Generic fallback strategy ----------------------------------------------

fn parse_generic(url: &Url) -> DraftCard {
    let domain = url.host_str().unwrap_or("unknown").to_string();

    let mut category = CardCategory::ToolWebsite;
    let mut tags = vec!["website".to_string()];
    if config::PROMPT_KEYWORDS.iter().any(|kw| domain.contains(kw)) {
        category = CardCategory::PromptShare;
        tags.push("AI".to_string());
        tags.push("Prompt".to_string());
    } else if domain.contains("tool") || domain.contains("app") {
        tags.push("tool".to_string());
    }
    tags.push(domain.clone());

    let mut metadata = Map::new();
    metadata.insert("domain".into(), json!(domain));
    metadata.insert("url".into(), json!(url.to_string()));
    DraftCard {
        title: domain.clone(),
        description: format!("Resource from {domain}"),
        category,
        url: Some(url.to_string()),
        tags: normalize_tags(tags),
        metadata,
        ..Default::default()
    }
}

/// Draft standing in for a URL that failed to parse inside a batch.
fn placeholder_draft(index: usize, raw: &str, err: &CardVaultError) -> DraftCard {
    let mut metadata = Map::new();
    metadata.insert("url".into(), json!(raw));
    metadata.insert("error".into(), json!(err.to_string()));
    DraftCard {
        title: format!("Link {}", index + 1),
        description: "Link that could not be parsed".to_string(),
        category: CardCategory::Custom,
        tags: normalize_tags(["link"]),
        metadata,
        ..Default::default()
    }
}
