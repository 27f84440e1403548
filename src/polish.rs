//! Best-effort card polish via an external text-rewrite endpoint.
//!
//! The service is opaque: a draft's text goes out, a rewritten title,
//! description, tag list, and optional suggested price come back. The call
//! is user-initiated and has no sane silent fallback, so every failure
//! surfaces as [`CardVaultError::Rewrite`]. One request, no retry.

use std::sync::OnceLock;
use std::time::Duration;

use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::config;
use crate::error::{CardVaultError, Result};
use crate::models::CardCategory;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PolishRequest {
    pub title: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<CardCategory>,
    pub tags: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PolishResponse {
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub suggested_price: Option<f64>,
}

/// Client for the rewrite endpoint (Gemini-style `generateContent` with the
/// API key as a query parameter).
pub struct PolishClient {
    endpoint: String,
    api_key: String,
    timeout: Duration,
    client: OnceLock<Client>,
}

impl PolishClient {
    pub fn new(api_key: impl Into<String>, timeout: Duration) -> Self {
        Self {
            endpoint: config::POLISH_URL.to_string(),
            api_key: api_key.into(),
            timeout,
            client: OnceLock::new(),
        }
    }

    /// Point the client at a different endpoint. Used by tests.
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    fn client(&self) -> &Client {
        self.client.get_or_init(|| {
            Client::builder()
                .timeout(self.timeout)
                .build()
                .expect("failed to build HTTP client")
        })
    }

    /// Rewrite a card's text. Fail-loud: any HTTP, status, or shape problem
    /// is an error for the caller to show.
    pub fn polish(&self, request: &PolishRequest) -> Result<PolishResponse> {
        let prompt = build_prompt(request);
        let body = json!({
            "contents": [{ "parts": [{ "text": prompt }] }],
            "generationConfig": {
                "temperature": 0.7,
                "topK": 40,
                "topP": 0.95,
                "maxOutputTokens": 1024,
            }
        });

        let url = format!("{}?key={}", self.endpoint, self.api_key);
        let resp = self
            .client()
            .post(&url)
            .json(&body)
            .send()?
            .error_for_status()
            .map_err(|e| CardVaultError::Rewrite(e.to_string()))?;

        let data: Value = resp.json()?;
        let text = data
            .pointer("/candidates/0/content/parts/0/text")
            .and_then(Value::as_str)
            .ok_or_else(|| CardVaultError::Rewrite("response carried no text".to_string()))?;

        parse_polish_text(text)
    }
}

fn build_prompt(request: &PolishRequest) -> String {
    format!(
        "Polish this link-card entry and reply with strict JSON only, shaped as \
         {{\"title\": string, \"description\": string, \"tags\": [string], \"suggestedPrice\": number}}.\n\
         Title: {}\nDescription: {}\nUrl: {}\nCategory: {}\nTags: {}\n\
         Keep the title under 50 characters and the description between 100 and 200.",
        request.title,
        request.description,
        request.url.as_deref().unwrap_or("none"),
        request
            .category
            .map(|c| c.as_str())
            .unwrap_or("unknown"),
        request.tags.join(", "),
    )
}

/// The model wraps its JSON in markdown fences more often than not.
fn parse_polish_text(text: &str) -> Result<PolishResponse> {
    let trimmed = text
        .trim()
        .trim_start_matches("```json")
        .trim_start_matches("```")
        .trim_end_matches("```")
        .trim();
    serde_json::from_str(trimmed)
        .map_err(|e| CardVaultError::Rewrite(format!("unparseable rewrite response: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fenced_json_responses_parse() {
        let text = "```json\n{\"title\":\"T\",\"description\":\"D\",\"tags\":[\"a\"],\"suggestedPrice\":10}\n```";
        let resp = parse_polish_text(text).unwrap();
        assert_eq!(resp.title, "T");
        assert_eq!(resp.tags, vec!["a"]);
        assert_eq!(resp.suggested_price, Some(10.0));
    }

    #[test]
    fn bare_json_responses_parse_without_optional_fields() {
        let resp = parse_polish_text(r#"{"title":"T","description":"D"}"#).unwrap();
        assert!(resp.tags.is_empty());
        assert!(resp.suggested_price.is_none());
    }

    #[test]
    fn prose_responses_fail_loud() {
        let err = parse_polish_text("Sure! Here is your polished card.").unwrap_err();
        assert!(matches!(err, CardVaultError::Rewrite(_)));
    }

    #[test]
    fn prompt_includes_the_draft_fields() {
        let prompt = build_prompt(&PolishRequest {
            title: "My Tool".to_string(),
            description: "does things".to_string(),
            url: None,
            category: Some(CardCategory::ToolWebsite),
            tags: vec!["x".to_string()],
        });
        assert!(prompt.contains("My Tool"));
        assert!(prompt.contains("tool_website"));
    }
}
