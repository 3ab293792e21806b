//! AI search-suggestion client.
//!
//! Invoked only for the free-text-query branch of navigation, never blocking
//! it. Every failure path (missing key, transport, malformed reply) collapses
//! into a fixed fallback string, so callers treat the reply as infallible.

use serde_json::json;

const API_URL: &str =
    "https://generativelanguage.googleapis.com/v1beta/models/gemini-2.5-flash:generateContent";

/// Reply used whenever the service cannot be reached.
pub const FALLBACK_REPLY: &str = "Could not reach AI services.";

#[derive(Debug, thiserror::Error)]
enum AssistantError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("reply carried no text")]
    MalformedReply,
}

/// Suggestion client. Cheap to clone; each navigation clones it into the
/// fire-and-forget suggestion task.
#[derive(Debug, Clone)]
pub struct Assistant {
    client: reqwest::Client,
    api_key: Option<String>,
}

impl Assistant {
    /// Reads `GEMINI_API_KEY`; absence is not an error, the assistant just
    /// answers with the fallback.
    pub fn from_env() -> Self {
        let api_key = std::env::var("GEMINI_API_KEY")
            .ok()
            .filter(|key| !key.is_empty());
        if api_key.is_none() {
            log::info!("GEMINI_API_KEY not set; AI suggestions disabled");
        }
        Self {
            client: reqwest::Client::new(),
            api_key,
        }
    }

    /// Short plain-text suggestion for a free-text query. Never fails.
    pub async fn suggest(self, query: String) -> String {
        let key = match self.api_key.as_deref() {
            Some(key) => key,
            None => return FALLBACK_REPLY.to_string(),
        };
        match self.request(key, &query).await {
            Ok(text) => text,
            Err(err) => {
                log::warn!("assistant request failed: {}", err);
                FALLBACK_REPLY.to_string()
            }
        }
    }

    async fn request(&self, key: &str, query: &str) -> Result<String, AssistantError> {
        let body = json!({
            "contents": [{ "parts": [{ "text": prompt_for(query) }] }],
        });

        let reply: serde_json::Value = self
            .client
            .post(API_URL)
            .query(&[("key", key)])
            .json(&body)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        reply["candidates"][0]["content"]["parts"][0]["text"]
            .as_str()
            .map(|text| text.trim().to_string())
            .filter(|text| !text.is_empty())
            .ok_or(AssistantError::MalformedReply)
    }
}

fn prompt_for(query: &str) -> String {
    format!(
        "You are an AI assistant built into a web browser. The user typed: \"{}\". \
         If this looks like a factual question, answer it concisely (max 2 sentences). \
         If it looks like a navigation intent (e.g., \"youtube\", \"news\"), suggest the best URL. \
         If it is a general chat, respond briefly and friendly. \
         Keep it short and plain text.",
        query
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_embeds_query() {
        let prompt = prompt_for("weather in tokyo");
        assert!(prompt.contains("\"weather in tokyo\""));
    }

    #[tokio::test]
    async fn test_missing_key_yields_fallback() {
        let assistant = Assistant {
            client: reqwest::Client::new(),
            api_key: None,
        };
        assert_eq!(assistant.suggest("anything".to_string()).await, FALLBACK_REPLY);
    }
}
