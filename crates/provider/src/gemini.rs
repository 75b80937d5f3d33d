//! Gemini generative-language backend with rate-limit retry.
//!
//! Single synchronous call per attempt. Only rate-limit-classified
//! failures retry (up to three attempts with exponential backoff); every
//! other error class surfaces on first occurrence.

use crate::AiProvider;
use anyhow::{Result, anyhow, bail};
use reqwest::{Client, StatusCode};
use sage_core::{
    BASE_DELAY, CapabilitySet, ErrorClass, MAX_ATTEMPTS, ResponseCache, backoff_delay, classify,
    render_error,
};
use serde::{Deserialize, Serialize};
use std::sync::{Arc, Mutex};
use std::time::Duration;

const ENDPOINT: &str =
    "https://generativelanguage.googleapis.com/v1beta/models/gemini-pro:generateContent";

const MAX_RETRIES_EXCEEDED: &str = "Maximum retries exceeded. Please try again later.";

const CAPABILITIES: CapabilitySet = CapabilitySet {
    streaming: false,
    file_analysis: true,
    code_completion: true,
    multimodal: false,
};

/// Gemini generative-language provider.
#[derive(Clone)]
pub struct Gemini {
    client: Client,
    api_key: String,
    endpoint: String,
    base_delay: Duration,
    cache: Arc<Mutex<ResponseCache>>,
}

#[derive(Serialize)]
struct GenerateRequest<'a> {
    contents: [Content<'a>; 1],
}

#[derive(Serialize)]
struct Content<'a> {
    parts: [Part<'a>; 1],
}

#[derive(Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Deserialize)]
struct GenerateResponse {
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: CandidateContent,
}

#[derive(Deserialize)]
struct CandidateContent {
    parts: Vec<TextPart>,
}

#[derive(Deserialize)]
struct TextPart {
    #[serde(default)]
    text: String,
}

#[derive(Deserialize)]
struct ApiError {
    error: ApiErrorBody,
}

#[derive(Deserialize)]
struct ApiErrorBody {
    message: String,
}

impl Gemini {
    /// Create a provider against the hosted endpoint.
    pub fn new(client: Client, api_key: &str) -> Self {
        Self::custom(client, api_key, ENDPOINT)
    }

    /// Create a provider against a custom endpoint URL.
    pub fn custom(client: Client, api_key: &str, endpoint: &str) -> Self {
        Self {
            client,
            api_key: api_key.to_owned(),
            endpoint: endpoint.to_owned(),
            base_delay: BASE_DELAY,
            cache: Arc::new(Mutex::new(ResponseCache::new())),
        }
    }

    /// Override the backoff base delay.
    pub fn with_base_delay(mut self, base_delay: Duration) -> Self {
        self.base_delay = base_delay;
        self
    }

    async fn call(&self, prompt: &str) -> Result<String> {
        let body = GenerateRequest {
            contents: [Content {
                parts: [Part { text: prompt }],
            }],
        };
        let response = self
            .client
            .post(&self.endpoint)
            .query(&[("key", self.api_key.as_str())])
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        let text = response.text().await?;
        tracing::debug!("response ({status}): {text}");

        // 429 carries no "rate limit" text of its own; name it so the
        // substring classifier can see it.
        if status == StatusCode::TOO_MANY_REQUESTS {
            bail!("rate limit exceeded (HTTP 429)");
        }
        if !status.is_success() {
            if let Ok(err) = serde_json::from_str::<ApiError>(&text) {
                bail!("{}", err.error.message);
            }
            bail!("HTTP {status}");
        }

        let parsed: GenerateResponse = serde_json::from_str(&text)?;
        let candidate = parsed
            .candidates
            .into_iter()
            .next()
            .ok_or_else(|| anyhow!("response contained no candidates"))?;
        Ok(candidate
            .content
            .parts
            .into_iter()
            .map(|part| part.text)
            .collect())
    }
}

impl AiProvider for Gemini {
    fn name(&self) -> &'static str {
        "Gemini"
    }

    fn capabilities(&self) -> CapabilitySet {
        CAPABILITIES
    }

    async fn generate_response(&self, prompt: &str) -> String {
        {
            let cache = self.cache.lock().expect("cache lock poisoned");
            if let Some(hit) = cache.get(prompt) {
                return hit.to_owned();
            }
        }

        for attempt in 0..MAX_ATTEMPTS {
            match self.call(prompt).await {
                Ok(text) => {
                    self.cache
                        .lock()
                        .expect("cache lock poisoned")
                        .put(prompt, text.as_str());
                    return text;
                }
                Err(e) => {
                    if classify(&e.to_string()) != ErrorClass::RateLimit {
                        return render_error(self.name(), &e);
                    }
                    if attempt + 1 < MAX_ATTEMPTS {
                        let delay = backoff_delay(self.base_delay, attempt);
                        tracing::debug!("rate limited, retrying in {delay:?}");
                        tokio::time::sleep(delay).await;
                    }
                }
            }
        }

        MAX_RETRIES_EXCEEDED.to_owned()
    }
}
