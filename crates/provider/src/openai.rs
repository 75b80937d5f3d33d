//! OpenAI chat-completions backend.
//!
//! Single synchronous request/response call; the first choice's message
//! content is the result. API error bodies surface their `error.message`
//! text so classification has something real to match.

use crate::AiProvider;
use anyhow::{Result, anyhow, bail};
use reqwest::Client;
use sage_core::{CapabilitySet, ResponseCache, render_error};
use serde::{Deserialize, Serialize};
use std::sync::{Arc, Mutex};

const ENDPOINT: &str = "https://api.openai.com/v1/chat/completions";
const MODEL: &str = "gpt-3.5-turbo";

const CAPABILITIES: CapabilitySet = CapabilitySet {
    streaming: false,
    file_analysis: true,
    code_completion: true,
    multimodal: false,
};

/// OpenAI chat-completions provider.
#[derive(Clone)]
pub struct OpenAi {
    client: Client,
    api_key: String,
    endpoint: String,
    cache: Arc<Mutex<ResponseCache>>,
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: [ChatMessage<'a>; 1],
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Deserialize)]
struct ResponseMessage {
    content: String,
}

#[derive(Deserialize)]
struct ApiError {
    error: ApiErrorBody,
}

#[derive(Deserialize)]
struct ApiErrorBody {
    message: String,
}

impl OpenAi {
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
            cache: Arc::new(Mutex::new(ResponseCache::new())),
        }
    }

    async fn call(&self, prompt: &str) -> Result<String> {
        let body = ChatRequest {
            model: MODEL,
            messages: [ChatMessage {
                role: "user",
                content: prompt,
            }],
        };
        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        let text = response.text().await?;
        tracing::debug!("response ({status}): {text}");

        if !status.is_success() {
            if let Ok(err) = serde_json::from_str::<ApiError>(&text) {
                bail!("{}", err.error.message);
            }
            bail!("HTTP {status}");
        }

        let parsed: ChatResponse = serde_json::from_str(&text)?;
        parsed
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .ok_or_else(|| anyhow!("response contained no choices"))
    }
}

impl AiProvider for OpenAi {
    fn name(&self) -> &'static str {
        "OpenAI"
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

        match self.call(prompt).await {
            Ok(text) => {
                self.cache
                    .lock()
                    .expect("cache lock poisoned")
                    .put(prompt, text.as_str());
                text
            }
            Err(e) => render_error(self.name(), &e),
        }
    }
}
