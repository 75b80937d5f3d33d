//! Ollama-compatible local model server backend.
//!
//! Speaks `POST {host}:{port}/api/generate` with a streaming
//! newline-delimited JSON response. `response` fragments accumulate in
//! arrival order; lines that fail to parse are skipped, not fatal.

use crate::{AiProvider, OllamaConfig};
use anyhow::Result;
use compact_str::CompactString;
use futures_util::StreamExt;
use reqwest::Client;
use sage_core::{CapabilitySet, ResponseCache, render_error};
use serde::{Deserialize, Serialize};
use std::sync::{Arc, Mutex};

const CAPABILITIES: CapabilitySet = CapabilitySet {
    streaming: true,
    file_analysis: true,
    code_completion: true,
    multimodal: false,
};

/// Local model server provider.
#[derive(Clone)]
pub struct Ollama {
    client: Client,
    base_url: String,
    model: CompactString,
    cache: Arc<Mutex<ResponseCache>>,
}

#[derive(Serialize)]
struct GenerateRequest<'a> {
    model: &'a str,
    prompt: &'a str,
}

#[derive(Deserialize)]
struct GenerateChunk {
    #[serde(default)]
    response: Option<String>,
}

/// Outcome of one generate call, before error rendering.
enum Fetched {
    Text(String),
    HttpError(u16),
}

impl Ollama {
    /// Create a provider from the local-server settings.
    pub fn new(client: Client, config: &OllamaConfig) -> Self {
        Self {
            client,
            base_url: format!("{}:{}", config.host, config.port),
            model: config.model.clone(),
            cache: Arc::new(Mutex::new(ResponseCache::new())),
        }
    }

    async fn fetch(&self, prompt: &str) -> Result<Fetched> {
        let body = GenerateRequest {
            model: self.model.as_str(),
            prompt,
        };
        let response = self
            .client
            .post(format!("{}/api/generate", self.base_url))
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Ok(Fetched::HttpError(status.as_u16()));
        }

        // Accumulate newline-delimited JSON fragments; a network chunk may
        // split a line, so buffer until a full line is available.
        let mut full = String::new();
        let mut buffer = String::new();
        let mut stream = response.bytes_stream();
        while let Some(next) = stream.next().await {
            let bytes = next?;
            buffer.push_str(&String::from_utf8_lossy(&bytes));
            while let Some(newline) = buffer.find('\n') {
                let line: String = buffer.drain(..=newline).collect();
                accumulate(&mut full, line.trim());
            }
        }
        accumulate(&mut full, buffer.trim());

        Ok(Fetched::Text(full))
    }
}

/// Append one stream line's `response` fragment, skipping malformed lines.
fn accumulate(full: &mut String, line: &str) {
    if line.is_empty() {
        return;
    }
    match serde_json::from_str::<GenerateChunk>(line) {
        Ok(chunk) => {
            if let Some(fragment) = chunk.response {
                full.push_str(&fragment);
            }
        }
        Err(e) => tracing::warn!("skipping malformed stream line: {e}"),
    }
}

impl AiProvider for Ollama {
    fn name(&self) -> &'static str {
        "Ollama"
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

        match self.fetch(prompt).await {
            Ok(Fetched::Text(text)) => {
                self.cache
                    .lock()
                    .expect("cache lock poisoned")
                    .put(prompt, text.as_str());
                text
            }
            // Non-success statuses surface literally, without classification.
            Ok(Fetched::HttpError(code)) => format!("Error: {code}"),
            Err(e) => render_error(self.name(), &e),
        }
    }
}
