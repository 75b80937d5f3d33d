//! `AiProvider` contract and the unified `Provider` enum.

use crate::{Gemini, Ollama, OpenAi, ProviderConfig, WebOnly};
use reqwest::Client;
use sage_core::{Capability, CapabilitySet, FileType};

/// Build the analysis prompt for a loaded document.
pub fn analysis_prompt(file_type: FileType, content: &str) -> String {
    format!("Please analyze this {file_type} content:\n\n{content}")
}

/// Shared contract implemented by every backend variant.
///
/// Both operations are total: failures are rendered into the returned
/// string, never raised, and every successful generation is recorded in
/// the variant's own response cache.
pub trait AiProvider: Clone + Send + Sync + 'static {
    /// Provider name, used as the error-string prefix.
    fn name(&self) -> &'static str;

    /// Fixed capability flags for this variant.
    fn capabilities(&self) -> CapabilitySet;

    /// Whether this variant supports `capability`.
    fn supports(&self, capability: Capability) -> bool {
        self.capabilities().contains(capability)
    }

    /// Generate a response for `prompt`.
    ///
    /// The cache is probed first by exact prompt text; a hit returns
    /// immediately with no transport call and no retry logic.
    fn generate_response(&self, prompt: &str) -> impl Future<Output = String> + Send;

    /// Analyze already-extracted document content.
    fn analyze_file(
        &self,
        content: &str,
        file_type: FileType,
    ) -> impl Future<Output = String> + Send {
        let prompt = analysis_prompt(file_type, content);
        async move { self.generate_response(&prompt).await }
    }
}

/// Unified provider enum over the closed backend set.
///
/// Clones share the underlying instance state, including the response
/// cache, so the active provider can be cloned out of its slot per call.
#[derive(Clone)]
pub enum Provider {
    Ollama(Ollama),
    OpenAi(OpenAi),
    Gemini(Gemini),
    WebOnly(WebOnly),
}

/// Construct a `Provider` from config and a shared HTTP client.
///
/// Pure construction: selects the variant by kind and passes settings
/// through. Re-invoked wholesale whenever configuration changes; the
/// replaced instance's cache drops with it.
pub fn build_provider(config: &ProviderConfig, client: Client) -> Provider {
    match config {
        ProviderConfig::None => Provider::WebOnly(WebOnly),
        ProviderConfig::Ollama(settings) => Provider::Ollama(Ollama::new(client, settings)),
        ProviderConfig::OpenAi(settings) => {
            Provider::OpenAi(OpenAi::new(client, &settings.api_key))
        }
        ProviderConfig::Gemini(settings) => {
            Provider::Gemini(Gemini::new(client, &settings.api_key))
        }
    }
}

impl AiProvider for Provider {
    fn name(&self) -> &'static str {
        match self {
            Self::Ollama(p) => p.name(),
            Self::OpenAi(p) => p.name(),
            Self::Gemini(p) => p.name(),
            Self::WebOnly(p) => p.name(),
        }
    }

    fn capabilities(&self) -> CapabilitySet {
        match self {
            Self::Ollama(p) => p.capabilities(),
            Self::OpenAi(p) => p.capabilities(),
            Self::Gemini(p) => p.capabilities(),
            Self::WebOnly(p) => p.capabilities(),
        }
    }

    async fn generate_response(&self, prompt: &str) -> String {
        match self {
            Self::Ollama(p) => p.generate_response(prompt).await,
            Self::OpenAi(p) => p.generate_response(prompt).await,
            Self::Gemini(p) => p.generate_response(prompt).await,
            Self::WebOnly(p) => p.generate_response(prompt).await,
        }
    }

    async fn analyze_file(&self, content: &str, file_type: FileType) -> String {
        match self {
            Self::Ollama(p) => p.analyze_file(content, file_type).await,
            Self::OpenAi(p) => p.analyze_file(content, file_type).await,
            Self::Gemini(p) => p.analyze_file(content, file_type).await,
            Self::WebOnly(p) => p.analyze_file(content, file_type).await,
        }
    }
}
