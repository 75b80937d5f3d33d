//! Provider configuration.
//!
//! A single tagged enum describes every backend kind, discriminated by the
//! `provider` field in JSON. Exactly one kind is active at a time;
//! switching kinds replaces the provider instance wholesale. There is no
//! partial reconfiguration of a live instance.

use anyhow::{Result, bail};
use compact_str::CompactString;
use serde::{Deserialize, Serialize};

/// Backend selection plus its kind-specific settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "provider", rename_all = "snake_case")]
pub enum ProviderConfig {
    /// No AI backend; web search only.
    #[default]
    None,
    /// Local model server speaking the Ollama generate protocol.
    Ollama(OllamaConfig),
    /// OpenAI chat-completions API.
    #[serde(rename = "openai")]
    OpenAi(RemoteConfig),
    /// Gemini generative-language API.
    Gemini(RemoteConfig),
}

impl ProviderConfig {
    /// Human-readable kind string for logging and the front end.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Ollama(_) => "ollama",
            Self::OpenAi(_) => "openai",
            Self::Gemini(_) => "gemini",
        }
    }

    /// Reject configurations that cannot possibly reach their backend.
    pub fn validate(&self) -> Result<()> {
        match self {
            Self::None => Ok(()),
            Self::Ollama(config) => {
                if config.host.is_empty() {
                    bail!("ollama requires a host");
                }
                if config.model.is_empty() {
                    bail!("ollama requires a model");
                }
                Ok(())
            }
            Self::OpenAi(config) | Self::Gemini(config) => {
                if config.api_key.is_empty() {
                    bail!("{} requires an API key", self.kind());
                }
                Ok(())
            }
        }
    }
}

/// Settings for the local model server.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OllamaConfig {
    /// Host including scheme, e.g. `http://localhost`.
    pub host: String,
    pub port: u16,
    pub model: CompactString,
}

impl Default for OllamaConfig {
    fn default() -> Self {
        Self {
            host: "http://localhost".to_owned(),
            port: 11434,
            model: CompactString::const_new("llama3"),
        }
    }
}

/// Settings for hosted API providers.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RemoteConfig {
    pub api_key: String,
}
