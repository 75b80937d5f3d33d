//! Persistent application configuration.
//!
//! A JSON file holding the provider selection, per-provider credentials,
//! local-server settings, theme, and recent files. Loading falls back to
//! defaults when the file is absent or unreadable; every mutation is
//! saved back by the caller.

use sage_provider::{OllamaConfig, ProviderConfig, RemoteConfig};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Recent-files list bound.
pub const MAX_RECENT_FILES: usize = 10;

/// On-disk application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Active provider kind: "none", "ollama", "openai", or "gemini".
    pub ai_provider: String,
    pub api_keys: ApiKeys,
    pub ollama: OllamaConfig,
    pub theme: String,
    pub recent_files: Vec<PathBuf>,
}

/// Stored API keys for the hosted providers.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiKeys {
    pub openai: String,
    pub gemini: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            ai_provider: "none".to_owned(),
            api_keys: ApiKeys::default(),
            ollama: OllamaConfig::default(),
            theme: "dark".to_owned(),
            recent_files: Vec::new(),
        }
    }
}

impl AppConfig {
    /// Load configuration, falling back to defaults on any failure.
    pub fn load(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(text) => serde_json::from_str(&text).unwrap_or_else(|e| {
                tracing::warn!("invalid config file, using defaults: {e}");
                Self::default()
            }),
            Err(_) => Self::default(),
        }
    }

    /// Write configuration to disk as pretty JSON.
    pub fn save(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, serde_json::to_string_pretty(self)?)?;
        Ok(())
    }

    /// Derive the active provider configuration from the stored sections.
    pub fn provider_config(&self) -> ProviderConfig {
        match self.ai_provider.as_str() {
            "ollama" => ProviderConfig::Ollama(self.ollama.clone()),
            "openai" => ProviderConfig::OpenAi(RemoteConfig {
                api_key: self.api_keys.openai.clone(),
            }),
            "gemini" => ProviderConfig::Gemini(RemoteConfig {
                api_key: self.api_keys.gemini.clone(),
            }),
            _ => ProviderConfig::None,
        }
    }

    /// Store an API key for a hosted provider kind.
    pub fn set_api_key(&mut self, provider: &str, key: &str) -> bool {
        match provider {
            "openai" => self.api_keys.openai = key.to_owned(),
            "gemini" => self.api_keys.gemini = key.to_owned(),
            _ => return false,
        }
        true
    }

    /// Record a file at the front of the recent list.
    ///
    /// Re-opening an already-listed file moves it to the front; the list
    /// is truncated to [`MAX_RECENT_FILES`].
    pub fn add_recent_file(&mut self, path: &Path) {
        self.recent_files.retain(|existing| existing != path);
        self.recent_files.insert(0, path.to_owned());
        self.recent_files.truncate(MAX_RECENT_FILES);
    }
}

/// Default configuration file location (`~/.sage/config.json`).
pub fn default_path() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".sage")
        .join("config.json")
}
