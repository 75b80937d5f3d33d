//! Provider abstraction: a uniform surface over heterogeneous AI backends.
//!
//! `AiProvider` is the shared contract; `Provider` wraps the closed set of
//! concrete backends (Ollama, OpenAi, Gemini, WebOnly) behind enum
//! dispatch. `build_provider()` constructs the active variant from
//! `ProviderConfig`; reconfiguration always rebuilds wholesale, dropping
//! the previous instance together with its response cache.
//!
//! Both public operations are total: every transport failure is rendered
//! into the returned string, never raised, so the dispatcher treats
//! success and failure identically.

pub use config::{OllamaConfig, ProviderConfig, RemoteConfig};
pub use gemini::Gemini;
pub use ollama::Ollama;
pub use openai::OpenAi;
pub use provider::{AiProvider, Provider, analysis_prompt, build_provider};
pub use reqwest::Client;
pub use web::WebOnly;

pub mod config;
mod gemini;
mod ollama;
mod openai;
mod provider;
mod web;
