//! Active-provider slot.

use sage_provider::{AiProvider, Client, Provider, ProviderConfig, build_provider};
use std::sync::RwLock;

/// Single-owner slot holding the currently active provider.
///
/// Replacing the provider is wholesale: the previous instance drops when
/// the slot is overwritten, and its response cache drops with it. Callers
/// clone the provider out and never hold the lock across a call.
pub struct Session<P> {
    provider: RwLock<P>,
}

impl<P: AiProvider> Session<P> {
    /// Create a session around an initial provider.
    pub fn new(provider: P) -> Self {
        Self {
            provider: RwLock::new(provider),
        }
    }

    /// Clone of the active provider.
    pub fn active(&self) -> P {
        self.provider.read().expect("provider lock poisoned").clone()
    }

    /// Replace the active provider wholesale.
    pub fn replace(&self, provider: P) {
        *self.provider.write().expect("provider lock poisoned") = provider;
    }
}

impl Session<Provider> {
    /// Build the initial provider from configuration.
    pub fn from_config(config: &ProviderConfig, client: Client) -> Self {
        Self::new(build_provider(config, client))
    }

    /// Rebuild the provider after a configuration change.
    pub fn reconfigure(&self, config: &ProviderConfig, client: Client) {
        tracing::debug!("switching provider to {}", config.kind());
        self.replace(build_provider(config, client));
    }
}
