//! Web-only fallback: a provider that never performs AI calls.

use crate::AiProvider;
use sage_core::{CapabilitySet, FileType};

const GENERATE_UNAVAILABLE: &str =
    "Web-only mode does not provide AI responses. Please use the web search feature.";
const ANALYZE_UNAVAILABLE: &str =
    "File analysis is not available in web-only mode. Please configure an AI provider.";

/// Inert provider used when no AI backend is configured.
///
/// Both operations return fixed strings without any I/O, and nothing is
/// cached.
#[derive(Clone, Copy, Default)]
pub struct WebOnly;

impl AiProvider for WebOnly {
    fn name(&self) -> &'static str {
        "Web-only"
    }

    fn capabilities(&self) -> CapabilitySet {
        CapabilitySet::NONE
    }

    async fn generate_response(&self, _prompt: &str) -> String {
        GENERATE_UNAVAILABLE.to_owned()
    }

    async fn analyze_file(&self, _content: &str, _file_type: FileType) -> String {
        ANALYZE_UNAVAILABLE.to_owned()
    }
}
