//! Static capability flags.
//!
//! Each provider variant carries a fixed `CapabilitySet`, decided at
//! construction and never mutated. Lookups are pure.

/// An optional behavior a provider variant may support.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Capability {
    /// Responses arrive as an incremental stream.
    Streaming,
    /// Document content can be analyzed.
    FileAnalysis,
    /// Code-oriented completions are usable.
    CodeCompletion,
    /// Non-text inputs are accepted.
    Multimodal,
}

/// Immutable per-variant capability flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CapabilitySet {
    pub streaming: bool,
    pub file_analysis: bool,
    pub code_completion: bool,
    pub multimodal: bool,
}

impl CapabilitySet {
    /// The empty set.
    pub const NONE: Self = Self {
        streaming: false,
        file_analysis: false,
        code_completion: false,
        multimodal: false,
    };

    /// Whether `capability` is present in this set.
    pub fn contains(&self, capability: Capability) -> bool {
        match capability {
            Capability::Streaming => self.streaming,
            Capability::FileAnalysis => self.file_analysis,
            Capability::CodeCompletion => self.code_completion,
            Capability::Multimodal => self.multimodal,
        }
    }
}
