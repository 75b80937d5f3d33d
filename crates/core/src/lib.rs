//! Sage shared core types.
//!
//! Leaf building blocks used by every other crate in the workspace:
//! capability flags, the bounded response cache, error classification,
//! the retry backoff schedule, and the document boundary types.

pub use cache::ResponseCache;
pub use capability::{Capability, CapabilitySet};
pub use document::{Document, DocumentError, FileType};
pub use error::{ErrorClass, classify, render_error};
pub use retry::{BASE_DELAY, MAX_ATTEMPTS, backoff_delay};

mod cache;
mod capability;
mod document;
mod error;
mod retry;
