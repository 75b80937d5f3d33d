//! Error classification and rendering.
//!
//! Failures cross the provider boundary as display strings, never as
//! errors, so success and failure are structurally identical to the
//! dispatcher. Classification is a case-insensitive substring match on the
//! underlying message text, a heuristic over the transports' unstructured
//! error strings; it will misclassify a message that contains one of the
//! matched substrings incidentally.

use std::fmt;

/// Coarse failure categories driving retry and display behavior.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorClass {
    /// The backend refused the call for quota reasons; retryable.
    RateLimit,
    /// Credentials are missing or rejected.
    Authentication,
    /// The transport could not reach the backend.
    Connection,
    /// Anything the substring rules do not recognize.
    Unknown,
}

impl fmt::Display for ErrorClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::RateLimit => "rate limit",
            Self::Authentication => "authentication",
            Self::Connection => "connection",
            Self::Unknown => "unknown",
        };
        f.write_str(label)
    }
}

/// Classify an error message by substring inspection.
pub fn classify(message: &str) -> ErrorClass {
    let lower = message.to_lowercase();
    if lower.contains("rate limit") {
        ErrorClass::RateLimit
    } else if lower.contains("authentication") || lower.contains("api key") {
        ErrorClass::Authentication
    } else if lower.contains("connection") {
        ErrorClass::Connection
    } else {
        ErrorClass::Unknown
    }
}

/// Render a provider failure as the user-visible transcript string.
///
/// The result is prefixed with the provider name and, when the message
/// classifies, the error category.
pub fn render_error(provider: &str, error: &anyhow::Error) -> String {
    match classify(&error.to_string()) {
        ErrorClass::Unknown => format!("Error with {provider}: {error}"),
        class => format!("Error with {provider} ({class}): {error}"),
    }
}
