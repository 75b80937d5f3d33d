//! Tests for error classification and rendering.

use anyhow::anyhow;
use sage_core::{ErrorClass, classify, render_error};

#[test]
fn test_classify_rate_limit() {
    assert_eq!(classify("Rate limit exceeded"), ErrorClass::RateLimit);
    assert_eq!(classify("hit the RATE LIMIT again"), ErrorClass::RateLimit);
}

#[test]
fn test_classify_authentication() {
    assert_eq!(classify("authentication failed"), ErrorClass::Authentication);
    assert_eq!(
        classify("Incorrect API key provided"),
        ErrorClass::Authentication
    );
}

#[test]
fn test_classify_connection() {
    assert_eq!(
        classify("error sending request: Connection refused"),
        ErrorClass::Connection
    );
}

#[test]
fn test_classify_unknown() {
    assert_eq!(classify("something else entirely"), ErrorClass::Unknown);
    assert_eq!(classify(""), ErrorClass::Unknown);
}

#[test]
fn test_classify_precedence_is_rate_limit_first() {
    // A message matching several rules classifies by the first rule.
    assert_eq!(
        classify("rate limit hit while checking api key"),
        ErrorClass::RateLimit
    );
}

#[test]
fn test_render_classified_error() {
    let rendered = render_error("OpenAI", &anyhow!("Incorrect API key provided"));
    assert_eq!(
        rendered,
        "Error with OpenAI (authentication): Incorrect API key provided"
    );
}

#[test]
fn test_render_unknown_error_has_no_category() {
    let rendered = render_error("Ollama", &anyhow!("boom"));
    assert_eq!(rendered, "Error with Ollama: boom");
}
