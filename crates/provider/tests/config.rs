//! Tests for `ProviderConfig` serialization and validation.

use sage_provider::{OllamaConfig, ProviderConfig, RemoteConfig};

#[test]
fn test_kind_strings() {
    assert_eq!(ProviderConfig::None.kind(), "none");
    assert_eq!(
        ProviderConfig::Ollama(OllamaConfig::default()).kind(),
        "ollama"
    );
    assert_eq!(
        ProviderConfig::OpenAi(RemoteConfig::default()).kind(),
        "openai"
    );
    assert_eq!(
        ProviderConfig::Gemini(RemoteConfig::default()).kind(),
        "gemini"
    );
}

#[test]
fn test_ollama_defaults() {
    let config = OllamaConfig::default();
    assert_eq!(config.host, "http://localhost");
    assert_eq!(config.port, 11434);
    assert_eq!(config.model, "llama3");
}

#[test]
fn test_tagged_json_round_trip() {
    let config = ProviderConfig::Ollama(OllamaConfig {
        host: "http://10.0.0.5".to_owned(),
        port: 4040,
        model: "codellama".into(),
    });
    let json = serde_json::to_string(&config).unwrap();
    assert!(json.contains(r#""provider":"ollama""#));

    let parsed: ProviderConfig = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed, config);
}

#[test]
fn test_none_kind_round_trip() {
    let json = serde_json::to_string(&ProviderConfig::None).unwrap();
    assert_eq!(json, r#"{"provider":"none"}"#);
    let parsed: ProviderConfig = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed, ProviderConfig::None);
}

#[test]
fn test_hosted_kind_parses_api_key() {
    let parsed: ProviderConfig =
        serde_json::from_str(r#"{"provider":"openai","api_key":"sk-test"}"#).unwrap();
    assert_eq!(
        parsed,
        ProviderConfig::OpenAi(RemoteConfig {
            api_key: "sk-test".to_owned()
        })
    );
}

#[test]
fn test_missing_fields_take_defaults() {
    let parsed: ProviderConfig = serde_json::from_str(r#"{"provider":"ollama"}"#).unwrap();
    assert_eq!(parsed, ProviderConfig::Ollama(OllamaConfig::default()));
}

#[test]
fn test_validate_rejects_empty_api_key() {
    let result = ProviderConfig::OpenAi(RemoteConfig::default()).validate();
    assert!(result.is_err());
    assert!(result.unwrap_err().to_string().contains("API key"));
}

#[test]
fn test_validate_rejects_empty_ollama_host() {
    let config = ProviderConfig::Ollama(OllamaConfig {
        host: String::new(),
        ..OllamaConfig::default()
    });
    assert!(config.validate().is_err());
}

#[test]
fn test_validate_accepts_none() {
    assert!(ProviderConfig::None.validate().is_ok());
}
