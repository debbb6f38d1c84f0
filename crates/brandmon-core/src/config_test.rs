use std::collections::HashMap;
use std::env::VarError;

use super::*;

fn lookup_from_map<'a>(
    map: &'a HashMap<&'a str, &'a str>,
) -> impl Fn(&str) -> Result<String, VarError> + 'a {
    move |key| {
        map.get(key)
            .map(|v| (*v).to_string())
            .ok_or(VarError::NotPresent)
    }
}

/// Returns a map with all required env vars populated with valid defaults.
fn full_env<'a>() -> HashMap<&'a str, &'a str> {
    let mut m = HashMap::new();
    m.insert("BRIGHT_DATA_USERNAME", "brd-customer-test");
    m.insert("BRIGHT_DATA_PASSWORD", "secret-password");
    m.insert("BRIGHT_DATA_API_KEY", "secret-api-key");
    m
}

#[test]
fn build_app_config_fails_without_username() {
    let map: HashMap<&str, &str> = HashMap::new();
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::MissingEnvVar(ref v)) if v == "BRIGHT_DATA_USERNAME"),
        "expected MissingEnvVar(BRIGHT_DATA_USERNAME), got: {result:?}"
    );
}

#[test]
fn build_app_config_fails_without_api_key() {
    let mut map = full_env();
    map.remove("BRIGHT_DATA_API_KEY");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::MissingEnvVar(ref v)) if v == "BRIGHT_DATA_API_KEY"),
        "expected MissingEnvVar(BRIGHT_DATA_API_KEY), got: {result:?}"
    );
}

#[test]
fn build_app_config_treats_blank_credential_as_missing() {
    let mut map = full_env();
    map.insert("BRIGHT_DATA_PASSWORD", "   ");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::MissingEnvVar(ref v)) if v == "BRIGHT_DATA_PASSWORD"),
        "expected MissingEnvVar(BRIGHT_DATA_PASSWORD), got: {result:?}"
    );
}

#[test]
fn build_app_config_succeeds_with_all_required_vars() {
    let map = full_env();
    let result = build_app_config(lookup_from_map(&map));
    assert!(result.is_ok(), "expected Ok, got: {result:?}");
    let cfg = result.unwrap();
    assert_eq!(cfg.bright_data_username, "brd-customer-test");
    assert_eq!(cfg.bright_data_api_url, "https://api.brightdata.com");
    assert_eq!(cfg.proxy_host, "brd.superproxy.io");
    assert_eq!(cfg.proxy_port, 33335);
    assert_eq!(cfg.search_url, "https://www.google.com/search");
    assert_eq!(cfg.search_recency, "w");
    assert_eq!(cfg.scrape_poll_interval_secs, 10);
    assert_eq!(cfg.scrape_timeout_secs, 60);
    assert_eq!(cfg.request_timeout_secs, 30);
    assert_eq!(cfg.llm_provider, LlmProvider::Ollama);
    assert!((cfg.llm_temperature - 0.2).abs() < f32::EPSILON);
    assert_eq!(cfg.groq.model, "llama3-70b-8192");
    assert!(cfg.groq.api_key.is_none());
    assert_eq!(cfg.ollama.model, "deepseek-r1");
    assert_eq!(cfg.ollama.base_url, "http://localhost:11434/v1");
    assert_eq!(cfg.log_level, "info");
}

#[test]
fn llm_provider_override() {
    let mut map = full_env();
    map.insert("LLM_PROVIDER", "groq");
    map.insert("GROQ_API_KEY", "gsk-test");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.llm_provider, LlmProvider::Groq);
    assert_eq!(cfg.groq.api_key.as_deref(), Some("gsk-test"));
}

#[test]
fn llm_provider_invalid() {
    let mut map = full_env();
    map.insert("LLM_PROVIDER", "openai");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "LLM_PROVIDER"),
        "expected InvalidEnvVar(LLM_PROVIDER), got: {result:?}"
    );
}

#[test]
fn llm_temperature_out_of_range() {
    let mut map = full_env();
    map.insert("LLM_TEMPERATURE", "3.5");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "LLM_TEMPERATURE"),
        "expected InvalidEnvVar(LLM_TEMPERATURE), got: {result:?}"
    );
}

#[test]
fn scrape_timeout_override() {
    let mut map = full_env();
    map.insert("BRANDMON_SCRAPE_TIMEOUT_SECS", "120");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.scrape_timeout_secs, 120);
    assert_eq!(cfg.scrape_timeout().as_secs(), 120);
}

#[test]
fn scrape_timeout_invalid() {
    let mut map = full_env();
    map.insert("BRANDMON_SCRAPE_TIMEOUT_SECS", "not-a-number");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "BRANDMON_SCRAPE_TIMEOUT_SECS"),
        "expected InvalidEnvVar(BRANDMON_SCRAPE_TIMEOUT_SECS), got: {result:?}"
    );
}

#[test]
fn zero_poll_interval_rejected() {
    let mut map = full_env();
    map.insert("BRANDMON_SCRAPE_POLL_INTERVAL_SECS", "0");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "BRANDMON_SCRAPE_POLL_INTERVAL_SECS"),
        "expected InvalidEnvVar(BRANDMON_SCRAPE_POLL_INTERVAL_SECS), got: {result:?}"
    );
}

#[test]
fn proxy_port_invalid() {
    let mut map = full_env();
    map.insert("BRIGHT_DATA_PROXY_PORT", "99999");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "BRIGHT_DATA_PROXY_PORT"),
        "expected InvalidEnvVar(BRIGHT_DATA_PROXY_PORT), got: {result:?}"
    );
}

#[test]
fn groq_requires_api_key() {
    let cfg = build_app_config(lookup_from_map(&full_env())).unwrap();
    let err = cfg.require_llm_credentials(LlmProvider::Groq).unwrap_err();
    assert!(matches!(err, ConfigError::MissingEnvVar(ref v) if v == "GROQ_API_KEY"));
    assert!(cfg.require_llm_credentials(LlmProvider::Ollama).is_ok());
}

#[test]
fn debug_output_redacts_secrets() {
    let mut map = full_env();
    map.insert("GROQ_API_KEY", "gsk-very-secret");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    let rendered = format!("{cfg:?}");
    assert!(!rendered.contains("secret-password"));
    assert!(!rendered.contains("secret-api-key"));
    assert!(!rendered.contains("gsk-very-secret"));
    assert!(rendered.contains("[redacted]"));
}
