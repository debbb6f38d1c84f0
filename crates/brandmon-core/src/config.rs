use crate::app_config::{AppConfig, LlmEndpoint};
use crate::types::LlmProvider;
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files. Useful for testing
/// or when the caller manages env setup.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Pure parsing/validation logic, decoupled from the process environment so
/// it can be tested with a `HashMap` lookup.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let require = |var: &str| -> Result<String, ConfigError> {
        lookup(var)
            .ok()
            .filter(|v| !v.trim().is_empty())
            .ok_or_else(|| ConfigError::MissingEnvVar(var.to_string()))
    };

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let invalid = |var: &str, reason: String| ConfigError::InvalidEnvVar {
        var: var.to_string(),
        reason,
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        or_default(var, default)
            .parse::<u64>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let parse_u16 = |var: &str, default: &str| -> Result<u16, ConfigError> {
        or_default(var, default)
            .parse::<u16>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let bright_data_username = require("BRIGHT_DATA_USERNAME")?;
    let bright_data_password = require("BRIGHT_DATA_PASSWORD")?;
    let bright_data_api_key = require("BRIGHT_DATA_API_KEY")?;

    let bright_data_api_url = or_default("BRIGHT_DATA_API_URL", "https://api.brightdata.com");
    let proxy_host = or_default("BRIGHT_DATA_PROXY_HOST", "brd.superproxy.io");
    let proxy_port = parse_u16("BRIGHT_DATA_PROXY_PORT", "33335")?;
    let search_url = or_default("BRANDMON_SEARCH_URL", "https://www.google.com/search");
    let search_recency = or_default("BRANDMON_SEARCH_RECENCY", "w");

    let scrape_poll_interval_secs = parse_u64("BRANDMON_SCRAPE_POLL_INTERVAL_SECS", "10")?;
    let scrape_timeout_secs = parse_u64("BRANDMON_SCRAPE_TIMEOUT_SECS", "60")?;
    let request_timeout_secs = parse_u64("BRANDMON_REQUEST_TIMEOUT_SECS", "30")?;
    if scrape_poll_interval_secs == 0 {
        return Err(invalid(
            "BRANDMON_SCRAPE_POLL_INTERVAL_SECS",
            "must be greater than zero".to_string(),
        ));
    }

    let llm_provider = or_default("LLM_PROVIDER", "ollama")
        .parse::<LlmProvider>()
        .map_err(|reason| invalid("LLM_PROVIDER", reason))?;

    let llm_temperature = or_default("LLM_TEMPERATURE", "0.2")
        .parse::<f32>()
        .map_err(|e| invalid("LLM_TEMPERATURE", e.to_string()))?;
    if !(0.0..=2.0).contains(&llm_temperature) {
        return Err(invalid(
            "LLM_TEMPERATURE",
            format!("{llm_temperature} is outside 0.0..=2.0"),
        ));
    }

    let groq = LlmEndpoint {
        base_url: or_default("GROQ_BASE_URL", "https://api.groq.com/openai/v1"),
        model: or_default("GROQ_MODEL", "llama3-70b-8192"),
        api_key: lookup("GROQ_API_KEY").ok().filter(|k| !k.trim().is_empty()),
    };
    let ollama = LlmEndpoint {
        base_url: or_default("OLLAMA_BASE_URL", "http://localhost:11434/v1"),
        model: or_default("OLLAMA_MODEL", "deepseek-r1"),
        api_key: None,
    };

    let log_level = or_default("BRANDMON_LOG_LEVEL", "info");

    Ok(AppConfig {
        bright_data_username,
        bright_data_password,
        bright_data_api_key,
        bright_data_api_url,
        proxy_host,
        proxy_port,
        search_url,
        search_recency,
        scrape_poll_interval_secs,
        scrape_timeout_secs,
        request_timeout_secs,
        llm_provider,
        llm_temperature,
        groq,
        ollama,
        log_level,
    })
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
