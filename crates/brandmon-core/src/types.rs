use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// A raw record returned by the scraping provider.
///
/// The key set is defined by each platform's dataset and is not validated.
pub type RawRecord = serde_json::Map<String, serde_json::Value>;

/// One organic search hit: the only two fields the pipeline relies on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchHit {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub link: String,
}

/// The social platforms monitored by a run, in classification order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    LinkedIn,
    Instagram,
    YouTube,
    X,
}

impl Platform {
    /// All platforms, in the order their URL predicates are tested.
    pub const ALL: [Platform; 4] = [
        Platform::LinkedIn,
        Platform::Instagram,
        Platform::YouTube,
        Platform::X,
    ];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Platform::LinkedIn => "linkedin",
            Platform::Instagram => "instagram",
            Platform::YouTube => "youtube",
            Platform::X => "x",
        }
    }

    /// Human-readable name used in reports and prompts.
    #[must_use]
    pub fn display_name(self) -> &'static str {
        match self {
            Platform::LinkedIn => "LinkedIn",
            Platform::Instagram => "Instagram",
            Platform::YouTube => "YouTube",
            Platform::X => "X/Twitter",
        }
    }
}

impl std::fmt::Display for Platform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which LLM backend the summarizer talks to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LlmProvider {
    Groq,
    #[default]
    Ollama,
}

impl std::fmt::Display for LlmProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LlmProvider::Groq => write!(f, "groq"),
            LlmProvider::Ollama => write!(f, "ollama"),
        }
    }
}

impl FromStr for LlmProvider {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "groq" => Ok(LlmProvider::Groq),
            "ollama" => Ok(LlmProvider::Ollama),
            other => Err(format!("unknown LLM provider \"{other}\" (expected groq or ollama)")),
        }
    }
}
