//! Configuration types mapping to the TOML schema.
//!
//! ```toml
//! [generator]
//! backend = "huggingface"          # or "openai"
//! template = "timeline_template.json"
//!
//! [huggingface]
//! model = "mistralai/mistral-7b-instruct"
//!
//! [openai]
//! model = "gpt-4o-mini"
//! timeout_secs = 60
//! ```

use std::path::PathBuf;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::ConfigError;

// ─────────────────────────────────────────────────────────────────────────────
// Top-level Config
// ─────────────────────────────────────────────────────────────────────────────

/// Root configuration structure.
///
/// All sections are optional so that partial configs (e.g. project-local
/// overrides) can be loaded and merged.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChronicleConfig {
    /// Which generator to build and where its template lives.
    pub generator: Option<GeneratorConfig>,

    /// Hugging Face router settings.
    pub huggingface: Option<ProviderConfig>,

    /// OpenAI settings.
    pub openai: Option<ProviderConfig>,
}

impl ChronicleConfig {
    /// Create an empty config.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse from a TOML string.
    pub fn from_toml(toml_str: &str) -> crate::Result<Self> {
        Ok(toml::from_str(toml_str)?)
    }

    /// Serialize to a TOML string.
    pub fn to_toml(&self) -> crate::Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// A copy with plaintext API keys masked, for display.
    pub fn redacted(&self) -> Self {
        let redact = |section: &Option<ProviderConfig>| {
            section.clone().map(|mut p| {
                p.api_key = p.api_key.as_deref().map(crate::secrets::mask);
                p
            })
        };
        Self {
            generator: self.generator.clone(),
            huggingface: redact(&self.huggingface),
            openai: redact(&self.openai),
        }
    }

    /// Merge another config on top of this one (other takes priority).
    pub fn merge(&mut self, other: ChronicleConfig) {
        if other.generator.is_some() {
            self.generator = other.generator;
        }

        if other.huggingface.is_some() {
            self.huggingface = other.huggingface;
        }

        if other.openai.is_some() {
            self.openai = other.openai;
        }
    }

    /// The configured backend, falling back to [`Backend::default`].
    pub fn backend(&self) -> Backend {
        self.generator
            .as_ref()
            .and_then(|g| g.backend)
            .unwrap_or_default()
    }

    /// Path of the timeline template, if one is configured.
    pub fn template_path(&self) -> Option<&PathBuf> {
        self.generator.as_ref().and_then(|g| g.template.as_ref())
    }

    /// Settings for a backend (empty defaults when the section is absent).
    pub fn provider(&self, backend: Backend) -> ProviderConfig {
        let section = match backend {
            Backend::HuggingFace => &self.huggingface,
            Backend::OpenAi => &self.openai,
        };
        section.clone().unwrap_or_default()
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Generator Configuration
// ─────────────────────────────────────────────────────────────────────────────

/// The `[generator]` section.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Summarization backend to use.
    pub backend: Option<Backend>,
    /// Path of the TimelineJS template JSON. The bundled template is used when unset.
    pub template: Option<PathBuf>,
}

/// Summarization backend.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Backend {
    /// Mistral instruct model behind the Hugging Face inference router.
    #[default]
    #[serde(rename = "huggingface")]
    HuggingFace,
    /// OpenAI chat completions.
    #[serde(rename = "openai")]
    OpenAi,
}

impl Backend {
    /// Environment variable name for this backend's credential.
    pub fn env_var(&self) -> &'static str {
        match self {
            Backend::HuggingFace => "HUGGINGFACE_TOKEN",
            Backend::OpenAi => "OPENAI_API_KEY",
        }
    }

    /// Config section holding this backend's settings.
    pub fn section(&self) -> &'static str {
        match self {
            Backend::HuggingFace => "huggingface",
            Backend::OpenAi => "openai",
        }
    }

    /// Human-readable name.
    pub fn display_name(&self) -> &'static str {
        match self {
            Backend::HuggingFace => "Hugging Face",
            Backend::OpenAi => "OpenAI",
        }
    }
}

impl std::fmt::Display for Backend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.display_name())
    }
}

impl FromStr for Backend {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "huggingface" | "hf" => Ok(Backend::HuggingFace),
            "openai" => Ok(Backend::OpenAi),
            other => Err(ConfigError::UnknownBackend(other.to_string())),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Provider Configuration
// ─────────────────────────────────────────────────────────────────────────────

/// Per-provider settings (`[huggingface]`, `[openai]`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProviderConfig {
    /// Override the API base URL.
    pub base_url: Option<String>,
    /// Override the model.
    pub model: Option<String>,
    /// Plaintext credential (prefer the env var).
    pub api_key: Option<String>,
    /// Request timeout in seconds.
    pub timeout_secs: Option<u64>,
}

impl ProviderConfig {
    /// Returns true if the section carries a credential in plaintext.
    pub fn has_plaintext_api_key(&self) -> bool {
        self.api_key.as_deref().is_some_and(|k| !k.is_empty())
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
