//! Credential resolution.
//!
//! Resolution order:
//! 1. Environment variable (`HUGGINGFACE_TOKEN`, `OPENAI_API_KEY`)
//! 2. Config file (with warning)
//!
//! The result is an explicit [`Credentials`] value that callers pass to the
//! generator they build; nothing downstream reads the environment.

use crate::{Backend, ChronicleConfig, ConfigError, Result};

/// Result of credential resolution with provenance.
#[derive(Clone, PartialEq, Eq)]
pub struct ResolvedSecret {
    /// The secret value.
    pub value: String,
    /// Where the secret was found.
    pub source: SecretSource,
}

impl std::fmt::Debug for ResolvedSecret {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResolvedSecret")
            .field("value", &mask(&self.value))
            .field("source", &self.source)
            .finish()
    }
}

/// Where a secret was resolved from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SecretSource {
    /// Environment variable.
    EnvVar(String),
    /// Config file (plaintext — not recommended).
    ConfigFile,
}

impl std::fmt::Display for SecretSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SecretSource::EnvVar(var) => write!(f, "env var {}", var),
            SecretSource::ConfigFile => write!(f, "config file (plaintext)"),
        }
    }
}

/// Resolve a credential for a backend from the process environment,
/// falling back to the config file value.
pub fn resolve_api_key(backend: Backend, config_value: Option<&str>) -> Option<ResolvedSecret> {
    resolve_api_key_with(backend, config_value, |var| std::env::var(var).ok())
}

/// Resolve a credential using a custom environment lookup.
pub fn resolve_api_key_with<F>(
    backend: Backend,
    config_value: Option<&str>,
    lookup_env: F,
) -> Option<ResolvedSecret>
where
    F: Fn(&str) -> Option<String>,
{
    let env_var = backend.env_var();
    if let Some(value) = lookup_env(env_var)
        && !value.is_empty()
    {
        return Some(ResolvedSecret {
            value,
            source: SecretSource::EnvVar(env_var.to_string()),
        });
    }

    config_value
        .filter(|v| !v.is_empty())
        .map(|v| ResolvedSecret {
            value: v.to_string(),
            source: SecretSource::ConfigFile,
        })
}

/// Mask a secret for display, keeping a short prefix.
pub fn mask(secret: &str) -> String {
    let prefix: String = secret.chars().take(4).collect();
    if secret.chars().count() <= 4 {
        "****".to_string()
    } else {
        format!("{}****", prefix)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Credentials
// ─────────────────────────────────────────────────────────────────────────────

/// Credentials for every summarization backend.
///
/// Built once (usually by [`Credentials::resolve`]) and injected into the
/// generator at construction.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Credentials {
    /// Bearer token for the Hugging Face inference router.
    pub huggingface_token: Option<String>,
    /// API key for OpenAI.
    pub openai_api_key: Option<String>,
}

impl Credentials {
    /// Resolve credentials for all backends from env vars and the config.
    pub fn resolve(config: &ChronicleConfig) -> Self {
        Self::resolve_with(config, |var| std::env::var(var).ok())
    }

    /// Resolve credentials using a custom environment lookup.
    pub fn resolve_with<F>(config: &ChronicleConfig, lookup_env: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let resolve = |backend: Backend| {
            let provider = config.provider(backend);
            resolve_api_key_with(backend, provider.api_key.as_deref(), &lookup_env)
                .map(|s| s.value)
        };

        Self {
            huggingface_token: resolve(Backend::HuggingFace),
            openai_api_key: resolve(Backend::OpenAi),
        }
    }

    /// The credential for a backend, or an error naming where to set it.
    pub fn for_backend(&self, backend: Backend) -> Result<&str> {
        let value = match backend {
            Backend::HuggingFace => self.huggingface_token.as_deref(),
            Backend::OpenAi => self.openai_api_key.as_deref(),
        };
        value.ok_or_else(|| ConfigError::MissingCredential {
            backend: backend.to_string(),
            env_var: backend.env_var().to_string(),
            section: backend.section().to_string(),
        })
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("huggingface_token", &self.huggingface_token.as_deref().map(mask))
            .field("openai_api_key", &self.openai_api_key.as_deref().map(mask))
            .finish()
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn no_env(_: &str) -> Option<String> {
        None
    }

    #[test]
    fn test_resolve_from_env_first() {
        let resolved = resolve_api_key_with(Backend::OpenAi, Some("from-config"), |var| {
            (var == "OPENAI_API_KEY").then(|| "from-env".to_string())
        })
        .unwrap();
        assert_eq!(resolved.value, "from-env");
        assert_eq!(
            resolved.source,
            SecretSource::EnvVar("OPENAI_API_KEY".to_string())
        );
    }

    #[test]
    fn test_resolve_from_config_value() {
        let resolved = resolve_api_key_with(Backend::HuggingFace, Some("hf_abc"), no_env).unwrap();
        assert_eq!(resolved.value, "hf_abc");
        assert_eq!(resolved.source, SecretSource::ConfigFile);
    }

    #[test]
    fn test_empty_values_ignored() {
        let resolved =
            resolve_api_key_with(Backend::HuggingFace, Some(""), |_| Some(String::new()));
        assert!(resolved.is_none());
    }

    #[test]
    fn test_secret_source_display() {
        assert_eq!(
            SecretSource::EnvVar("OPENAI_API_KEY".to_string()).to_string(),
            "env var OPENAI_API_KEY"
        );
        assert_eq!(
            SecretSource::ConfigFile.to_string(),
            "config file (plaintext)"
        );
    }

    #[test]
    fn test_credentials_resolve() {
        let config = ChronicleConfig::from_toml("[openai]\napi_key = \"sk-config\"\n").unwrap();
        let credentials = Credentials::resolve_with(&config, |var| {
            (var == "HUGGINGFACE_TOKEN").then(|| "hf_env".to_string())
        });

        assert_eq!(credentials.for_backend(Backend::HuggingFace).unwrap(), "hf_env");
        assert_eq!(credentials.for_backend(Backend::OpenAi).unwrap(), "sk-config");
    }

    #[test]
    fn test_missing_credential() {
        let credentials = Credentials::default();
        let err = credentials.for_backend(Backend::OpenAi).unwrap_err();
        assert!(matches!(err, ConfigError::MissingCredential { .. }));
        assert!(err.to_string().contains("OPENAI_API_KEY"));
        assert!(err.to_string().contains("[openai]"));
    }

    #[test]
    fn test_debug_masks_secrets() {
        let credentials = Credentials {
            huggingface_token: Some("hf_supersecret".to_string()),
            openai_api_key: None,
        };
        let debug = format!("{:?}", credentials);
        assert!(debug.contains("hf_s****"));
        assert!(!debug.contains("supersecret"));
    }

    #[test]
    fn test_mask_short_secret() {
        assert_eq!(mask("abc"), "****");
        assert_eq!(mask("abcdefgh"), "abcd****");
    }
}
