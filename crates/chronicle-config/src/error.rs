//! Configuration error types.

/// Result type alias for config operations.
pub type Result<T> = std::result::Result<T, ConfigError>;

/// Errors that can occur during configuration loading and resolution.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read a config file.
    #[error("failed to read config file '{path}': {source}")]
    ReadFile {
        path: String,
        source: std::io::Error,
    },

    /// Failed to parse TOML.
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    /// Failed to serialize config.
    #[error("failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),

    /// Backend name not recognised.
    #[error("unknown backend '{0}' (expected 'huggingface' or 'openai')")]
    UnknownBackend(String),

    /// Credential not found through any resolution method.
    #[error(
        "credential not found for backend '{backend}'. Set the {env_var} env var or api_key in the [{section}] config section"
    )]
    MissingCredential {
        backend: String,
        env_var: String,
        section: String,
    },
}
