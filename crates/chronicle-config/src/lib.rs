//! Configuration system for Chronicle.
//!
//! Provides TOML-based configuration with:
//! - Backend selection (`[generator] backend = "huggingface" | "openai"`)
//! - Per-provider settings (`[huggingface]`, `[openai]`)
//! - Config file layering (XDG user config + project-local overrides)
//! - Credential resolution (env var → config file) into an explicit
//!   [`Credentials`] value handed to the generators at construction

pub mod discovery;
pub mod error;
pub mod secrets;
pub mod types;

pub use discovery::{ConfigSource, LoadedConfig, load_config, load_config_file, xdg_config_dir};
pub use error::{ConfigError, Result};
pub use secrets::{Credentials, ResolvedSecret, SecretSource, resolve_api_key};
pub use types::*;
