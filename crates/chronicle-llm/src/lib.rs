//! Chat-completion client abstraction for Chronicle.
//!
//! The timeline generators talk to remote models through the [`LlmBackend`]
//! trait. One HTTP implementation covers every OpenAI-compatible endpoint
//! (OpenAI itself and the Hugging Face inference router); [`MockBackend`]
//! replays canned replies for tests.
//!
//! ```text
//! ┌─────────────────────────────────────┐
//! │  LlmBackend trait                   │
//! │  - complete() -> CompletionResponse │
//! └─────────────────────────────────────┘
//!                 │
//!        ┌────────┴────────┐
//!        ▼                 ▼
//!  ┌───────────────┐ ┌─────────────┐
//!  │ OpenAiBackend │ │ MockBackend │
//!  └───────────────┘ └─────────────┘
//! ```

pub mod backend;
pub mod error;
pub mod openai;
pub mod types;

pub use backend::{LlmBackend, MockBackend, MockResponse, SharedBackend};
pub use error::{LlmError, Result};
pub use openai::{OpenAiBackend, OpenAiConfig, create_shared_backend};
pub use types::{CompletionRequest, CompletionResponse, Message, Role, Usage};
