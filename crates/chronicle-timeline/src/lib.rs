//! Date-grouped summarization and timeline assembly.
//!
//! The pipeline turns dated content rows into a timeline:
//!
//! ```text
//! ContentRow ──group_rows──▶ GroupedContent ──summarize──▶ SummaryRecord ──assemble──▶ TimelineData
//! ```
//!
//! Two [`TimelineGenerator`] variants implement the last two steps:
//!
//! - [`HuggingFaceGenerator`] asks a Mistral model for three sentences per
//!   date, normalizes the `<br>` layout and returns a flat entry list.
//! - [`OpenAiGenerator`] asks for up to four bullet points (or `NA`), drops
//!   irrelevant dates and fills a TimelineJS document from a template.

pub mod content;
pub mod date;
pub mod error;
pub mod generator;
pub mod huggingface;
pub mod normalize;
pub mod openai;
pub mod record;
pub mod template;

pub use content::{ContentRow, GroupedContent, SEGMENT_DELIMITER, group_rows, parse_rows};
pub use date::{format_date, parse_date_token};
pub use error::{Result, TimelineError};
pub use generator::{SharedGenerator, TimelineGenerator, build_generator, generate_timeline};
pub use huggingface::HuggingFaceGenerator;
pub use normalize::{LINE_BREAK, SEGMENT_SEPARATOR, normalize_summary};
pub use openai::OpenAiGenerator;
pub use record::{EventText, StartDate, SummaryRecord, TimelineData, TimelineEntry, TimelineEvent};
pub use template::{TimelineDocument, TimelineTemplate};
