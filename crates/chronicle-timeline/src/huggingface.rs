//! Sentence-style generator backed by a Mistral model on the Hugging Face router.
//!
//! Each date group becomes three sentences separated by `<br>` markers. Any
//! provider failure abandons the whole run: the failure is logged and an
//! empty record list is returned, discarding summaries already produced.

use async_trait::async_trait;
use chronicle_llm::{CompletionRequest, Message, SharedBackend};

use crate::content::GroupedContent;
use crate::date::parse_date_token;
use crate::generator::TimelineGenerator;
use crate::normalize::normalize_summary;
use crate::record::{SummaryRecord, TimelineData, TimelineEntry};
use crate::Result;

/// Default model on the Hugging Face router.
pub const DEFAULT_MODEL: &str = "mistralai/mistral-7b-instruct";

/// Build the summarization prompt for one date group.
pub fn build_prompt(topic: &str, content: &str) -> String {
    format!(
        "Summarize the following content that's DIRECTLY related to {topic} into 3 full \
         sentences ONLY and nothing else. Be concise and focus on the fact. Make sure the \
         summarization is connected to the {topic}. Add html line break \"<br>\" between each \
         sentence, Return as 1. <br> 2. <br> 3. <br> \n [Content] {content} [Result] "
    )
}

/// Three-sentence summaries, assembled as a flat entry list.
pub struct HuggingFaceGenerator {
    backend: SharedBackend,
    model: String,
}

impl HuggingFaceGenerator {
    pub fn new(backend: SharedBackend) -> Self {
        Self {
            backend,
            model: DEFAULT_MODEL.to_string(),
        }
    }

    /// Use a different model.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }
}

#[async_trait]
impl TimelineGenerator for HuggingFaceGenerator {
    fn name(&self) -> &str {
        "huggingface"
    }

    async fn summarize(
        &self,
        grouped: &GroupedContent,
        topic: &str,
    ) -> Result<Vec<SummaryRecord>> {
        let mut records = Vec::with_capacity(grouped.len());

        for (token, content) in grouped.iter() {
            let date = parse_date_token(token)?;
            let request = CompletionRequest::new(
                &self.model,
                vec![Message::user(build_prompt(topic, content))],
            );

            let response = match self.backend.complete(request).await {
                Ok(response) => response,
                Err(e) => {
                    tracing::error!(
                        backend = self.backend.name(),
                        date = token,
                        error = %e,
                        "summarization request failed; abandoning timeline"
                    );
                    return Ok(Vec::new());
                }
            };

            let summary = normalize_summary(response.text().trim());
            tracing::debug!(date = token, chars = summary.len(), "summarized date group");
            records.push(SummaryRecord::new(date, summary));
        }

        Ok(records)
    }

    fn assemble(&self, records: &[SummaryRecord], _topic: &str) -> Result<TimelineData> {
        Ok(TimelineData::Entries(
            records.iter().map(TimelineEntry::from).collect(),
        ))
    }
}
