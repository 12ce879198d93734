//! The generator abstraction and pipeline entry point.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chronicle_config::{Backend, Credentials, ProviderConfig};
use chronicle_llm::{OpenAiConfig, create_shared_backend};

use crate::content::{ContentRow, GroupedContent, group_rows};
use crate::huggingface::HuggingFaceGenerator;
use crate::openai::OpenAiGenerator;
use crate::record::{SummaryRecord, TimelineData};
use crate::template::TimelineTemplate;
use crate::Result;

/// Summarizes grouped content and assembles it into a timeline.
#[async_trait]
pub trait TimelineGenerator: Send + Sync {
    /// Generator name for logging.
    fn name(&self) -> &str;

    /// Summarize each date group, one request per group, in ascending date order.
    async fn summarize(&self, grouped: &GroupedContent, topic: &str)
    -> Result<Vec<SummaryRecord>>;

    /// Assemble summary records into this generator's output shape.
    fn assemble(&self, records: &[SummaryRecord], topic: &str) -> Result<TimelineData>;
}

/// Shared generator handle.
pub type SharedGenerator = Arc<dyn TimelineGenerator>;

/// Build the generator for a backend.
///
/// Provider settings override the endpoint, model and timeout. The credential
/// is taken from `credentials`; a missing one is a configuration error.
pub fn build_generator(
    backend: Backend,
    provider: &ProviderConfig,
    credentials: &Credentials,
    template: TimelineTemplate,
) -> Result<SharedGenerator> {
    let key = credentials.for_backend(backend)?;

    let mut config = match backend {
        Backend::HuggingFace => OpenAiConfig::huggingface(key),
        Backend::OpenAi => OpenAiConfig::openai(key),
    };
    if let Some(ref url) = provider.base_url {
        config = config.with_base_url(url);
    }
    if let Some(secs) = provider.timeout_secs {
        config = config.with_timeout(Duration::from_secs(secs));
    }

    let llm = create_shared_backend(config)?;

    let generator: SharedGenerator = match backend {
        Backend::HuggingFace => {
            let mut generator = HuggingFaceGenerator::new(llm);
            if let Some(ref model) = provider.model {
                generator = generator.with_model(model);
            }
            Arc::new(generator)
        }
        Backend::OpenAi => {
            let mut generator = OpenAiGenerator::new(llm, template);
            if let Some(ref model) = provider.model {
                generator = generator.with_model(model);
            }
            Arc::new(generator)
        }
    };

    tracing::debug!(generator = generator.name(), "built timeline generator");
    Ok(generator)
}

/// Run the full pipeline: group rows, summarize per date, assemble.
pub async fn generate_timeline(
    generator: &dyn TimelineGenerator,
    rows: &[ContentRow],
    topic: &str,
) -> Result<TimelineData> {
    let grouped = group_rows(rows)?;
    tracing::info!(
        generator = generator.name(),
        topic,
        rows = rows.len(),
        dates = grouped.len(),
        "generating timeline"
    );

    let records = generator.summarize(&grouped, topic).await?;
    if records.is_empty() && !grouped.is_empty() {
        tracing::warn!(
            generator = generator.name(),
            "no summaries produced; the timeline will be empty"
        );
    }

    generator.assemble(&records, topic)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::TimelineError;
    use chronicle_config::ConfigError;

    #[test]
    fn test_build_generator_requires_credential() {
        let template = TimelineTemplate::bundled().unwrap();
        let result = build_generator(
            Backend::OpenAi,
            &ProviderConfig::default(),
            &Credentials::default(),
            template,
        );
        assert!(matches!(
            result,
            Err(TimelineError::Config(ConfigError::MissingCredential { .. }))
        ));
    }

    #[test]
    fn test_build_generator_selects_variant() {
        let credentials = Credentials {
            huggingface_token: Some("hf_test".to_string()),
            openai_api_key: Some("sk-test".to_string()),
        };
        let template = TimelineTemplate::bundled().unwrap();

        let hf = build_generator(
            Backend::HuggingFace,
            &ProviderConfig::default(),
            &credentials,
            template.clone(),
        )
        .unwrap();
        assert_eq!(hf.name(), "huggingface");

        let openai = build_generator(
            Backend::OpenAi,
            &ProviderConfig::default(),
            &credentials,
            template,
        )
        .unwrap();
        assert_eq!(openai.name(), "openai");
    }
}
