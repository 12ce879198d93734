//! Bullet-point generator backed by OpenAI chat completions.
//!
//! Each date group becomes at most four bullet points, or the literal `NA`
//! when the content is unrelated to the topic. `NA` dates are left off the
//! timeline. Records are assembled into a TimelineJS document built from a
//! template.

use async_trait::async_trait;
use chronicle_llm::{CompletionRequest, Message, SharedBackend};

use crate::content::GroupedContent;
use crate::date::parse_date_token;
use crate::generator::TimelineGenerator;
use crate::record::{SummaryRecord, TimelineData, TimelineEvent};
use crate::template::TimelineTemplate;
use crate::Result;

/// Default OpenAI model.
pub const DEFAULT_MODEL: &str = "gpt-4o-mini";

/// Reply meaning "nothing here is about the topic".
pub const IRRELEVANT_SENTINEL: &str = "NA";

/// The bullet-point instruction for a topic.
pub fn bullet_query(topic: &str) -> String {
    format!(
        "Please summarize the content that is directly related to '{topic}' into at most 4 \
         straightforward bullet points. If the content is not really related to '{topic}', \
         please return NA. These content are podcast news transcripts. Add <br> between each \
         bullet point. Be concise, do not return irrelevant explanations"
    )
}

/// The system instruction for a topic.
pub fn system_instruction(topic: &str) -> String {
    format!("summarize the content related to '{topic}' into bullet points")
}

/// Timeline title for a topic.
pub fn timeline_title(topic: &str) -> String {
    format!("Timeline of events: {topic}")
}

/// Build the message list for one request: prior conversation, then the
/// instruction with its context as a single user message.
pub fn prepare_messages(query: &str, context: &str, conversation: &[Message]) -> Vec<Message> {
    let mut messages = Vec::with_capacity(conversation.len() + 1);
    messages.extend_from_slice(conversation);
    messages.push(Message::user(format!(
        "Follow this instruction: '{query}' with this provided context: {context}"
    )));
    messages
}

/// Returns true if a reply marks the content as unrelated to the topic.
///
/// Surrounding whitespace is ignored, so a padded `" NA\n"` also counts.
pub fn is_irrelevant(reply: &str) -> bool {
    reply.trim() == IRRELEVANT_SENTINEL
}

/// Bullet-point summaries, assembled as a TimelineJS document.
pub struct OpenAiGenerator {
    backend: SharedBackend,
    model: String,
    template: TimelineTemplate,
    conversation: Vec<Message>,
}

impl OpenAiGenerator {
    pub fn new(backend: SharedBackend, template: TimelineTemplate) -> Self {
        Self {
            backend,
            model: DEFAULT_MODEL.to_string(),
            template,
            conversation: Vec::new(),
        }
    }

    /// Use a different model.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Prepend prior turns to every request.
    pub fn with_conversation(mut self, conversation: Vec<Message>) -> Self {
        self.conversation = conversation;
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn template(&self) -> &TimelineTemplate {
        &self.template
    }

    fn request(&self, topic: &str, context: &str) -> CompletionRequest {
        let messages = prepare_messages(&bullet_query(topic), context, &self.conversation);
        CompletionRequest::new(&self.model, messages).with_system(system_instruction(topic))
    }
}

#[async_trait]
impl TimelineGenerator for OpenAiGenerator {
    fn name(&self) -> &str {
        "openai"
    }

    async fn summarize(
        &self,
        grouped: &GroupedContent,
        topic: &str,
    ) -> Result<Vec<SummaryRecord>> {
        let mut records = Vec::with_capacity(grouped.len());

        for (token, content) in grouped.iter() {
            let date = parse_date_token(token)?;
            let response = self.backend.complete(self.request(topic, content)).await?;
            let reply = response.text();

            if is_irrelevant(reply) {
                tracing::debug!(date = token, "content unrelated to topic, skipping date");
                continue;
            }

            tracing::debug!(date = token, chars = reply.len(), "summarized date group");
            records.push(SummaryRecord::new(date, reply));
        }

        Ok(records)
    }

    fn assemble(&self, records: &[SummaryRecord], topic: &str) -> Result<TimelineData> {
        let events: Vec<TimelineEvent> = records.iter().map(TimelineEvent::from).collect();
        let document = self.template.document(&timeline_title(topic), &events)?;
        Ok(TimelineData::Document(document))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::{ContentRow, group_rows};
    use crate::TimelineError;
    use chronicle_llm::{LlmError, MockBackend, MockResponse, Role};
    use std::sync::Arc;

    fn grouped(rows: &[(&str, &str)]) -> GroupedContent {
        let rows: Vec<_> = rows.iter().map(|(d, c)| ContentRow::new(*d, *c)).collect();
        group_rows(&rows).unwrap()
    }

    fn generator(mock: Arc<MockBackend>) -> OpenAiGenerator {
        OpenAiGenerator::new(mock, TimelineTemplate::bundled().unwrap())
    }

    #[test]
    fn test_prepare_messages_without_history() {
        let messages = prepare_messages("do it", "ctx", &[]);
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].role, Role::User);
        assert_eq!(
            messages[0].content,
            "Follow this instruction: 'do it' with this provided context: ctx"
        );
    }

    #[test]
    fn test_prepare_messages_with_history() {
        let history = vec![Message::user("earlier"), Message::assistant("reply")];
        let messages = prepare_messages("q", "c", &history);
        assert_eq!(messages.len(), 3);
        assert_eq!(messages[0].content, "earlier");
        assert_eq!(messages[1].role, Role::Assistant);
        assert!(messages[2].content.starts_with("Follow this instruction: 'q'"));
    }

    #[test]
    fn test_is_irrelevant() {
        assert!(is_irrelevant("NA"));
        assert!(is_irrelevant("  NA\n"));
        assert!(!is_irrelevant("NA - nothing found"));
        assert!(!is_irrelevant("na"));
    }

    #[tokio::test]
    async fn test_summarize_skips_na() {
        let mock = Arc::new(MockBackend::with_texts([
            "- Budget passed<br>- Vote 7-2",
            "NA",
            "- Follow-up hearing",
        ]));
        let generator = generator(mock.clone());
        let groups = grouped(&[("20240501", "a"), ("20240502", "b"), ("20240503", "c")]);

        let records = generator.summarize(&groups, "budget").await.unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].date.to_string(), "2024-05-01");
        assert_eq!(records[0].content, "- Budget passed<br>- Vote 7-2");
        assert_eq!(records[1].date.to_string(), "2024-05-03");
        assert_eq!(mock.request_count(), 3);
    }

    #[tokio::test]
    async fn test_request_shape() {
        let mock = Arc::new(MockBackend::with_text("- point"));
        let generator = generator(mock.clone())
            .with_model("gpt-4o")
            .with_conversation(vec![Message::assistant("previous")]);
        let groups = grouped(&[("2024-05-01", "the transcript")]);

        generator.summarize(&groups, "housing").await.unwrap();

        let request = &mock.requests()[0];
        assert_eq!(request.model, "gpt-4o");
        assert_eq!(
            request.system.as_deref(),
            Some("summarize the content related to 'housing' into bullet points")
        );
        assert_eq!(request.messages.len(), 2);
        let user = &request.messages[1].content;
        assert!(user.contains("related to 'housing' into at most 4"));
        assert!(user.ends_with("with this provided context: the transcript"));
    }

    #[tokio::test]
    async fn test_failure_propagates() {
        let mock = Arc::new(MockBackend::new(vec![
            MockResponse::text("- ok"),
            MockResponse::failure("HTTP 500: boom"),
        ]));
        let generator = generator(mock);
        let groups = grouped(&[("20240501", "a"), ("20240502", "b")]);

        let err = generator.summarize(&groups, "t").await.unwrap_err();

        assert!(matches!(err, TimelineError::Llm(LlmError::Backend(_))));
    }

    #[tokio::test]
    async fn test_assemble_document() {
        let mock = Arc::new(MockBackend::with_texts(["- one", "- two"]));
        let generator = generator(mock);
        let groups = grouped(&[("20240501", "a"), ("20240502", "b")]);
        let records = generator.summarize(&groups, "rail").await.unwrap();

        let TimelineData::Document(doc) = generator.assemble(&records, "rail").unwrap() else {
            panic!("expected document");
        };

        assert_eq!(doc.title(), Some("Timeline of events: rail"));
        assert_eq!(doc.events().len(), 2);
        let first = &doc.events()[0];
        assert_eq!(first["start_date"]["year"], 2024);
        assert_eq!(first["start_date"]["month"], 5);
        assert_eq!(first["start_date"]["day"], 1);
        assert_eq!(first["start_date"]["second"], 0);
        assert_eq!(first["text"]["headline"], "Events on 2024-05-01");
        assert_eq!(first["text"]["text"], "- one");
    }

    #[test]
    fn test_assemble_leaves_template_untouched() {
        let generator = generator(Arc::new(MockBackend::new(vec![])));
        let before = generator.template().to_value();
        let record = SummaryRecord::new(chrono::NaiveDate::from_ymd_opt(2024, 1, 2).unwrap(), "x");

        generator.assemble(&[record], "first").unwrap();
        let second = generator.assemble(&[], "second").unwrap();

        assert_eq!(generator.template().to_value(), before);
        assert!(second.is_empty());
    }
}
