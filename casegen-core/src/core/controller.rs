use crate::config::constants::ui;
use crate::llm::provider::{GenerationError, TextGenerator};
use crate::prompts::PromptTemplate;
use crate::ui::DisplaySink;
use futures::StreamExt;
use std::time::Instant;
use tracing::{debug, info, warn};

/// A requirement as entered in the form
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequirementInput {
    pub identifier: String,
    pub text: String,
}

impl RequirementInput {
    pub fn new(identifier: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            identifier: identifier.into(),
            text: text.into(),
        }
    }

    /// Both fields must be non-empty; nothing else is checked
    pub fn validate(&self) -> Result<(), ValidationError> {
        match (self.identifier.is_empty(), self.text.is_empty()) {
            (false, false) => Ok(()),
            (true, true) => Err(ValidationError::MissingIdentifierAndText),
            (true, false) => Err(ValidationError::MissingIdentifier),
            (false, true) => Err(ValidationError::MissingText),
        }
    }
}

/// Input rejected before any generation call
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("requirement ID is empty")]
    MissingIdentifier,
    #[error("requirement text is empty")]
    MissingText,
    #[error("requirement ID and text are empty")]
    MissingIdentifierAndText,
}

/// Terminal state of one generation attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GenerationOutcome {
    /// The stream ended normally
    Completed { output: String },
    /// Opening or reading the stream failed; `partial` is what was shown before
    Failed {
        partial: String,
        error: GenerationError,
    },
    /// Empty identifier or text, no call was made
    Rejected(ValidationError),
}

impl GenerationOutcome {
    pub fn is_completed(&self) -> bool {
        matches!(self, GenerationOutcome::Completed { .. })
    }

    /// Text rendered during the attempt
    pub fn output(&self) -> &str {
        match self {
            GenerationOutcome::Completed { output } => output,
            GenerationOutcome::Failed { partial, .. } => partial,
            GenerationOutcome::Rejected(_) => "",
        }
    }
}

/// Connects the form, the prompt template and the generator
pub struct InteractionController<G> {
    generator: G,
    template: PromptTemplate,
}

impl<G: TextGenerator> InteractionController<G> {
    pub fn new(generator: G, template: PromptTemplate) -> Self {
        Self {
            generator,
            template,
        }
    }

    pub fn generator(&self) -> &G {
        &self.generator
    }

    pub async fn generate_input(
        &self,
        input: &RequirementInput,
        sink: &mut dyn DisplaySink,
    ) -> GenerationOutcome {
        self.generate(&input.identifier, &input.text, sink).await
    }

    /// Run one generation, re-rendering the full accumulated text after each fragment
    pub async fn generate(
        &self,
        identifier: &str,
        text: &str,
        sink: &mut dyn DisplaySink,
    ) -> GenerationOutcome {
        if let Err(e) = RequirementInput::new(identifier, text).validate() {
            debug!(reason = %e, "requirement rejected");
            sink.error(ui::EMPTY_INPUT_ERROR);
            sink.finish();
            return GenerationOutcome::Rejected(e);
        }

        let prompt = self.template.render(identifier, text);
        debug!(
            provider = self.generator.name(),
            model = self.generator.model(),
            prompt_chars = prompt.chars().count(),
            "starting generation"
        );

        let started = Instant::now();
        let mut output = String::new();

        let mut stream = match self.generator.stream(&prompt).await {
            Ok(stream) => stream,
            Err(error) => return fail(sink, output, error),
        };

        let mut fragments = 0usize;
        while let Some(item) = stream.next().await {
            match item {
                Ok(fragment) => {
                    fragments += 1;
                    if let Some(chunk) = fragment.content() {
                        output.push_str(chunk);
                        sink.render(&output);
                    }
                }
                Err(error) => {
                    debug!(fragments, "stream interrupted");
                    return fail(sink, output, error);
                }
            }
        }

        sink.finish();
        info!(
            fragments,
            output_chars = output.chars().count(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "generation completed"
        );
        GenerationOutcome::Completed { output }
    }
}

fn fail(sink: &mut dyn DisplaySink, partial: String, error: GenerationError) -> GenerationOutcome {
    warn!(error = %error, rendered_chars = partial.len(), "generation failed");
    sink.error(&format!("{}: {error}", ui::GENERATION_ERROR_PREFIX));
    sink.finish();
    GenerationOutcome::Failed { partial, error }
}
