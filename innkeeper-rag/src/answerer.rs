//! Answer component: prompt construction + one generation call
//!
//! The public operation never fails past this boundary: a generation
//! error becomes a displayable `"An error occurred: {e}"` answer so the
//! QA flow always has something to show. The success/failure distinction
//! stays available on [`Answer::outcome`] for logging.

use crate::generate::TextGenerator;
use crate::prompt::build_prompt;
use std::sync::Arc;

/// Whether the answer text came from the model or describes a failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnswerOutcome {
    /// The model returned a completion
    Answered,
    /// Generation failed; the answer text describes the failure
    GenerationFailed,
}

/// A displayable answer, tagged with how it was produced.
#[derive(Debug, Clone)]
pub struct Answer {
    /// Text to show the user, always present
    pub text: String,
    /// Internal success/failure tag
    pub outcome: AnswerOutcome,
}

impl Answer {
    /// Whether this answer came from a successful generation call.
    pub fn is_answered(&self) -> bool {
        self.outcome == AnswerOutcome::Answered
    }
}

/// Produces an answer for a (context, question) pair.
///
/// Holds the generation client for the process lifetime. Each call is
/// stateless and independent: one prompt in, one completion out, no
/// conversation memory, no retries, no streaming.
pub struct Answerer {
    generator: Arc<dyn TextGenerator>,
}

impl std::fmt::Debug for Answerer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Answerer")
            .field("model", &self.generator.model_name())
            .finish()
    }
}

impl Answerer {
    /// Create an answerer over the given generation client.
    pub fn new(generator: Arc<dyn TextGenerator>) -> Self {
        Self { generator }
    }

    /// Answer `question` grounded on `context`.
    ///
    /// An empty context still invokes generation; the model decides what
    /// to say about missing evidence. There is no local short-circuit.
    pub async fn answer(&self, context: &str, question: &str) -> Answer {
        let prompt = build_prompt(context, question);

        match self.generator.generate(&prompt).await {
            Ok(text) => Answer {
                text,
                outcome: AnswerOutcome::Answered,
            },
            Err(error) => {
                tracing::warn!(%error, model = self.generator.model_name(), "generation failed");
                Answer {
                    text: format!("An error occurred: {error}"),
                    outcome: AnswerOutcome::GenerationFailed,
                }
            }
        }
    }
}
