use std::sync::Arc;

use crate::llm_client::{CompletionError, TextCompleter};
use crate::prompt::{build_survey_text, build_user_prompt, SummaryAnswers, SUMMARY_ANSWER_COUNT, SYSTEM_PROMPT};

/// Turns survey answers into a short testimonial
#[derive(Clone)]
pub struct Summarizer {
    completer: Arc<dyn TextCompleter>,
}

impl Summarizer {
    pub fn new(completer: Arc<dyn TextCompleter>) -> Self {
        Self { completer }
    }

    /// Summarize answers posted over HTTP; blanks render as the placeholder
    pub async fn summarize_answers(&self, answers: &SummaryAnswers) -> Result<String, CompletionError> {
        self.summarize_text(&answers.survey_text()).await
    }

    /// Summarize raw cell values, blanks left as they are
    pub async fn summarize_raw(&self, answers: [&str; SUMMARY_ANSWER_COUNT]) -> Result<String, CompletionError> {
        self.summarize_text(&build_survey_text(answers)).await
    }

    /// Summarize an already assembled survey text
    pub async fn summarize_text(&self, survey_text: &str) -> Result<String, CompletionError> {
        log::debug!("Survey text to summarize:\n{}", survey_text);
        let user_prompt = build_user_prompt(survey_text);
        self.completer.complete(SYSTEM_PROMPT, &user_prompt).await
    }
}
