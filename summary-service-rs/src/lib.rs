//! Testimonial summaries for survey answers
//!
//! Survey answers are laid out under fixed section headers, wrapped in an
//! editing brief and sent to an OpenAI-compatible chat completion endpoint.

pub mod llm_client;
pub mod prompt;
mod summarizer;

pub use llm_client::{
    CompletionConfig, CompletionError, LLMClient, SamplingParams, TextCompleter, SENTINEL_PREFIX,
};
pub use prompt::{build_survey_text, build_user_prompt, SummaryAnswers, SUMMARY_ANSWER_COUNT, UNANSWERED};
pub use summarizer::Summarizer;
