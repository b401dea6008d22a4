use gemini::models::text_generation::TextGeneration;

pub mod parser;
mod prompt_analysis;

pub use prompt_analysis::PromptAnalysisAgent;

/// A text generation backend the HTTP layer can hold in shared state.
pub trait LanguageModel: TextGeneration + Clone + Send + Sync + 'static {}

impl<T> LanguageModel for T where T: TextGeneration + Clone + Send + Sync + 'static
{}
