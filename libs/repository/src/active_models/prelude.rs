pub use super::prompt_analysis::Entity as PromptAnalysis;
