pub mod prompt_analysis;

pub mod prelude {
    pub use crate::prompt_analysis::Analysis as AnalysisEntity;
    pub use crate::prompt_analysis::PromptAnalysis as PromptAnalysisEntity;
}
