use chrono::{DateTime, Utc};
use entity::{
    prelude::*,
    prompt_analysis::{Metrics, TaskType},
};
use serde::Serialize;
use utoipa::ToSchema;

#[derive(Serialize, ToSchema, Debug)]
pub struct AnalysisResponse {
    pub id: String,
    pub original_prompt: String,
    pub task_type: TaskType,
    pub score: f64,
    pub metrics: Metrics,
    pub strengths: Vec<String>,
    pub corrections: Vec<String>,
    pub enhanced_prompt: String,
    pub context: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<PromptAnalysisEntity> for AnalysisResponse {
    fn from(value: PromptAnalysisEntity) -> Self {
        Self {
            id: value.id,
            original_prompt: value.original_prompt,
            task_type: value.task_type,
            score: value.analysis.score,
            metrics: value.analysis.metrics,
            strengths: value.analysis.strengths,
            corrections: value.analysis.corrections,
            enhanced_prompt: value.analysis.enhanced_prompt,
            context: value.context,
            created_at: value.created_at,
        }
    }
}

#[derive(Serialize, ToSchema, Debug)]
pub struct HistoryItem {
    pub id: String,
    pub original_prompt: String,
    pub enhanced_prompt: String,
    pub score: f64,
    pub task_type: TaskType,
    pub created_at: DateTime<Utc>,
}

impl From<PromptAnalysisEntity> for HistoryItem {
    fn from(value: PromptAnalysisEntity) -> Self {
        Self {
            id: value.id,
            original_prompt: value.original_prompt,
            enhanced_prompt: value.analysis.enhanced_prompt,
            score: value.analysis.score,
            task_type: value.task_type,
            created_at: value.created_at,
        }
    }
}

#[derive(Serialize, ToSchema, Debug)]
pub struct DeleteResponse {
    pub message: String,
    pub id: String,
}
