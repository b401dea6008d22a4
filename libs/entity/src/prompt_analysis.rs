use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Upper bound on `strengths` and `corrections` entries kept per analysis.
pub const MAX_FEEDBACK_ITEMS: usize = 5;

/// One persisted prompt analysis.
///
/// `id` and `created_at` are left at their defaults until the repository
/// stores the record.
#[derive(Debug, Default, PartialEq, Clone)]
pub struct PromptAnalysis {
    pub id: String,
    pub original_prompt: String,
    pub task_type: TaskType,
    pub context: Option<String>,
    pub analysis: Analysis,
    pub created_at: DateTime<Utc>,
}

/// Assessment produced for a prompt by the language model.
#[derive(Debug, Default, PartialEq, Clone)]
pub struct Analysis {
    pub score: f64,
    pub metrics: Metrics,
    pub strengths: Vec<String>,
    pub corrections: Vec<String>,
    pub enhanced_prompt: String,
}

#[derive(
    Debug, Default, PartialEq, Eq, Clone, Serialize, Deserialize, ToSchema,
)]
pub struct Metrics {
    pub clarity: MetricsLevel,
    pub context: MetricsLevel,
    pub specificity: MetricsLevel,
}

#[derive(
    Debug,
    Default,
    PartialEq,
    Eq,
    Clone,
    Copy,
    Serialize,
    Deserialize,
    ToSchema,
)]
pub enum MetricsLevel {
    Low,
    #[default]
    Medium,
    High,
}

#[derive(
    Debug,
    Default,
    PartialEq,
    Eq,
    Clone,
    Copy,
    Serialize,
    Deserialize,
    ToSchema,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum TaskType {
    Coding,
    ContentWriting,
    Research,
    Creative,
    #[default]
    General,
}

#[cfg(test)]
mod test {
    use std::str::FromStr;

    use strum::IntoEnumIterator;

    use super::{MetricsLevel, TaskType};

    #[test]
    fn test_task_type_names_agree() {
        for task_type in TaskType::iter() {
            // Arrange
            let stored = task_type.to_string();

            // Act
            let json = serde_json::to_string(&task_type).unwrap();

            // Assert
            assert_eq!(json, format!("\"{}\"", stored));
            assert_eq!(TaskType::from_str(&stored).unwrap(), task_type);
        }
        assert_eq!(TaskType::ContentWriting.to_string(), "content-writing");
    }

    #[test]
    fn test_metrics_level_is_case_sensitive() {
        assert_eq!(
            serde_json::from_str::<MetricsLevel>("\"High\"").unwrap(),
            MetricsLevel::High
        );
        assert!(serde_json::from_str::<MetricsLevel>("\"high\"").is_err());
        assert!(serde_json::from_str::<MetricsLevel>("\"VeryHigh\"").is_err());
    }
}
