use std::str::FromStr;

use anyhow::Context;
use chrono::{DateTime, Utc};
use entity::prompt_analysis::TaskType;
use sea_orm::{
    ActiveModelTrait, ActiveValue, DatabaseConnection, EntityTrait,
    QueryOrder, QuerySelect,
};
use uuid::Uuid;

use crate::active_models::{prelude::*, *};
use entity::prelude::*;

#[derive(Clone, Debug)]
pub struct PromptAnalysisRepository {
    db: DatabaseConnection,
}

impl PromptAnalysisRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

impl TryFrom<prompt_analysis::Model> for PromptAnalysisEntity {
    type Error = anyhow::Error;

    fn try_from(value: prompt_analysis::Model) -> anyhow::Result<Self> {
        Ok(Self {
            task_type: TaskType::from_str(&value.task_type).with_context(
                || format!("unknown task type: {}", value.task_type),
            )?,
            analysis: AnalysisEntity {
                score: value.score,
                metrics: serde_json::from_str(&value.metrics)
                    .context("failed to parse metrics")?,
                strengths: serde_json::from_str(&value.strengths)
                    .context("failed to parse strengths")?,
                corrections: serde_json::from_str(&value.corrections)
                    .context("failed to parse corrections")?,
                enhanced_prompt: value.enhanced_prompt,
            },
            id: value.id,
            original_prompt: value.original_prompt,
            context: value.context,
            created_at: value.created_at.and_utc(),
        })
    }
}

impl TryFrom<PromptAnalysisEntity> for prompt_analysis::ActiveModel {
    type Error = anyhow::Error;

    fn try_from(value: PromptAnalysisEntity) -> anyhow::Result<Self> {
        let analysis = value.analysis;

        Ok(Self {
            id: if value.id.is_empty() {
                ActiveValue::Set(Uuid::new_v4().to_string())
            } else {
                ActiveValue::Set(value.id)
            },
            original_prompt: ActiveValue::Set(value.original_prompt),
            enhanced_prompt: ActiveValue::Set(analysis.enhanced_prompt),
            score: ActiveValue::Set(analysis.score),
            task_type: ActiveValue::Set(value.task_type.to_string()),
            metrics: ActiveValue::Set(
                serde_json::to_string(&analysis.metrics)
                    .context("failed to serialize metrics")?,
            ),
            strengths: ActiveValue::Set(
                serde_json::to_string(&analysis.strengths)
                    .context("failed to serialize strengths")?,
            ),
            corrections: ActiveValue::Set(
                serde_json::to_string(&analysis.corrections)
                    .context("failed to serialize corrections")?,
            ),
            context: ActiveValue::Set(value.context),
            created_at: if value.created_at == DateTime::<Utc>::default() {
                ActiveValue::Set(Utc::now().naive_utc())
            } else {
                ActiveValue::Set(value.created_at.naive_utc())
            },
        })
    }
}

impl PromptAnalysisRepository {
    /// Newest first.
    pub async fn find(
        &self,
        offset: u64,
        limit: u64,
    ) -> anyhow::Result<Vec<PromptAnalysisEntity>> {
        let analyses = PromptAnalysis::find()
            .order_by_desc(prompt_analysis::Column::CreatedAt)
            .order_by_desc(prompt_analysis::Column::Id)
            .limit(limit)
            .offset(offset)
            .all(&self.db)
            .await?;

        analyses
            .into_iter()
            .map(PromptAnalysisEntity::try_from)
            .collect()
    }

    pub async fn find_by_id(
        &self,
        id: &str,
    ) -> anyhow::Result<Option<PromptAnalysisEntity>> {
        let analysis = PromptAnalysis::find_by_id(id.to_string())
            .one(&self.db)
            .await?;

        analysis.map(PromptAnalysisEntity::try_from).transpose()
    }

    /// Inserts a new record and returns it with its id and timestamp.
    pub async fn save(
        &self,
        analysis: PromptAnalysisEntity,
    ) -> anyhow::Result<PromptAnalysisEntity> {
        let model = prompt_analysis::ActiveModel::try_from(analysis)?
            .insert(&self.db)
            .await?;

        PromptAnalysisEntity::try_from(model)
    }

    /// Returns `false` when no record had this id.
    pub async fn delete(&self, id: &str) -> anyhow::Result<bool> {
        let result = PromptAnalysis::delete_by_id(id.to_string())
            .exec(&self.db)
            .await?;

        Ok(result.rows_affected > 0)
    }
}
