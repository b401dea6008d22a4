use sea_orm_migration::prelude::*;

use crate::m20251012_083015_create_prompt_analyses_table::PromptAnalyses;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_index(
                Index::create()
                    .table(PromptAnalyses::Table)
                    .name("idx_prompt_analyses_created_at")
                    .col(PromptAnalyses::CreatedAt)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .table(PromptAnalyses::Table)
                    .name("idx_prompt_analyses_created_at")
                    .to_owned(),
            )
            .await
    }
}
