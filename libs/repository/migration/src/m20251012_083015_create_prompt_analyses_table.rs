use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(PromptAnalyses::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(PromptAnalyses::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(PromptAnalyses::OriginalPrompt)
                            .text()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(PromptAnalyses::EnhancedPrompt)
                            .text()
                            .not_null(),
                    )
                    .col(ColumnDef::new(PromptAnalyses::Score).double().not_null())
                    .col(
                        ColumnDef::new(PromptAnalyses::TaskType)
                            .string()
                            .not_null(),
                    )
                    .col(ColumnDef::new(PromptAnalyses::Metrics).text().not_null())
                    .col(
                        ColumnDef::new(PromptAnalyses::Strengths)
                            .text()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(PromptAnalyses::Corrections)
                            .text()
                            .not_null(),
                    )
                    .col(ColumnDef::new(PromptAnalyses::Context).text().null())
                    .col(
                        ColumnDef::new(PromptAnalyses::CreatedAt)
                            .date_time()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(PromptAnalyses::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum PromptAnalyses {
    Table,
    Id,
    OriginalPrompt,
    EnhancedPrompt,
    Score,
    TaskType,
    Metrics,
    Strengths,
    Corrections,
    Context,
    CreatedAt,
}
