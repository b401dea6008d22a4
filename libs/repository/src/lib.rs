use migration::Migrator;
use migration::MigratorTrait;
use prompt_analysis::PromptAnalysisRepository;
use response::IntoResponse;
use sea_orm::{ConnectOptions, Database, DatabaseConnection};

mod active_models;
pub mod prompt_analysis;
mod response;

#[derive(Clone, Debug)]
pub struct Repository {
    pub prompt_analysis: PromptAnalysisRepository,
}

#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error(
        "in sea-orm crate from unsuccessful database operations: {}: {}",
        message,
        source
    )]
    InSeaOrmDbErr {
        message: String,
        source: sea_orm::DbErr,
    },
}

impl Repository {
    /// Connects, runs pending migrations and builds every table repository.
    pub async fn new(
        db_url: &str,
        max_connections: u32,
    ) -> Result<Self, RepositoryError> {
        let db = init_db(db_url, max_connections).await?;

        Ok(Self {
            prompt_analysis: PromptAnalysisRepository::new(db),
        })
    }
}

async fn init_db(
    db_url: &str,
    max_connections: u32,
) -> Result<DatabaseConnection, RepositoryError> {
    let max_connections = max_connections.max(1);

    let mut opt = ConnectOptions::new(db_url);
    opt.max_connections(max_connections)
        .min_connections(1)
        .sqlx_logging(true)
        .sqlx_logging_level(log::LevelFilter::Debug);

    let db = Database::connect(opt)
        .await
        .into_response("in database connect")?;

    Migrator::up(&db, None)
        .await
        .into_response("in migrator up")?;

    Ok(db)
}
