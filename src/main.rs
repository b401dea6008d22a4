use anyhow::Context;
use gemini::models::Models;
use repository::Repository;
use settings::Settings;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let settings = Settings::from_env()?;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(if settings.debug { "debug" } else { "info" })
    });
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let repository = Repository::new(
        &settings.database.connection_url()?,
        settings.database.max_connections,
    )
    .await?;

    let model = Models::new(
        &settings.gemini.api_key,
        &settings.gemini.model,
        &settings.gemini.base_url,
    )?;
    info!(task = "load model", model = model.model());

    let router = api::serve(repository, model, &settings)?;

    let address = settings.server.address();
    let listener = TcpListener::bind(address)
        .await
        .with_context(|| format!("failed to bind {}", address))?;
    info!(task = "listen", %address);

    axum::serve(listener, router)
        .await
        .context("server stopped")?;

    Ok(())
}
