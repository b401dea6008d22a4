use axum::{
    http::HeaderValue,
    routing::{get, post},
    Router,
};

use anyhow::Context;
use repository::Repository;
use settings::Settings;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::info;
use utoipa::OpenApi;
use utoipa_rapidoc::RapiDoc;
use utoipa_redoc::{Redoc, Servable};
use utoipa_swagger_ui::SwaggerUi;

use crate::agent::{LanguageModel, PromptAnalysisAgent};
use crate::response::FieldError;

pub mod agent;
pub mod analysis;
pub mod healthz;
pub mod not_found;
pub mod response;
pub mod util;

pub enum ApiError {
    ValidationError(Vec<FieldError>),
    NotFound(String),
    ServerError(String),
}

#[derive(Clone, Debug)]
pub struct ApiState<T> {
    repo: Repository,
    agent: PromptAnalysisAgent<T>,
}

impl<T> ApiState<T> {
    pub fn new(repo: Repository, agent: PromptAnalysisAgent<T>) -> Self {
        Self { repo, agent }
    }
}

/// Name and version reported by the liveness endpoints.
#[derive(Clone, Debug)]
pub struct Service {
    pub name: String,
    pub version: String,
}

impl From<&Settings> for Service {
    fn from(settings: &Settings) -> Self {
        Self {
            name: settings.app_name.clone(),
            version: settings.app_version.clone(),
        }
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        healthz::get_root,
        healthz::get_health,
        analysis::post_analyze,
        analysis::get_history,
        analysis::get_analysis,
        analysis::delete_analysis,
    ),
    components(schemas(
        analysis::request::AnalyzeRequest,
        analysis::response::AnalysisResponse,
        analysis::response::HistoryItem,
        analysis::response::DeleteResponse,
        healthz::RootResponse,
        healthz::HealthResponse,
        entity::prompt_analysis::Metrics,
        entity::prompt_analysis::MetricsLevel,
        entity::prompt_analysis::TaskType,
        FieldError,
    )),
    tags(
        (name = "prompts", description = "Prompt analysis API")
    )
)]
struct ApiDoc;

pub fn serve<T: LanguageModel>(
    repository: Repository,
    model: T,
    settings: &Settings,
) -> anyhow::Result<Router> {
    info!(task = "start api serving", prefix = settings.api_prefix.as_str());

    let state = ApiState::new(repository, PromptAnalysisAgent::new(model));
    let service = Service::from(settings);

    // prompts
    let analysis_router = Router::new()
        .route("/analyze", post(analysis::post_analyze::<T>))
        .route("/history", get(analysis::get_history::<T>))
        .route(
            "/:id",
            get(analysis::get_analysis::<T>)
                .delete(analysis::delete_analysis::<T>),
        )
        .with_state(state);

    // liveness
    let health_router = Router::new()
        .route("/", get(healthz::get_root))
        .route("/health", get(healthz::get_health))
        .with_state(service);

    let prefix = settings.api_prefix.trim_end_matches('/');
    let doc = openapi(prefix);

    let router = Router::new()
        .merge(
            SwaggerUi::new("/swagger-ui")
                .url("/api-docs/openapi.json", doc.clone()),
        )
        .merge(Redoc::with_url("/redoc", doc))
        .merge(RapiDoc::new("/api-docs/openapi.json").path("/rapidoc"))
        .merge(health_router);

    let router = match prefix {
        "" => router.merge(analysis_router),
        prefix => router.nest(prefix, analysis_router),
    };

    Ok(router
        .layer(cors(&settings.cors_origins)?)
        .layer(TraceLayer::new_for_http())
        .fallback(not_found::get_404))
}

/// Prompt endpoints are documented relative to the configured prefix.
fn openapi(prefix: &str) -> utoipa::openapi::OpenApi {
    let mut doc = ApiDoc::openapi();
    doc.paths.paths = std::mem::take(&mut doc.paths.paths)
        .into_iter()
        .map(|(path, item)| match path.as_str() {
            "/" | "/health" => (path, item),
            _ => (format!("{}{}", prefix, path), item),
        })
        .collect();

    doc
}

fn cors(origins: &[String]) -> anyhow::Result<CorsLayer> {
    let layer = CorsLayer::new().allow_methods(Any).allow_headers(Any);

    if origins.iter().any(|origin| origin == "*") {
        return Ok(layer.allow_origin(Any));
    }

    let origins = origins
        .iter()
        .map(|origin| {
            origin
                .parse::<HeaderValue>()
                .with_context(|| format!("invalid CORS origin: {}", origin))
        })
        .collect::<anyhow::Result<Vec<_>>>()?;

    Ok(layer.allow_origin(origins))
}
