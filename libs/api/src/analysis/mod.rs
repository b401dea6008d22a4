use axum::{
    extract::{Path, Query, State},
    Json,
};
use entity::prelude::*;
use tracing::info;

pub mod request;
pub mod response;

use crate::agent::LanguageModel;
use crate::response::{ApiResponse, IntoApiResponse};
use crate::util::request::Pagination;
use crate::{ApiError, ApiState};

use self::{
    request::AnalyzeRequest,
    response::{AnalysisResponse, DeleteResponse, HistoryItem},
};

/// Analyze a prompt
///
/// Grades the prompt, rewrites it, stores the result and returns the stored
/// record.
#[utoipa::path(
    post,
    path = "/analyze",
    tag = "prompts",
    request_body = AnalyzeRequest,
    responses(
        (status = 200, description = "Prompt analyzed successfully", body = AnalysisResponse),
        (status = 422, description = "Invalid request", body = [FieldError]),
        (status = 500, description = "Analysis or storage failed")
    )
)]
pub async fn post_analyze<T: LanguageModel>(
    State(state): State<ApiState<T>>,
    Json(body): Json<AnalyzeRequest>,
) -> ApiResponse<Json<AnalysisResponse>> {
    body.validate()?;

    let analysis = state
        .agent
        .analyze(&body.prompt, body.task_type, body.context())
        .await
        .into_response("500-001")?;

    let context = body.context().map(str::to_string);
    let saved = state
        .repo
        .prompt_analysis
        .save(PromptAnalysisEntity {
            original_prompt: body.prompt,
            task_type: body.task_type,
            context,
            analysis,
            ..Default::default()
        })
        .await
        .into_response("500-002")?;

    info!(task = "save prompt analysis", id = saved.id.as_str());

    Ok(Json(AnalysisResponse::from(saved)))
}

/// List analyses, newest first
#[utoipa::path(
    get,
    path = "/history",
    tag = "prompts",
    params(Pagination),
    responses(
        (status = 200, description = "List analyses successfully", body = [HistoryItem]),
        (status = 422, description = "Invalid pagination", body = [FieldError]),
        (status = 500, description = "Storage failed")
    )
)]
pub async fn get_history<T: LanguageModel>(
    State(state): State<ApiState<T>>,
    Query(pagination): Query<Pagination>,
) -> ApiResponse<Json<Vec<HistoryItem>>> {
    pagination.validate()?;

    let analyses = state
        .repo
        .prompt_analysis
        .find(pagination.offset, pagination.limit)
        .await
        .into_response("500-003")?;

    Ok(Json(analyses.into_iter().map(HistoryItem::from).collect()))
}

/// Get an analysis
#[utoipa::path(
    get,
    path = "/{id}",
    tag = "prompts",
    responses(
        (status = 200, description = "Get an analysis successfully", body = AnalysisResponse),
        (status = 404, description = "No analysis with this id"),
        (status = 500, description = "Storage failed")
    ),
    params(
        ("id", description = "analysis id"),
    )
)]
pub async fn get_analysis<T: LanguageModel>(
    State(state): State<ApiState<T>>,
    Path(id): Path<String>,
) -> ApiResponse<Json<AnalysisResponse>> {
    let analysis = state
        .repo
        .prompt_analysis
        .find_by_id(&id)
        .await
        .into_response("500-004")?;

    let Some(analysis) = analysis else {
        return Err(not_found(&id));
    };

    Ok(Json(AnalysisResponse::from(analysis)))
}

/// Delete an analysis
#[utoipa::path(
    delete,
    path = "/{id}",
    tag = "prompts",
    responses(
        (status = 200, description = "Delete an analysis successfully", body = DeleteResponse),
        (status = 404, description = "No analysis with this id"),
        (status = 500, description = "Storage failed")
    ),
    params(
        ("id", description = "analysis id"),
    )
)]
pub async fn delete_analysis<T: LanguageModel>(
    State(state): State<ApiState<T>>,
    Path(id): Path<String>,
) -> ApiResponse<Json<DeleteResponse>> {
    let deleted = state
        .repo
        .prompt_analysis
        .delete(&id)
        .await
        .into_response("500-005")?;

    if !deleted {
        return Err(not_found(&id));
    }

    info!(task = "delete prompt analysis", id = id.as_str());

    Ok(Json(DeleteResponse {
        message: "Prompt deleted successfully".to_string(),
        id,
    }))
}

fn not_found(id: &str) -> ApiError {
    ApiError::NotFound(format!("Prompt with ID {} not found", id))
}
