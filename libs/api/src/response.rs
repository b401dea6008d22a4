use axum::{http::StatusCode, response::IntoResponse, Json};
use serde::Serialize;
use serde_json::{json, Map, Value};
use tracing::error;
use utoipa::ToSchema;

use crate::ApiError;

static ERROR_CODES: &str = include_str!("error-code.json");

/// Where a rejected field lives, e.g. `["body", "prompt"]`.
#[derive(Serialize, ToSchema, Debug, PartialEq)]
pub struct FieldError {
    pub loc: Vec<String>,
    pub msg: String,
}

impl FieldError {
    pub fn new(location: &str, field: &str, msg: impl Into<String>) -> Self {
        Self {
            loc: vec![location.to_string(), field.to_string()],
            msg: msg.into(),
        }
    }
}

impl From<Vec<FieldError>> for ApiError {
    fn from(errors: Vec<FieldError>) -> Self {
        ApiError::ValidationError(errors)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let (status_code, detail) = match self {
            ApiError::ValidationError(errors) => {
                (StatusCode::UNPROCESSABLE_ENTITY, json!(errors))
            }
            ApiError::NotFound(message) => {
                (StatusCode::NOT_FOUND, json!(message))
            }
            ApiError::ServerError(message) => {
                (StatusCode::INTERNAL_SERVER_ERROR, json!(message))
            }
        };

        (status_code, Json(json!({ "detail": detail }))).into_response()
    }
}

pub type ApiResponse<T> = Result<T, ApiError>;

pub trait IntoApiResponse<T> {
    fn into_response(self, error_code: &str) -> ApiResponse<T>;
}

impl<T> IntoApiResponse<T> for anyhow::Result<T> {
    fn into_response(self, error_code: &str) -> ApiResponse<T> {
        self.map_err(|e| {
            error!(error_code = error_code, err = format!("{:?}", e));

            ApiError::ServerError(error_message(error_code))
        })
    }
}

fn error_message(error_code: &str) -> String {
    serde_json::from_str::<Map<String, Value>>(ERROR_CODES)
        .ok()
        .and_then(|errors| {
            errors.get(error_code)?.as_str().map(str::to_string)
        })
        .unwrap_or_else(|| format!("Unexpected error ({})", error_code))
}

#[cfg(test)]
mod test {
    use anyhow::anyhow;
    use axum::{http::StatusCode, response::IntoResponse};

    use super::{error_message, FieldError, IntoApiResponse};
    use crate::ApiError;

    #[test]
    fn test_error_message() {
        assert_eq!(error_message("500-001"), "Failed to analyze prompt");
        assert_eq!(error_message("999-999"), "Unexpected error (999-999)");
    }

    #[test]
    fn test_anyhow_error_becomes_server_error() {
        let result: anyhow::Result<()> = Err(anyhow!("connection refused"));

        let Err(ApiError::ServerError(message)) = result.into_response("500-004")
        else {
            panic!("expected a server error");
        };

        assert_eq!(message, "Failed to fetch prompt");
    }

    #[test]
    fn test_status_codes() {
        let cases = [
            (
                ApiError::ValidationError(vec![FieldError::new(
                    "body", "prompt", "too short",
                )]),
                StatusCode::UNPROCESSABLE_ENTITY,
            ),
            (ApiError::NotFound("gone".to_string()), StatusCode::NOT_FOUND),
            (
                ApiError::ServerError("boom".to_string()),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (error, status) in cases {
            assert_eq!(error.into_response().status(), status);
        }
    }
}
