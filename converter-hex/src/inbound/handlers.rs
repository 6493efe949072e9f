//! HTTP request handlers.

use std::sync::Arc;

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use utoipa::OpenApi;

use converter_types::{AppError, ConversionRequest, RateCache, RateProvider};

use crate::ConversionService;
use crate::openapi::ApiDoc;

/// Application state shared across handlers.
pub struct AppState<C: RateCache, P: RateProvider> {
    pub service: ConversionService<C, P>,
}

/// Wrapper to implement IntoResponse for AppError (orphan rule workaround).
pub struct ApiError(pub AppError);

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        ApiError(err)
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError(AppError::BadRequest(rejection.body_text()))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self.0 {
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            AppError::ServiceUnavailable(msg) => (StatusCode::SERVICE_UNAVAILABLE, msg.clone()),
            AppError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
        };

        let body = serde_json::json!({
            "error": message,
            "code": status.as_u16()
        });

        (status, Json(body)).into_response()
    }
}

/// Health check endpoint.
pub async fn health() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "healthy" }))
}

/// Convert an amount between two currencies.
#[tracing::instrument(skip(state, payload))]
pub async fn convert<C: RateCache, P: RateProvider>(
    State(state): State<Arc<AppState<C, P>>>,
    payload: Result<Json<ConversionRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(req) = payload?;
    tracing::info!(
        source = %req.source,
        target = %req.target,
        amount = req.amount,
        "Conversion requested"
    );
    let result = state.service.convert(req).await?;
    Ok(Json(result))
}

/// OpenAPI document for the service.
pub async fn openapi_json() -> impl IntoResponse {
    Json(ApiDoc::openapi())
}
