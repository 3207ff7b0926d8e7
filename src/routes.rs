use axum::{Json, Router, extract::{State, rejection::JsonRejection}, http::StatusCode, response::{IntoResponse, Response}, routing::post};
use serde_json::json;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};

use crate::{
    fetcher::ResourceFetcher,
    generator::{generate_marketing_response, GenerationError},
    models::{GenerationRequest, GenerationResult},
    validation::{validate, ValidationError},
};

#[derive(Clone)]
pub struct AppState {
    pub fetcher: Arc<dyn ResourceFetcher>,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/generate", post(generate))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any)
        )
        .with_state(state)
}

pub enum ApiError {
    Malformed(JsonRejection),
    Invalid(ValidationError),
    Generation(GenerationError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::Malformed(rejection) => (StatusCode::BAD_REQUEST, rejection.body_text()),
            ApiError::Invalid(e) => (StatusCode::BAD_REQUEST, e.to_string()),
            ApiError::Generation(e) => (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()),
        };
        (status, Json(json!({ "error": message }))).into_response()
    }
}

pub async fn generate(
    State(state): State<AppState>,
    payload: Result<Json<GenerationRequest>, JsonRejection>,
) -> Result<Json<GenerationResult>, ApiError> {
    let Json(body) = payload.map_err(|rejection| {
        tracing::warn!("⚠️ Rejected malformed generation request: {}", rejection.body_text());
        ApiError::Malformed(rejection)
    })?;

    if let Err(e) = validate(&body) {
        tracing::warn!("⚠️ Rejected generation request for {}: {}", body.product_id, e);
        return Err(ApiError::Invalid(e));
    }

    match generate_marketing_response(state.fetcher.as_ref(), &body).await {
        Ok(result) => Ok(Json(result)),
        Err(e) => {
            tracing::error!("❌ Generation error for {}: {}", body.product_id, e);
            Err(ApiError::Generation(e))
        }
    }
}
