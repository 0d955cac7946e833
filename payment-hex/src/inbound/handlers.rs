//! HTTP request handlers.

use std::sync::Arc;

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use utoipa::OpenApi;

use cards_types::{
    ComplianceVerdictProvider, MessageResponse, PaymentError, PaymentRequest,
    TransactionIdGenerator,
};

use crate::PaymentService;
use crate::openapi::ApiDoc;

const INVALID_PAYLOAD: &str = "invalid request payload";

/// Application state shared across handlers.
pub struct AppState<V, G>
where
    V: ComplianceVerdictProvider,
    G: TransactionIdGenerator,
{
    pub service: PaymentService<V, G>,
}

/// Wrapper to implement IntoResponse for PaymentError (orphan rule workaround).
pub struct ApiError(pub PaymentError);

impl From<PaymentError> for ApiError {
    fn from(err: PaymentError) -> Self {
        ApiError(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self.0 {
            PaymentError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            PaymentError::Denied(_) | PaymentError::Upstream(_) => StatusCode::FORBIDDEN,
        };

        (status, Json(MessageResponse::new(self.0.to_string()))).into_response()
    }
}

/// Health check endpoint.
pub async fn health() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "healthy" }))
}

/// OpenAPI document for this service.
pub async fn openapi_json() -> impl IntoResponse {
    Json(ApiDoc::openapi())
}

/// Authorize a payment against the compliance verdict.
#[tracing::instrument(skip(state, payload))]
pub async fn process_payment<V, G>(
    State(state): State<Arc<AppState<V, G>>>,
    payload: Result<Json<PaymentRequest>, JsonRejection>,
) -> Result<Json<MessageResponse>, ApiError>
where
    V: ComplianceVerdictProvider,
    G: TransactionIdGenerator,
{
    let Json(req) = payload.map_err(|rejection| {
        tracing::debug!(error = %rejection, "rejected payment payload");
        PaymentError::InvalidRequest(INVALID_PAYLOAD.into())
    })?;

    let receipt = state.service.process_payment(req).await?;
    Ok(Json(MessageResponse::new(receipt.message())))
}
