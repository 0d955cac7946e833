//! HTTP request handlers.

use std::sync::Arc;

use axum::{
    Form, Json,
    extract::{Query, State, rejection::FormRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use utoipa::OpenApi;

use cards_types::{
    CardId, CardOwnershipStore, CheckStatusParams, ComplianceError, ComplianceStatusResponse,
    CredentialStore, ReportStolenForm, StolenCardLedger, UserId,
};

use crate::ComplianceService;
use crate::openapi::ApiDoc;

const CREDENTIALS_REQUIRED: &str = "user name and secret code are required";

/// Application state shared across handlers.
pub struct AppState<U, C, L>
where
    U: CredentialStore,
    C: CardOwnershipStore,
    L: StolenCardLedger,
{
    pub service: ComplianceService<U, C, L>,
}

/// Wrapper to implement IntoResponse for ComplianceError (orphan rule workaround).
///
/// The report endpoint answers in plain text, so errors do too.
pub struct ApiError(pub ComplianceError);

impl From<ComplianceError> for ApiError {
    fn from(err: ComplianceError) -> Self {
        ApiError(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self.0 {
            ComplianceError::UserNotFound => StatusCode::NOT_FOUND,
            ComplianceError::InvalidCredentials => StatusCode::UNAUTHORIZED,
            ComplianceError::Store { .. } | ComplianceError::Internal(_) => {
                tracing::error!(error = %self.0, "report failed");
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        (status, self.0.to_string()).into_response()
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

/// Report every card of the authenticated user as stolen.
#[tracing::instrument(skip(state, form))]
pub async fn report_cards<U, C, L>(
    State(state): State<Arc<AppState<U, C, L>>>,
    form: Result<Form<ReportStolenForm>, FormRejection>,
) -> Result<Response, ApiError>
where
    U: CredentialStore,
    C: CardOwnershipStore,
    L: StolenCardLedger,
{
    let form = match form {
        Ok(Form(form)) if form.is_complete() => form,
        _ => return Ok((StatusCode::BAD_REQUEST, CREDENTIALS_REQUIRED).into_response()),
    };

    tracing::info!(user_name = %form.user_name, "stolen card report received");

    let outcome = state
        .service
        .report_stolen(&form.user_name, &form.secret_code)
        .await?;

    Ok(outcome.message().into_response())
}

/// Compliance verdict for a (user, card) pair.
#[tracing::instrument(skip(state))]
pub async fn check_user<U, C, L>(
    State(state): State<Arc<AppState<U, C, L>>>,
    Query(params): Query<CheckStatusParams>,
) -> Response
where
    U: CredentialStore,
    C: CardOwnershipStore,
    L: StolenCardLedger,
{
    let Some(raw_user_id) = params.user_id.filter(|v| !v.is_empty()) else {
        return (StatusCode::BAD_REQUEST, "user id is required").into_response();
    };
    let Some(raw_card_id) = params.card_id.filter(|v| !v.is_empty()) else {
        return (StatusCode::BAD_REQUEST, "card id is required").into_response();
    };

    let user_id: UserId = match raw_user_id.parse() {
        Ok(id) => id,
        Err(e) => return status_error(format!("invalid data type for user ID: {}", e)),
    };
    let card_id: CardId = match raw_card_id.parse() {
        Ok(id) => id,
        Err(e) => return status_error(format!("invalid data type for card ID: {}", e)),
    };

    match state.service.check_status(user_id, card_id).await {
        Ok(verdict) => Json(ComplianceStatusResponse::from(verdict)).into_response(),
        Err(err) => {
            tracing::error!(error = %err, "status check failed");
            let reason = match &err {
                ComplianceError::Store { context, .. } => context.to_string(),
                other => other.to_string(),
            };
            status_error(format!("error checking user status: {}", reason))
        }
    }
}

/// Non-verdict answer of the status endpoint: 500 with a negative verdict body.
fn status_error(message: String) -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ComplianceStatusResponse {
            compliant: false,
            message,
        }),
    )
        .into_response()
}
