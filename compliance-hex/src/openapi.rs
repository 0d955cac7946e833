//! OpenAPI document for the compliance gateway.

#![allow(dead_code)] // Path functions are only used by utoipa for documentation generation

use cards_types::dto::{CheckStatusParams, ComplianceStatusResponse, ReportStolenForm};
use utoipa::OpenApi;

// Dummy functions to generate path documentation
// These are not the actual handlers, just for OpenAPI path generation

/// Health check endpoint
#[utoipa::path(
    get,
    path = "/health",
    tag = "health",
    responses(
        (status = 200, description = "Service is healthy", body = inline(serde_json::Value), example = json!({"status": "healthy"}))
    )
)]
async fn health() {}

/// Report every card of a user as stolen
#[utoipa::path(
    post,
    path = "/report_cards",
    tag = "compliance",
    request_body(content = ReportStolenForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 200, description = "Cards blocked, no cards found, or report already submitted", body = String, content_type = "text/plain"),
        (status = 400, description = "User name or secret code missing", body = String, content_type = "text/plain"),
        (status = 401, description = "Invalid user name or secret code", body = String, content_type = "text/plain"),
        (status = 404, description = "User not found", body = String, content_type = "text/plain"),
        (status = 500, description = "Store failure", body = String, content_type = "text/plain")
    )
)]
async fn report_cards() {}

/// Compliance verdict for a user and card
#[utoipa::path(
    get,
    path = "/check_user",
    tag = "compliance",
    params(CheckStatusParams),
    responses(
        (status = 200, description = "Verdict computed (compliant or not)", body = ComplianceStatusResponse),
        (status = 400, description = "Parameter missing", body = String, content_type = "text/plain"),
        (status = 500, description = "Malformed parameter or store failure", body = ComplianceStatusResponse)
    )
)]
async fn check_user() {}

/// OpenAPI documentation for the Compliance API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Card Compliance Service API",
        version = "1.0.0",
        description = "Tracks stolen payment cards and answers whether a user's card may transact.",
        license(name = "MIT"),
    ),
    paths(health, report_cards, check_user),
    components(schemas(ReportStolenForm, ComplianceStatusResponse)),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "compliance", description = "Stolen-card reports and compliance verdicts"),
    )
)]
pub struct ApiDoc;
