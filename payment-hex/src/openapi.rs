//! OpenAPI document for the payment gateway.

#![allow(dead_code)] // Path functions are only used by utoipa for documentation generation

use cards_types::dto::{MessageResponse, PaymentRequest};
use utoipa::OpenApi;

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

/// Authorize a payment
#[utoipa::path(
    post,
    path = "/process_payment",
    tag = "payments",
    request_body = PaymentRequest,
    responses(
        (status = 200, description = "Payment authorized", body = MessageResponse,
            example = json!({"message": "payment successful. Transaction ID: txn_1234567"})),
        (status = 400, description = "Malformed payload or invalid fields", body = MessageResponse,
            example = json!({"message": "user id, card id and valid amount are required"})),
        (status = 403, description = "Denied by compliance, or compliance unavailable", body = MessageResponse,
            example = json!({"message": "payment denied: user is currently blocked due to reported stolen card(s)"}))
    )
)]
async fn process_payment() {}

/// OpenAPI documentation for the Payment API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Payment Gateway API",
        version = "1.0.0",
        description = "Authorizes card payments after consulting the compliance service.",
        license(name = "MIT"),
    ),
    paths(health, process_payment),
    components(schemas(PaymentRequest, MessageResponse)),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "payments", description = "Payment authorization"),
    )
)]
pub struct ApiDoc;
