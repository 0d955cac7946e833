//! HTTP tests for the payment router with an in-process verdict provider.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use axum::{
    Router,
    body::Body,
    http::{Method, Request, StatusCode, header},
};
use http_body_util::BodyExt;
use tower::ServiceExt;

use cards_types::{
    CardId, ComplianceVerdict, ComplianceVerdictProvider, TransactionIdGenerator,
    TransactionRef, UserId, VerdictError,
};
use payment_hex::{PaymentService, RandomTransactionIds, inbound::HttpServer};

/// Blocks user 2, answers 502 for user 3, approves everyone else.
#[derive(Clone, Default)]
struct FakeCompliance {
    calls: Arc<AtomicUsize>,
}

#[async_trait]
impl ComplianceVerdictProvider for FakeCompliance {
    async fn check_compliance(
        &self,
        user_id: UserId,
        _card_id: CardId,
    ) -> Result<ComplianceVerdict, VerdictError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match user_id.get() {
            2 => Ok(ComplianceVerdict::blocked()),
            3 => Err(VerdictError::Status(502)),
            _ => Ok(ComplianceVerdict::compliant()),
        }
    }
}

struct FixedId;

impl TransactionIdGenerator for FixedId {
    fn next_id(&self) -> TransactionRef {
        TransactionRef::new("txn_4242424")
    }
}

fn create_test_app() -> (Router, Arc<AtomicUsize>) {
    let provider = FakeCompliance::default();
    let calls = provider.calls.clone();
    let service = PaymentService::new(provider, FixedId);
    (HttpServer::new(service).router(), calls)
}

fn payment_request(body: &str) -> Request<Body> {
    Request::builder()
        .method(Method::POST)
        .uri("/process_payment")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn message(response: axum::response::Response) -> String {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    json["message"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn test_successful_payment() {
    let (app, calls) = create_test_app();

    let response = app
        .oneshot(payment_request(
            r#"{"user_id": 1, "card_id": 1, "amount": 100.0}"#,
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        message(response).await,
        "payment successful. Transaction ID: txn_4242424"
    );
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_blocked_user_gets_403() {
    let (app, _) = create_test_app();

    let response = app
        .oneshot(payment_request(
            r#"{"user_id": 2, "card_id": 1, "amount": 10}"#,
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    assert_eq!(
        message(response).await,
        "payment denied: user is currently blocked due to reported stolen card(s)"
    );
}

#[tokio::test]
async fn test_upstream_failure_gets_403() {
    let (app, _) = create_test_app();

    let response = app
        .oneshot(payment_request(
            r#"{"user_id": 3, "card_id": 1, "amount": 10}"#,
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    assert_eq!(
        message(response).await,
        "payment denied: compliance service returned status code: 502"
    );
}

#[tokio::test]
async fn test_non_positive_amount_never_reaches_compliance() {
    let (app, calls) = create_test_app();

    for body in [
        r#"{"user_id": 1, "card_id": 1, "amount": 0}"#,
        r#"{"user_id": 1, "card_id": 1, "amount": -10.5}"#,
        r#"{"card_id": 1, "amount": 10}"#,
    ] {
        let response = app.clone().oneshot(payment_request(body)).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            message(response).await,
            "user id, card id and valid amount are required"
        );
    }

    assert_eq!(calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_malformed_json() {
    let (app, calls) = create_test_app();

    for body in ["{not json", r#"{"user_id": "one", "card_id": 1, "amount": 5}"#] {
        let response = app.clone().oneshot(payment_request(body)).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(message(response).await, "invalid request payload");
    }

    assert_eq!(calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_random_ids_through_router() {
    let service = PaymentService::new(FakeCompliance::default(), RandomTransactionIds);
    let app = HttpServer::new(service).router();

    let response = app
        .oneshot(payment_request(
            r#"{"user_id": 1, "card_id": 1, "amount": 1.5}"#,
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let text = message(response).await;
    let id = text
        .strip_prefix("payment successful. Transaction ID: txn_")
        .unwrap();
    assert_eq!(id.len(), 7);
}
