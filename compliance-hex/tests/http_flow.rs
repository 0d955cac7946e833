//! End-to-end HTTP tests for the compliance router over an in-memory SQLite store.

use async_trait::async_trait;
use axum::{
    Router,
    body::Body,
    http::{Method, Request, StatusCode, header},
};
use http_body_util::BodyExt;
use tower::ServiceExt;

use cards_types::{CardId, CardOwnershipStore, RepoError, SecretHash, UserId};
use compliance_hex::{ComplianceService, inbound::HttpServer};
use compliance_repo::SqliteRepo;

const SECRET: &str = "hashed_secret_123";

/// Router over a store holding `john_doe` (cards 1 and 2) and `jane_smith` (no cards).
async fn create_test_app() -> (Router, SqliteRepo) {
    let repo = SqliteRepo::new("sqlite::memory:").await.unwrap();

    let hash = SecretHash::generate(SECRET, 4).unwrap();
    let john = repo.create_user("john_doe", &hash).await.unwrap();
    repo.add_card(john).await.unwrap();
    repo.add_card(john).await.unwrap();
    repo.create_user("jane_smith", &hash).await.unwrap();

    let service = ComplianceService::new(repo.clone(), repo.clone(), repo.clone());
    (HttpServer::new(service).router(), repo)
}

/// Card store whose every lookup fails.
struct UnavailableCards;

#[async_trait]
impl CardOwnershipStore for UnavailableCards {
    async fn cards_for_user(&self, _user_id: UserId) -> Result<Vec<CardId>, RepoError> {
        Err(RepoError::Database("disk I/O error".into()))
    }
}

fn report_request(body: &str) -> Request<Body> {
    Request::builder()
        .method(Method::POST)
        .uri("/report_cards")
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn status_request(query: &str) -> Request<Body> {
    Request::builder()
        .uri(format!("/check_user?{}", query))
        .body(Body::empty())
        .unwrap()
}

async fn body_text(response: axum::response::Response) -> String {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}

async fn body_json(response: axum::response::Response) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn test_health() {
    let (app, _) = create_test_app().await;

    let response = app
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["status"], "healthy");
}

#[tokio::test]
async fn test_openapi_document_served() {
    let (app, _) = create_test_app().await;

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api-docs/openapi.json")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let doc = body_json(response).await;
    assert!(doc["paths"]["/report_cards"].is_object());
}

#[tokio::test]
async fn test_report_then_status_flow() {
    let (app, _) = create_test_app().await;

    // Before the report the card is clean
    let response = app
        .clone()
        .oneshot(status_request("user_id=1&card_id=1"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["complaiance"], true);
    assert_eq!(json["message"], "user is compliant");

    let response = app
        .clone()
        .oneshot(report_request(
            "user_name=john_doe&secret_code=hashed_secret_123",
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert!(body_text(response).await.contains("are now blocked"));

    let response = app
        .clone()
        .oneshot(status_request("user_id=1&card_id=1"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["complaiance"], false);
    assert_eq!(
        json["message"],
        "user is currently blocked due to reported stolen card(s)"
    );

    // Ownership is checked before the ledger
    let response = app
        .oneshot(status_request("user_id=1&card_id=99"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["complaiance"], false);
    assert_eq!(json["message"], "the provided card does not belong to the user");
}

#[tokio::test]
async fn test_repeat_report_keeps_one_row_per_card() {
    let (app, repo) = create_test_app().await;
    let body = "user_name=john_doe&secret_code=hashed_secret_123";

    let first = app.clone().oneshot(report_request(body)).await.unwrap();
    assert_eq!(first.status(), StatusCode::OK);

    let second = app.oneshot(report_request(body)).await.unwrap();
    assert_eq!(second.status(), StatusCode::OK);
    assert_eq!(
        body_text(second).await,
        "the report for john_doe has already been submitted."
    );

    let count = repo
        .count_reports(UserId::new(1), CardId::new(1))
        .await
        .unwrap();
    assert_eq!(count, 1);
}

#[tokio::test]
async fn test_report_user_without_cards() {
    let (app, _) = create_test_app().await;

    let response = app
        .oneshot(report_request(
            "user_name=jane_smith&secret_code=hashed_secret_123",
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_text(response).await, "no cards found for the user.");
}

#[tokio::test]
async fn test_report_missing_fields() {
    let (app, _) = create_test_app().await;

    for body in ["", "user_name=john_doe", "secret_code=hashed_secret_123"] {
        let response = app.clone().oneshot(report_request(body)).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "body: {body:?}");
    }
}

#[tokio::test]
async fn test_report_unknown_user() {
    let (app, _) = create_test_app().await;

    let response = app
        .oneshot(report_request("user_name=ghost&secret_code=whatever"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_text(response).await, "user not found");
}

#[tokio::test]
async fn test_report_wrong_secret_writes_nothing() {
    let (app, repo) = create_test_app().await;

    let response = app
        .oneshot(report_request("user_name=john_doe&secret_code=wrong"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(body_text(response).await, "invalid user name or secret code");

    let count = repo
        .count_reports(UserId::new(1), CardId::new(1))
        .await
        .unwrap();
    assert_eq!(count, 0);
}

#[tokio::test]
async fn test_status_missing_parameter() {
    let (app, _) = create_test_app().await;

    let response = app.oneshot(status_request("user_id=1")).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_status_malformed_parameter() {
    let (app, _) = create_test_app().await;

    let response = app
        .clone()
        .oneshot(status_request("user_id=abc&card_id=1"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let json = body_json(response).await;
    assert_eq!(json["complaiance"], false);
    assert!(
        json["message"]
            .as_str()
            .unwrap()
            .starts_with("invalid data type for user ID")
    );

    let response = app
        .oneshot(status_request("user_id=1&card_id=abc"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let json = body_json(response).await;
    assert_eq!(json["complaiance"], false);
    assert!(
        json["message"]
            .as_str()
            .unwrap()
            .starts_with("invalid data type for card ID")
    );
}

#[tokio::test]
async fn test_status_store_failure_hides_driver_detail() {
    let repo = SqliteRepo::new("sqlite::memory:").await.unwrap();
    let service = ComplianceService::new(repo.clone(), UnavailableCards, repo);
    let app = HttpServer::new(service).router();

    let response = app
        .oneshot(status_request("user_id=1&card_id=1"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let json = body_json(response).await;
    assert_eq!(json["complaiance"], false);
    assert_eq!(
        json["message"],
        "error checking user status: error retrieving user cards"
    );
}
