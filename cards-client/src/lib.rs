//! # Cards Client SDK
//!
//! Typed Rust clients for the compliance and payment APIs.
//!
//! `ComplianceClient` also implements the `ComplianceVerdictProvider` port,
//! which is how the payment gateway talks to the compliance service.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;

use cards_types::{
    CardId, ComplianceStatusResponse, ComplianceVerdict, ComplianceVerdictProvider,
    MessageResponse, PaymentRequest, ReportStolenForm, UserId, VerdictError,
};

/// Default bound on a single verdict call.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_millis(5000);

/// Error type for client operations.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

fn normalize(base_url: impl Into<String>) -> String {
    base_url.into().trim_end_matches('/').to_string()
}

/// Turns a non-2xx response into `ClientError::Api`, preferring the JSON
/// `message` field when there is one.
async fn api_error(resp: reqwest::Response) -> ClientError {
    let status = resp.status().as_u16();
    let body = resp.text().await.unwrap_or_default();
    let message = serde_json::from_str::<serde_json::Value>(&body)
        .ok()
        .and_then(|v| v.get("message").and_then(|m| m.as_str()).map(String::from))
        .unwrap_or(body);
    ClientError::Api { status, message }
}

async fn send_json<T: DeserializeOwned>(req: RequestBuilder) -> Result<T, ClientError> {
    let resp = req.send().await?;
    if !resp.status().is_success() {
        return Err(api_error(resp).await);
    }
    let body = resp.text().await?;
    Ok(serde_json::from_str(&body)?)
}

async fn send_text(req: RequestBuilder) -> Result<String, ClientError> {
    let resp = req.send().await?;
    if !resp.status().is_success() {
        return Err(api_error(resp).await);
    }
    Ok(resp.text().await?)
}

// ─────────────────────────────────────────────────────────────────────────────
// Compliance
// ─────────────────────────────────────────────────────────────────────────────

/// Compliance API client.
#[derive(Clone)]
pub struct ComplianceClient {
    base_url: String,
    timeout: Duration,
    http: Client,
}

impl ComplianceClient {
    /// Creates a new client.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: normalize(base_url),
            timeout: DEFAULT_TIMEOUT,
            http: Client::new(),
        }
    }

    /// Sets the per-request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Checks if the API is healthy.
    pub async fn health(&self) -> Result<bool, ClientError> {
        let resp = self
            .http
            .get(format!("{}/health", self.base_url))
            .timeout(self.timeout)
            .send()
            .await?;
        Ok(resp.status().is_success())
    }

    /// Reports every card of the user as stolen. Returns the service's
    /// confirmation text.
    pub async fn report_stolen_cards(
        &self,
        user_name: &str,
        secret_code: &str,
    ) -> Result<String, ClientError> {
        let form = ReportStolenForm {
            user_name: user_name.to_string(),
            secret_code: secret_code.to_string(),
        };
        send_text(
            self.http
                .post(format!("{}/report_cards", self.base_url))
                .timeout(self.timeout)
                .form(&form),
        )
        .await
    }

    /// Gets the wire-level verdict for a (user, card) pair.
    pub async fn check_status(
        &self,
        user_id: UserId,
        card_id: CardId,
    ) -> Result<ComplianceStatusResponse, ClientError> {
        send_json(self.status_request(user_id, card_id)).await
    }

    fn status_request(&self, user_id: UserId, card_id: CardId) -> RequestBuilder {
        self.http
            .get(format!("{}/check_user", self.base_url))
            .timeout(self.timeout)
            .query(&[
                ("user_id", user_id.to_string()),
                ("card_id", card_id.to_string()),
            ])
    }
}

fn transport_error(err: reqwest::Error) -> VerdictError {
    if err.is_timeout() {
        VerdictError::Timeout
    } else {
        VerdictError::Transport(err.to_string())
    }
}

#[async_trait]
impl ComplianceVerdictProvider for ComplianceClient {
    async fn check_compliance(
        &self,
        user_id: UserId,
        card_id: CardId,
    ) -> Result<ComplianceVerdict, VerdictError> {
        let resp = self
            .status_request(user_id, card_id)
            .send()
            .await
            .map_err(|e| {
                tracing::warn!(error = %e, base_url = %self.base_url, "compliance request failed");
                transport_error(e)
            })?;

        let status = resp.status();
        if !status.is_success() {
            tracing::warn!(status = status.as_u16(), "compliance service returned an error status");
            return Err(VerdictError::Status(status.as_u16()));
        }

        let body = resp.text().await.map_err(|e| {
            tracing::warn!(error = %e, "failed to read compliance response");
            transport_error(e)
        })?;

        let parsed: ComplianceStatusResponse = serde_json::from_str(&body).map_err(|e| {
            tracing::warn!(error = %e, "unparsable compliance response");
            VerdictError::Malformed(e.to_string())
        })?;

        Ok(parsed.into())
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Payments
// ─────────────────────────────────────────────────────────────────────────────

/// Payment API client.
#[derive(Clone)]
pub struct PaymentClient {
    base_url: String,
    http: Client,
}

impl PaymentClient {
    /// Creates a new client.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: normalize(base_url),
            http: Client::new(),
        }
    }

    /// Checks if the API is healthy.
    pub async fn health(&self) -> Result<bool, ClientError> {
        let resp = self
            .http
            .get(format!("{}/health", self.base_url))
            .send()
            .await?;
        Ok(resp.status().is_success())
    }

    /// Submits a payment. Denials come back as `ClientError::Api` with
    /// status 403.
    pub async fn process_payment(
        &self,
        user_id: UserId,
        card_id: CardId,
        amount: f64,
    ) -> Result<MessageResponse, ClientError> {
        let req = PaymentRequest {
            user_id,
            card_id,
            amount,
        };
        send_json(
            self.http
                .post(format!("{}/process_payment", self.base_url))
                .json(&req),
        )
        .await
    }
}
