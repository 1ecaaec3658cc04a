//! HTTP client for the hosted payment gateway.
//!
//! The gateway wraps every response in a `{ status, message, data }`
//! envelope; amounts travel as strings to avoid float truncation.

use std::str::FromStr;
use std::time::Duration;

use async_trait::async_trait;
use log::debug;
use reqwest::Client;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::payments_model::{
    InitializePayment, PaymentSession, PaymentStatus, PaymentVerification,
};
use super::payments_traits::PaymentGatewayTrait;
use crate::errors::{Error, Result};

// ============================================================================
// API Request/Response Structures
// ============================================================================

#[derive(Debug, Serialize)]
struct InitializeRequest {
    email: String,
    amount: String,
    reference: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    callback_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    metadata: Option<Value>,
}

#[derive(Debug, Deserialize)]
struct Envelope<T> {
    status: bool,
    message: Option<String>,
    data: Option<T>,
}

#[derive(Debug, Deserialize)]
struct InitializeData {
    authorization_url: String,
    reference: String,
}

#[derive(Debug, Deserialize)]
struct VerifyData {
    reference: String,
    amount: String,
    status: String,
}

// ============================================================================
// HostedPaymentGateway
// ============================================================================

/// Payment gateway client using bearer-token authentication.
pub struct HostedPaymentGateway {
    client: Client,
    base_url: String,
    secret_key: String,
}

impl HostedPaymentGateway {
    /// Create a new gateway client for the given API base URL and secret key.
    pub fn new(base_url: impl Into<String>, secret_key: impl Into<String>) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .unwrap_or_else(|_| Client::new());

        Self {
            client,
            base_url: base_url.into(),
            secret_key: secret_key.into(),
        }
    }

    fn map_request_error(e: reqwest::Error) -> Error {
        if e.is_timeout() {
            Error::Gateway("Request timed out".to_string())
        } else {
            Error::Gateway(format!("Request failed: {}", e))
        }
    }

    fn unwrap_envelope<T>(envelope: Envelope<T>) -> Result<T> {
        if !envelope.status {
            return Err(Error::Gateway(
                envelope
                    .message
                    .unwrap_or_else(|| "Gateway reported failure".to_string()),
            ));
        }
        envelope
            .data
            .ok_or_else(|| Error::Gateway("Gateway response missing data".to_string()))
    }
}

#[async_trait]
impl PaymentGatewayTrait for HostedPaymentGateway {
    async fn initialize_payment(&self, request: InitializePayment) -> Result<PaymentSession> {
        let url = format!("{}/transaction/initialize", self.base_url);
        debug!("Initializing payment {}", request.reference);

        let body = InitializeRequest {
            email: request.email,
            amount: request.amount.to_string(),
            reference: request.reference,
            callback_url: request.callback_url,
            metadata: request.metadata,
        };

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.secret_key)
            .json(&body)
            .send()
            .await
            .map_err(Self::map_request_error)?;

        let status = response.status();
        if status == reqwest::StatusCode::UNAUTHORIZED {
            return Err(Error::Gateway("Invalid or missing secret key".to_string()));
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Error::Gateway(format!("HTTP {} - {}", status, body)));
        }

        let envelope: Envelope<InitializeData> = response
            .json()
            .await
            .map_err(|e| Error::Gateway(format!("Malformed response: {}", e)))?;
        let data = Self::unwrap_envelope(envelope)?;

        Ok(PaymentSession {
            reference: data.reference,
            authorization_url: data.authorization_url,
        })
    }

    async fn verify_payment(&self, reference: &str) -> Result<PaymentVerification> {
        let url = format!("{}/transaction/verify/{}", self.base_url, reference);
        debug!("Verifying payment {}", reference);

        let response = self
            .client
            .get(&url)
            .bearer_auth(&self.secret_key)
            .send()
            .await
            .map_err(Self::map_request_error)?;

        let status = response.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(Error::Gateway(format!("Unknown reference {}", reference)));
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Error::Gateway(format!("HTTP {} - {}", status, body)));
        }

        let envelope: Envelope<VerifyData> = response
            .json()
            .await
            .map_err(|e| Error::Gateway(format!("Malformed response: {}", e)))?;
        let data = Self::unwrap_envelope(envelope)?;

        let amount = Decimal::from_str(&data.amount)
            .map_err(|e| Error::Gateway(format!("Unparseable amount {}: {}", data.amount, e)))?;
        let status = match data.status.as_str() {
            "success" => PaymentStatus::Success,
            "failed" => PaymentStatus::Failed,
            _ => PaymentStatus::Pending,
        };

        Ok(PaymentVerification {
            reference: data.reference,
            amount,
            status,
        })
    }
}
