//! Gmail API client for outbound order notification emails.
//!
//! Authenticates via the OAuth2 refresh-token grant: every send refreshes a
//! short-lived access token from the stored refresh token, then POSTs the
//! base64url-encoded MIME message to the Gmail API.
//!
//! # Failure semantics
//!
//! Token errors split into two classes. `invalid_grant` and `invalid_request`
//! mean the refresh token itself is dead (revoked, expired, or misconfigured)
//! and no amount of retrying will help; those are permanent. Everything else
//! (network errors, 5xx from Google, other token errors) is transient and
//! retried up to 2 times with linear backoff (1s x attempt).

use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use thiserror::Error;
use tracing::instrument;

use crate::config::GmailConfig;

pub mod message;

pub use message::OutgoingMessage;

/// Google OAuth2 token endpoint.
const TOKEN_ENDPOINT: &str = "https://oauth2.googleapis.com/token";

/// Gmail send endpoint for the authorized user.
const SEND_ENDPOINT: &str = "https://gmail.googleapis.com/gmail/v1/users/me/messages/send";

/// Maximum number of retries after the first attempt.
const MAX_RETRIES: u32 = 2;

/// Errors that can occur when sending email through the Gmail API.
#[derive(Debug, Error)]
pub enum GmailError {
    /// Transport-level failure.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The OAuth2 token endpoint rejected the refresh.
    #[error("Token refresh failed ({code}): {description}")]
    TokenRefresh { code: String, description: String },

    /// The Gmail send endpoint rejected the message.
    #[error("Gmail send failed ({status}): {message}")]
    Send { status: u16, message: String },
}

impl GmailError {
    /// Whether retrying can never succeed.
    ///
    /// `invalid_grant` and `invalid_request` mean the stored refresh token
    /// is unusable; an operator has to mint a new one.
    #[must_use]
    pub fn is_permanent(&self) -> bool {
        matches!(
            self,
            Self::TokenRefresh { code, .. } if code == "invalid_grant" || code == "invalid_request"
        )
    }
}

/// Successful token response from the OAuth2 endpoint.
#[derive(Deserialize)]
struct TokenResponse {
    access_token: String,
}

/// Error response from the OAuth2 endpoint.
#[derive(Deserialize)]
struct TokenErrorResponse {
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    error_description: Option<String>,
}

/// Gmail API client bound to one authorized account.
#[derive(Clone)]
pub struct GmailClient {
    client: reqwest::Client,
    config: GmailConfig,
}

impl GmailClient {
    /// Create a new client from configuration.
    #[must_use]
    pub fn new(config: GmailConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            config,
        }
    }

    /// Exchange the refresh token for a short-lived access token.
    ///
    /// # Errors
    ///
    /// Returns `GmailError::TokenRefresh` with Google's error code when the
    /// grant is rejected.
    #[instrument(skip(self))]
    async fn refresh_access_token(&self) -> Result<SecretString, GmailError> {
        let response = self
            .client
            .post(TOKEN_ENDPOINT)
            .form(&[
                ("client_id", self.config.client_id.as_str()),
                ("client_secret", self.config.client_secret.expose_secret()),
                ("refresh_token", self.config.refresh_token.expose_secret()),
                ("grant_type", "refresh_token"),
            ])
            .send()
            .await?;

        if response.status().is_success() {
            let token: TokenResponse = response.json().await?;
            return Ok(SecretString::from(token.access_token));
        }

        let err: TokenErrorResponse = response.json().await.unwrap_or(TokenErrorResponse {
            error: None,
            error_description: None,
        });
        Err(GmailError::TokenRefresh {
            code: err.error.unwrap_or_else(|| "unknown".to_string()),
            description: err
                .error_description
                .unwrap_or_else(|| "no description".to_string()),
        })
    }

    /// One refresh-then-send attempt.
    async fn try_send(&self, raw: &str) -> Result<(), GmailError> {
        let access_token = self.refresh_access_token().await?;

        let response = self
            .client
            .post(SEND_ENDPOINT)
            .bearer_auth(access_token.expose_secret())
            .json(&serde_json::json!({ "raw": raw }))
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            return Ok(());
        }

        let message = response
            .text()
            .await
            .unwrap_or_else(|_| "Unknown error".to_string());
        Err(GmailError::Send {
            status: status.as_u16(),
            message,
        })
    }

    /// Send a message, retrying transient failures.
    ///
    /// Makes at most `1 + MAX_RETRIES` attempts, sleeping `attempt` seconds
    /// between them. Permanent token failures return immediately.
    ///
    /// # Errors
    ///
    /// Returns the last error once retries are exhausted, or the first
    /// permanent error.
    #[instrument(skip(self, message), fields(to = %message.to, subject = %message.subject))]
    pub async fn send(&self, message: &OutgoingMessage) -> Result<(), GmailError> {
        let raw = message.encode();
        let mut attempt = 0;

        loop {
            attempt += 1;
            match self.try_send(&raw).await {
                Ok(()) => {
                    tracing::info!(attempt, "Email sent successfully");
                    return Ok(());
                }
                Err(err) if err.is_permanent() => {
                    tracing::error!(error = %err, "Permanent email failure, not retrying");
                    return Err(err);
                }
                Err(err) if attempt > MAX_RETRIES => {
                    tracing::error!(error = %err, attempt, "Email failed, retries exhausted");
                    return Err(err);
                }
                Err(err) => {
                    tracing::warn!(error = %err, attempt, "Email attempt failed, retrying");
                    tokio::time::sleep(std::time::Duration::from_secs(u64::from(attempt))).await;
                }
            }
        }
    }
}
