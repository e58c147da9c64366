//! Boxcar.io push provider implementation.
//!
//! Builds the push payload, signs it with HMAC-SHA1 and sends a single
//! `POST {endpoint}?publishkey=..&signature=..`. No retries.

use super::message::{Filters, NotificationData, Recipients, compose_message};
use super::provider::{NotificationResult, PushProvider};
use super::signer::RequestSigner;
use crate::config::BoxcarConfig;
use crate::error::{AppError, AppResult};
use crate::external::client::HTTP_CLIENT;
use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use reqwest::{Method, Url};
use std::time::{Duration, Instant};

/// A payload together with the URL carrying its signature
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedRequest {
    pub method: Method,
    /// Endpoint with `publishkey` and `signature` appended
    pub url: Url,
    /// Exactly the string that was signed
    pub body: String,
}

/// Boxcar.io push provider
///
/// The endpoint is parsed once in `new`; host and path used for signing are
/// fixed for the lifetime of the provider.
///
/// # Example
/// ```ignore
/// let provider = BoxcarProvider::new(settings.boxcar.clone())?;
/// let data = NotificationData::new().with_alert("hi").with_badge(1);
/// let result = provider.handle_notification("user1", &data).await?;
/// ```
#[derive(Clone)]
pub struct BoxcarProvider {
    config: BoxcarConfig,
    endpoint: Url,
    signer: RequestSigner,
    client: reqwest::Client,
}

impl BoxcarProvider {
    /// Creates a provider using the shared `HTTP_CLIENT`
    ///
    /// # Errors
    /// Returns `AppError::Configuration` if the endpoint is not an absolute
    /// http(s) URL.
    pub fn new(config: BoxcarConfig) -> AppResult<Self> {
        Self::with_client(config, HTTP_CLIENT.clone())
    }

    /// Creates a provider with a caller-supplied HTTP client
    pub fn with_client(config: BoxcarConfig, client: reqwest::Client) -> AppResult<Self> {
        let endpoint = config
            .endpoint_url()
            .map_err(|e| AppError::Configuration {
                key: "boxcar.endpoint".to_string(),
                source: anyhow::Error::new(e),
            })?;
        let signer = RequestSigner::new(config.secret_key.clone(), &endpoint);

        Ok(Self {
            config,
            endpoint,
            signer,
            client,
        })
    }

    pub fn config(&self) -> &BoxcarConfig {
        &self.config
    }

    /// Compute the request signature for `body`
    pub fn sign_request(&self, method: &str, body: &str) -> AppResult<String> {
        self.signer.sign(method, body)
    }

    /// Sign `payload` and build the target URL. The returned body is the
    /// same string that was signed.
    pub fn sign_payload(&self, payload: String) -> AppResult<SignedRequest> {
        let method = Method::POST;
        let signature = self.sign_request(method.as_str(), &payload)?;

        let mut url = self.endpoint.clone();
        url.query_pairs_mut()
            .append_pair("publishkey", &self.config.access_key)
            .append_pair("signature", &signature);

        Ok(SignedRequest {
            method,
            url,
            body: payload,
        })
    }

    /// Build the signed request for `to`/`data` without sending it
    pub fn prepare(
        &self,
        to: impl Into<Recipients>,
        data: &NotificationData,
    ) -> AppResult<SignedRequest> {
        let filters = Filters::for_recipients(to);
        self.sign_payload(compose_message(data, &filters)?)
    }

    /// Send a composed payload to the gateway
    ///
    /// # Errors
    /// - `AppError::Transport` if no response was received
    /// - `AppError::Gateway` if the gateway answered with a non-2xx status
    pub async fn push_message(&self, payload: String) -> AppResult<NotificationResult> {
        let request = self.sign_payload(payload)?;
        tracing::debug!(payload = %request.body, "Boxcar payload");

        self.execute(request).await
    }

    /// Compose, sign and send one push to `to`
    pub async fn handle_notification(
        &self,
        to: impl Into<Recipients>,
        data: &NotificationData,
    ) -> AppResult<NotificationResult> {
        let filters = Filters::for_recipients(to);
        self.push_message(compose_message(data, &filters)?).await
    }

    async fn execute(&self, request: SignedRequest) -> AppResult<NotificationResult> {
        let start = Instant::now();

        let response = self
            .client
            .request(request.method, request.url)
            .timeout(Duration::from_secs(self.config.timeout_seconds))
            .header(CONTENT_TYPE, "application/json")
            .body(request.body)
            .send()
            .await
            .map_err(|source| self.transport_error(source))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|source| self.transport_error(source))?;
        let duration_ms = start.elapsed().as_millis() as u64;

        tracing::debug!(status = status.as_u16(), duration_ms, "Boxcar response");

        if !status.is_success() {
            return Err(AppError::Gateway {
                status: status.as_u16(),
                body,
            });
        }

        Ok(NotificationResult {
            success: true,
            status_code: Some(status.as_u16()),
            response: Some(body),
            duration_ms,
        })
    }

    // The signed URL is left out so the signature never ends up in error output.
    fn transport_error(&self, source: reqwest::Error) -> AppError {
        AppError::Transport {
            url: self.config.endpoint.clone(),
            source: source.without_url(),
        }
    }
}

impl std::fmt::Debug for BoxcarProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BoxcarProvider")
            .field("config", &self.config)
            .field("signer", &self.signer)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl PushProvider for BoxcarProvider {
    async fn notify(
        &self,
        to: Recipients,
        data: &NotificationData,
    ) -> AppResult<NotificationResult> {
        self.handle_notification(to, data).await
    }

    fn name(&self) -> &'static str {
        "boxcar"
    }

    /// Checks keys are present and the endpoint is still a usable URL
    async fn validate_config(&self) -> AppResult<()> {
        self.config.validate().map_err(|e| AppError::Validation {
            field: "boxcar".to_string(),
            reason: e.to_string(),
        })
    }
}
