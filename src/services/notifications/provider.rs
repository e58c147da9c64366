//! Core push provider trait and types.
//!
//! Each gateway integration implements `PushProvider`; callers hold a
//! `dyn PushProvider` and never see gateway-specific payload rules.

use super::message::{NotificationData, Recipients};
use crate::error::AppResult;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Result of a push the gateway accepted
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationResult {
    /// Whether send was successful
    pub success: bool,
    /// HTTP status code returned by the gateway
    pub status_code: Option<u16>,
    /// Response body as returned by the gateway
    pub response: Option<String>,
    /// Time taken for the request in milliseconds
    pub duration_ms: u64,
}

/// Trait for push notification gateways
///
/// Uses `async_trait` for dynamic dispatch. All providers must be
/// Send + Sync; concurrent calls are independent.
#[async_trait]
pub trait PushProvider: Send + Sync {
    /// Sends one push to `to`
    ///
    /// Exactly one request is attempted; failures are returned, not retried.
    async fn notify(
        &self,
        to: Recipients,
        data: &NotificationData,
    ) -> AppResult<NotificationResult>;

    /// Returns the provider name for logging/debugging
    fn name(&self) -> &'static str;

    /// Validates provider configuration (optional, default no-op)
    async fn validate_config(&self) -> AppResult<()> {
        Ok(())
    }
}
