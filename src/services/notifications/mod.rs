//! Push notification delivery.
//!
//! `BoxcarProvider` builds a Boxcar.io payload, signs it and POSTs it once.
//! The `PushProvider` trait is the seam callers depend on.

mod boxcar_provider;
mod provider;

pub mod message;
pub mod signer;

pub use boxcar_provider::{BoxcarProvider, SignedRequest};
pub use message::{
    Filters, NotificationData, Recipients, ScalarValue, compose_message, compose_message_at,
};
pub use provider::{NotificationResult, PushProvider};
pub use signer::RequestSigner;
