//! boxcar-push
//!
//! Signs and sends push notifications through the Boxcar.io gateway.

use shadow_rs::shadow;
shadow!(build);

pub mod cli;
pub mod config;
pub mod error;
pub mod external;
pub mod logger;
pub mod services;

pub use config::{BoxcarConfig, Settings};
pub use error::{AppError, AppResult};
pub use services::notifications::{
    BoxcarProvider, NotificationData, NotificationResult, PushProvider, Recipients,
};

pub fn pkg_version() -> &'static str {
    build::PKG_VERSION
}

pub fn clap_long_version() -> &'static str {
    build::CLAP_LONG_VERSION
}
