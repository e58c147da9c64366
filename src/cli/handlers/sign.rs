//! Sign command handler
//!
//! Prints the signature the sender would attach to a body, for comparing
//! against gateway-side diagnostics.

use crate::config::settings::Settings;
use crate::error::AppResult;
use crate::services::notifications::RequestSigner;

pub struct SignCommandHandler {
    signer: RequestSigner,
}

impl SignCommandHandler {
    pub fn new(settings: &Settings) -> AppResult<Self> {
        let endpoint = settings.boxcar.endpoint_url()?;
        Ok(Self {
            signer: RequestSigner::new(settings.boxcar.secret_key.clone(), &endpoint),
        })
    }

    /// Returns the signature and prints it with the signed host/path
    pub fn execute(&self, method: &str, body: &str) -> AppResult<String> {
        let signature = self.signer.sign(method, body)?;
        tracing::debug!(host = self.signer.host(), path = self.signer.path(), "Signed body");
        println!("{}", signature);
        Ok(signature)
    }
}
