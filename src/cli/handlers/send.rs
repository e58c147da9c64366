//! Send command handler

use crate::cli::parser::SendArgs;
use crate::config::settings::Settings;
use crate::error::AppResult;
use crate::services::notifications::{BoxcarProvider, NotificationResult, SignedRequest};

/// Handler for the send command
pub struct SendCommandHandler {
    provider: BoxcarProvider,
}

impl SendCommandHandler {
    pub fn new(settings: &Settings) -> AppResult<Self> {
        Ok(Self {
            provider: BoxcarProvider::new(settings.boxcar.clone())?,
        })
    }

    /// Execute the send command
    ///
    /// # Errors
    /// - Invalid `--data` or payload composition errors
    /// - Transport or gateway errors (if not dry-run)
    pub async fn execute(&self, args: &SendArgs) -> AppResult<()> {
        let data = args.notification_data()?;

        if args.dry_run {
            let request = self.provider.prepare(args.to.clone(), &data)?;
            println!("{}", render_dry_run(&request));
            return Ok(());
        }

        let result = self
            .provider
            .handle_notification(args.to.clone(), &data)
            .await?;
        tracing::info!(
            recipients = args.to.len(),
            status = result.status_code,
            duration_ms = result.duration_ms,
            "Push accepted by gateway"
        );
        println!("{}", render_result(&result));
        Ok(())
    }
}

fn render_dry_run(request: &SignedRequest) -> String {
    format!(
        "{} {}\ncontent-type: application/json\n\n{}",
        request.method, request.url, request.body
    )
}

fn render_result(result: &NotificationResult) -> String {
    match (&result.status_code, &result.response) {
        (Some(status), Some(body)) if !body.is_empty() => format!("{} {}", status, body),
        (Some(status), _) => status.to_string(),
        (None, _) => "sent".to_string(),
    }
}
