//! Entry point shared by every trigger kind: configuration, logging,
//! pipeline execution, and failure notification.

use anyhow::Context;
use serde::Serialize;

use storesync_core::{Config, Mode};
use storesync_notify::TelegramNotifier;

use crate::app::App;
use crate::trigger::{self, Trigger};

/// Result reported back to the invoking runtime.
#[derive(Debug, Serialize)]
pub struct Response {
    #[serde(rename = "statusCode")]
    pub status_code: u16,
    pub body: String,
}

/// Handles one invocation: loads configuration, classifies the trigger,
/// runs the pipeline, and notifies the operator channel on fatal failure.
///
/// # Errors
///
/// Returns the fatal configuration, source, or destination error. The
/// notification attempt never masks it — notifier failures are logged and
/// dropped.
pub async fn handle(raw_event: &str) -> anyhow::Result<Response> {
    let config = storesync_core::load_config().context("loading configuration")?;
    let trigger = trigger::detect(raw_event);
    init_logging(&config.app.log_level);

    if config.app.mode == Mode::Dev && trigger == Trigger::Local {
        tracing::debug!(config = ?config, "running in development mode");
    }
    tracing::info!(
        app = %config.app.name,
        version = %config.app.version,
        trigger = %trigger,
        "starting store sync"
    );

    if let Err(err) = run_pipeline(&config).await {
        notify_failure(&config, &err).await;
        return Err(err);
    }

    tracing::info!("store sync finished");
    Ok(Response {
        status_code: 200,
        body: "OK".to_owned(),
    })
}

async fn run_pipeline(config: &Config) -> anyhow::Result<()> {
    let app = App::new(config).await?;
    app.run().await
}

/// Best-effort operator notification; failures are logged, never escalated.
async fn notify_failure(config: &Config, err: &anyhow::Error) {
    let notifier = match TelegramNotifier::new(&config.telegram) {
        Ok(notifier) => notifier,
        Err(e) => {
            tracing::error!(error = %e, "failed to construct failure notifier");
            return;
        }
    };

    let message = format!("{}: store sync failed: {err:#}", config.app.name);
    if let Err(e) = notifier.send(&message).await {
        tracing::error!(error = %e, "failed to send failure notification");
    }
}

fn init_logging(level: &str) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_new(level).unwrap_or_else(|_| EnvFilter::new("info"));
    // try_init: the handler may run more than once in-process (tests, local
    // reruns); only the first initialization wins.
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}
