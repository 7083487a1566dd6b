mod app;
mod handler;
mod trigger;

use clap::Parser;

/// Local entry point for the sync job. In the cloud the handler is invoked
/// with the runtime's trigger event; locally we synthesize one.
#[derive(Debug, Parser)]
#[command(name = "storesync")]
#[command(about = "ESB store catalog → PostgreSQL synchronization job")]
struct Cli {
    /// Raw trigger event as JSON; defaults to a local invocation event.
    #[arg(long)]
    event: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let event = cli
        .event
        .unwrap_or_else(|| r#"{"body":"local"}"#.to_owned());

    let response = handler::handle(&event).await?;
    tracing::info!(status = response.status_code, body = %response.body, "run finished");
    Ok(())
}
