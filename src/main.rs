mod app;
mod config;
mod dispatch;
mod error;
mod event;
mod github;
mod labels;
mod settings;
#[cfg(test)]
mod test_utils;

use app::App;
use clap::Parser;
use config::Config;
use event::LabelEvent;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser)]
#[command(name = "auto-label", about = "Apply api: labels to GitHub issues")]
struct Cli {
    #[arg(long, env = "GITHUB_EVENT_NAME", help = "Event name, e.g. issues")]
    event: String,

    #[arg(long, env = "GITHUB_EVENT_PATH", help = "Path to the event payload")]
    payload: PathBuf,

    #[arg(long, short, help = "Path to config.toml")]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let config = Config::load(cli.config.as_deref());

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.log_filter));
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(filter)
        .init();

    let payload = std::fs::read(&cli.payload)?;
    let Some(event) = LabelEvent::from_webhook(&cli.event, &payload)? else {
        info!(event = %cli.event, "nothing to do for this event");
        return Ok(());
    };

    let app = App::new(&config)?;
    app.handle(&event).await;

    Ok(())
}
