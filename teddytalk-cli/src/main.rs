use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use tracing::info;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

mod app;
mod commands;

use crate::app::App;

#[derive(Parser, Debug)]
#[command(name = "teddytalk")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "TeddyTalk - chat with a teddy bear that answers in your voice")]
struct Args {
    /// Load settings from a specific file instead of ~/.teddytalk/settings.toml
    #[arg(long, value_name = "PATH")]
    settings: Option<PathBuf>,

    /// Run fully offline with the mock chat and voice providers
    #[arg(long)]
    mock: bool,

    /// Directory to write synthesized replies to
    #[arg(long, value_name = "DIR")]
    audio_dir: Option<PathBuf>,
}

fn main() -> Result<()> {
    setup_tracing()?;

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    runtime.block_on(async_main())
}

async fn async_main() -> Result<()> {
    let args = Args::parse();

    info!(
        mock = args.mock,
        settings = ?args.settings,
        "CLI startup"
    );

    let mut app = App::new(args.settings, args.mock, args.audio_dir)?;
    app.run().await
}

fn setup_tracing() -> Result<()> {
    use tracing_subscriber::fmt;

    // Log to a file so the interactive prompt stays clean
    let home = std::env::var("HOME").unwrap_or_else(|_| "/tmp".to_string());
    let trace_dir = PathBuf::from(home).join(".teddytalk").join("trace");
    std::fs::create_dir_all(&trace_dir)?;

    let log_file = trace_dir.join("teddytalk.log");
    let file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_file)?;

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_writer(file)
                .with_ansi(false)
                .with_target(true),
        )
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    info!("Tracing initialized to {:?}", log_file);
    Ok(())
}
