//! # logo-overlay
//!
//! Command line entry point.

use clap::Parser;
use overlay_cli::{commands, CliArgs, Command, OverlayConfig};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,overlay_core=debug,overlay_renderer=debug"));

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_target(true)
        .with_thread_ids(false)
        .with_file(true)
        .with_line_number(true)
        .with_writer(std::io::stderr);

    // Use JSON format when RUST_LOG_FORMAT=json
    if std::env::var("RUST_LOG_FORMAT").as_deref() == Ok("json") {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt_layer.json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt_layer)
            .init();
    }
}

fn main() -> anyhow::Result<()> {
    init_tracing();

    let args = CliArgs::parse();
    let config = OverlayConfig::from(&args);
    tracing::debug!(?config, "configuration loaded");

    match &args.command {
        Command::Compose(compose) => {
            let path = commands::compose(&config, compose)?;
            println!("{}", path.display());
        }
        Command::Preview(preview) => {
            let path = commands::preview(&config, preview)?;
            println!("{}", path.display());
        }
        Command::Replay(replay) => {
            let outcome = commands::replay(&config, replay)?;
            if outcome.report.rejected > 0 {
                tracing::warn!(
                    rejected = outcome.report.rejected,
                    "some steps were rejected"
                );
            }
            if let Some(state) = outcome.state_json {
                println!("{state}");
            }
            if let Some(path) = outcome.output {
                println!("{}", path.display());
            }
        }
    }

    Ok(())
}
