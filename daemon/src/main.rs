//! hometime: shows the progress of the work day and today's calendar on a
//! WLED controlled LED strip.

mod calendar;
mod config;
mod server;
mod wled;

use clap::Parser;
use env_logger::Env;
use log::info;
use tokio::signal::unix::{SignalKind, signal};

use crate::config::Cli;
use crate::server::HometimeServer;

/// Asynchronously waits for a SIGINT, SIGTERM, or SIGHUP signal.
async fn signal_handler() -> Result<(), Box<dyn std::error::Error>> {
    let mut sigint = signal(SignalKind::interrupt())?;
    let mut sigterm = signal(SignalKind::terminate())?;
    let mut sighup = signal(SignalKind::hangup())?;

    tokio::select! {
        _ = sigint.recv() => {
            info!("SIGINT received. Initiating graceful shutdown.");
        }
        _ = sigterm.recv() => {
            info!("SIGTERM received. Initiating graceful shutdown.");
        }
        _ = sighup.recv() => {
            info!("SIGHUP received. Initiating graceful shutdown.");
        }
    }
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let cfg = config::load(&cli)?;

    if cli.dump_config {
        // Pretty YAML of effective config (nice for debugging)
        println!("{}", serde_yaml::to_string(&cfg)?);
        return Ok(());
    }

    let level = cfg.log_level.clone().unwrap_or_else(|| "info".into());
    env_logger::Builder::from_env(Env::default().default_filter_or(level))
        .format_timestamp_secs()
        .init();

    info!("{} v.{} starting", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));

    let settings = cfg.resolve()?;
    let mut server = HometimeServer::new(settings, cli.dry_run)?;

    if cli.once {
        server.update_display().await;
        return Ok(());
    }

    tokio::select! {
        res = signal_handler() => {
            if let Err(e) = res {
                log::error!("Signal handler failed: {e}");
            }
        }
        () = server.run() => {}
    }

    server.stop().await;
    Ok(())
}
