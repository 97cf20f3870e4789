// SPDX-License-Identifier: MIT

//! cogdbg-dashboard: the terminal dashboard process.
//!
//! Unlike the daemon, the dashboard has no PID file: a second instance is
//! rejected because its bind of the rendezvous socket fails with
//! `AddrInUse`, not because of a liveness probe.

#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

use std::sync::Arc;

use cogdbg_dashboard::config::Config;
use cogdbg_dashboard::source::FsLoader;
use cogdbg_dashboard::{listener, terminal};
use tracing::info;

#[tokio::main]
async fn main() {
    if let Some(arg) = std::env::args().nth(1) {
        match arg.as_str() {
            "--version" | "-V" | "-v" => {
                println!("cogdbg-dashboard {}", env!("CARGO_PKG_VERSION"));
                return;
            }
            "--help" | "-h" | "help" => {
                println!("cogdbg-dashboard {}", env!("CARGO_PKG_VERSION"));
                println!("cog-debug dashboard — not normally invoked directly, see `cogdbg`.");
                return;
            }
            other => {
                eprintln!("error: unexpected argument '{other}'");
                std::process::exit(1);
            }
        }
    }

    if !terminal::is_tty() {
        eprintln!("cogdbg-dashboard: stdin/stdout must be a terminal");
        std::process::exit(1);
    }

    let config = match Config::load() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("cogdbg-dashboard: {e}");
            std::process::exit(1);
        }
    };

    let _log_guard = match setup_logging(&config) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("cogdbg-dashboard: failed to set up logging: {e}");
            std::process::exit(1);
        }
    };

    info!(socket = %config.socket_path.display(), "starting cog-debug dashboard");

    let listener = match listener::bind(&config.socket_path) {
        Ok(listener) => listener,
        Err(e) if e.kind() == std::io::ErrorKind::AddrInUse => {
            eprintln!("cogdbg-dashboard: another dashboard is already running");
            std::process::exit(1);
        }
        Err(e) => {
            eprintln!("cogdbg-dashboard: failed to bind {}: {e}", config.socket_path.display());
            std::process::exit(1);
        }
    };

    println!("READY");
    info!("dashboard ready, listening on {}", config.socket_path.display());

    let loader = Arc::new(FsLoader);
    let result = listener::serve(listener, loader).await;

    let _ = std::fs::remove_file(&config.socket_path);

    if let Err(e) = result {
        eprintln!("cogdbg-dashboard: {e}");
        info!(error = %e, "dashboard exiting with error");
        std::process::exit(1);
    }

    info!("dashboard shutting down");
}

fn setup_logging(
    config: &Config,
) -> Result<tracing_appender::non_blocking::WorkerGuard, std::io::Error> {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    if let Some(parent) = config.log_path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let file_appender = tracing_appender::rolling::never(
        config
            .log_path
            .parent()
            .unwrap_or_else(|| std::path::Path::new(".")),
        config.log_path.file_name().unwrap_or_default(),
    );
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(non_blocking))
        .init();

    Ok(guard)
}
