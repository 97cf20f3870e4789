// SPDX-License-Identifier: MIT

//! cogdbgd: the cog-debug daemon process.
//!
//! Owns the rendezvous socket, the in-memory session table, and a
//! best-effort connection to the dashboard socket. Exactly one instance may
//! run per UID; a second invocation detects the live PID file and exits.

#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

use std::sync::Arc;

use cogdbg_daemon::{config::Config, event_emitter::EventEmitter, listener, pidfile, session_manager::SessionManager, signal};
use tracing::info;

#[tokio::main]
async fn main() {
    if let Some(arg) = std::env::args().nth(1) {
        match arg.as_str() {
            "--version" | "-V" | "-v" => {
                println!("cogdbgd {}", env!("CARGO_PKG_VERSION"));
                return;
            }
            "--help" | "-h" | "help" => {
                println!("cogdbgd {}", env!("CARGO_PKG_VERSION"));
                println!("cog-debug daemon — not normally invoked directly, see `cogdbg`.");
                return;
            }
            other => {
                eprintln!("error: unexpected argument '{other}'");
                std::process::exit(1);
            }
        }
    }

    let config = match Config::load() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("cogdbgd: {e}");
            std::process::exit(1);
        }
    };

    match pidfile::check(&config.pid_path) {
        pidfile::Liveness::Running(pid) => {
            eprintln!("cogdbgd is already running (pid {pid})");
            std::process::exit(1);
        }
        pidfile::Liveness::Stale(_) | pidfile::Liveness::NoFile => {}
    }

    let _log_guard = match setup_logging(&config) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("cogdbgd: failed to set up logging: {e}");
            std::process::exit(1);
        }
    };

    info!(socket = %config.socket_path.display(), "starting cog-debug daemon");

    let listener = match listener::bind(&config.socket_path) {
        Ok(listener) => listener,
        Err(e) => {
            eprintln!("cogdbgd: failed to bind {}: {e}", config.socket_path.display());
            std::process::exit(1);
        }
    };

    if let Err(e) = pidfile::write_current(&config.pid_path) {
        eprintln!("cogdbgd: failed to write pid file: {e}");
        std::process::exit(1);
    }

    signal::install(&config.socket_path, &config.pid_path);

    let events = EventEmitter::new(config.dashboard_socket_path.clone());
    events.connect().await;

    let sessions = Arc::new(SessionManager::new());

    println!("READY");
    info!("daemon ready, listening on {}", config.socket_path.display());

    listener::serve(listener, sessions, events).await;

    info!("daemon shutting down");
    let _ = std::fs::remove_file(&config.socket_path);
    pidfile::remove(&config.pid_path);
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
