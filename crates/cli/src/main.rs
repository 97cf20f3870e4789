// SPDX-License-Identifier: MIT

//! cogdbg: operator CLI for the cog-debug daemon.

use std::io::Read;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use cogdbg::client::DaemonClient;
use cogdbg::daemon_process::{start_daemon_background, stop_daemon};
use cogdbg_core::ToolRequest;
use cogdbg_daemon::Config;

#[derive(Parser)]
#[command(name = "cogdbg", version, about = "cog-debug daemon CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Send one tool call to the daemon and print its response.
    Call {
        /// Tool name, e.g. `launch`, `run`, `set_breakpoint`.
        #[arg(long)]
        tool: String,
        /// JSON arguments object. If omitted, read from stdin; if stdin
        /// is empty too, an empty object is sent.
        #[arg(long)]
        args: Option<String>,
    },
    /// Start the daemon in the background if it isn't already running.
    Start,
    /// Stop a running daemon.
    Stop,
    /// Report whether the daemon appears to be running.
    Status,
}

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("cogdbg: {e}");
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    let cli = Cli::parse();
    let config = Config::load().map_err(|e| anyhow::anyhow!("{e}"))?;

    match cli.command {
        Commands::Call { tool, args } => call(&config, tool, args).await,
        Commands::Start => start(&config),
        Commands::Stop => {
            stop_daemon(&config);
            Ok(())
        }
        Commands::Status => status(&config),
    }
}

async fn call(config: &Config, tool: String, args: Option<String>) -> Result<()> {
    let args_text = match args {
        Some(text) => text,
        None => {
            let mut text = String::new();
            std::io::stdin().read_to_string(&mut text).context("reading args from stdin")?;
            text
        }
    };
    let args_value = if args_text.trim().is_empty() {
        serde_json::Value::Object(Default::default())
    } else {
        serde_json::from_str(&args_text).context("parsing --args as JSON")?
    };

    let request = ToolRequest { tool, args: args_value };
    let client = DaemonClient::connect_or_start(&config.socket_path)
        .await
        .context("connecting to daemon")?;
    let response = client.call(&request).await.context("calling daemon")?;

    println!("{}", serde_json::to_string(&response)?);
    if !response.is_ok() {
        bail!("daemon returned an error");
    }
    Ok(())
}

fn start(config: &Config) -> Result<()> {
    use cogdbg_daemon::pidfile::Liveness;

    if let Liveness::Running(pid) = cogdbg_daemon::pidfile::check(&config.pid_path) {
        println!("daemon already running (pid {pid})");
        return Ok(());
    }
    start_daemon_background().context("starting daemon")?;
    println!("daemon starting");
    Ok(())
}

fn status(config: &Config) -> Result<()> {
    use cogdbg_daemon::pidfile::Liveness;

    match cogdbg_daemon::pidfile::check(&config.pid_path) {
        Liveness::Running(pid) => println!("running (pid {pid})"),
        Liveness::Stale(pid) => println!("not running (stale pid file for {pid})"),
        Liveness::NoFile => println!("not running"),
    }
    Ok(())
}
