// SPDX-License-Identifier: MIT

//! Client side of the daemon's newline-delimited JSON protocol.
//!
//! Connects with a bounded, env-var-overridable retry loop and performs a
//! single request/response exchange — there is no version file, no
//! query/action/signal distinction, since the daemon has no persisted
//! version marker of its own.

use std::path::PathBuf;
use std::time::{Duration, Instant};

use cogdbg_core::{ToolRequest, ToolResponse};
use thiserror::Error;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::UnixStream;

use crate::daemon_process::start_daemon_background;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("daemon not running")]
    DaemonNotRunning,

    #[error("failed to start daemon: {0}")]
    DaemonStartFailed(String),

    #[error("timed out waiting for daemon to start")]
    DaemonStartTimeout,

    #[error("daemon response was not valid JSON: {0}")]
    Protocol(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("connection closed before a response was received")]
    ConnectionClosed,
}

fn env_duration_ms(var: &str, default: Duration) -> Duration {
    std::env::var(var)
        .ok()
        .and_then(|s| s.parse::<u64>().ok())
        .map(Duration::from_millis)
        .unwrap_or(default)
}

fn timeout_connect() -> Duration {
    env_duration_ms("COGDBG_TIMEOUT_CONNECT_MS", Duration::from_secs(5))
}

fn poll_interval() -> Duration {
    env_duration_ms("COGDBG_CONNECT_POLL_MS", Duration::from_millis(50))
}

/// One connection, good for exactly one request/response exchange — the
/// daemon closes the connection after answering.
pub struct DaemonClient {
    stream: UnixStream,
}

impl DaemonClient {
    /// Connect to an already-running daemon; fails if there is none.
    pub async fn connect(socket_path: &PathBuf) -> Result<Self, ClientError> {
        match UnixStream::connect(socket_path).await {
            Ok(stream) => Ok(Self { stream }),
            Err(e) if matches!(e.kind(), std::io::ErrorKind::NotFound | std::io::ErrorKind::ConnectionRefused) => {
                Err(ClientError::DaemonNotRunning)
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Connect to the daemon, starting it in the background and waiting
    /// for the socket to come up if it isn't already running.
    pub async fn connect_or_start(socket_path: &PathBuf) -> Result<Self, ClientError> {
        match Self::connect(socket_path).await {
            Ok(client) => Ok(client),
            Err(ClientError::DaemonNotRunning) => {
                let _child = start_daemon_background()?;
                Self::connect_with_retry(socket_path, timeout_connect()).await
            }
            Err(e) => Err(e),
        }
    }

    async fn connect_with_retry(socket_path: &PathBuf, timeout: Duration) -> Result<Self, ClientError> {
        let start = Instant::now();
        loop {
            match UnixStream::connect(socket_path).await {
                Ok(stream) => return Ok(Self { stream }),
                Err(_) if start.elapsed() < timeout => {
                    tokio::time::sleep(poll_interval()).await;
                }
                Err(_) => return Err(ClientError::DaemonStartTimeout),
            }
        }
    }

    /// Send one request and read back exactly one response.
    pub async fn call(mut self, request: &ToolRequest) -> Result<ToolResponse, ClientError> {
        let mut line = serde_json::to_vec(request)?;
        line.push(b'\n');
        self.stream.write_all(&line).await?;
        self.stream.flush().await?;

        let mut reader = BufReader::new(self.stream);
        let mut response_line = String::new();
        let n = reader.read_line(&mut response_line).await?;
        if n == 0 {
            return Err(ClientError::ConnectionClosed);
        }
        Ok(serde_json::from_str(response_line.trim_end())?)
    }
}

#[cfg(test)]
#[path = "client_tests.rs"]
mod tests;
