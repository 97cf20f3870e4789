// SPDX-License-Identifier: MIT

//! Wire format for the daemon's request socket: one JSON object per line,
//! newline-delimited rather than length-prefixed, so a request can be
//! produced with a plain `echo | nc` against the socket.

use cogdbg_core::{DAEMON_READ_LIMIT_BYTES, ToolRequest, ToolResponse};
use thiserror::Error;
use tokio::io::{AsyncBufReadExt, AsyncReadExt, AsyncWriteExt};

#[derive(Debug, Error)]
pub enum ProtocolError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("request not valid JSON: {0}")]
    Json(serde_json::Error),

    #[error("request shape invalid: {0}")]
    InvalidShape(String),

    #[error("missing or wrongly-typed argument: {0}")]
    BadArgument(String),

    #[error("connection closed before a complete line was read")]
    ConnectionClosed,

    #[error("request exceeded the {0} byte read limit before a newline")]
    TooLarge(usize),
}

/// Read up to [`DAEMON_READ_LIMIT_BYTES`] from `reader` until a newline or
/// EOF, then parse one `ToolRequest`.
///
/// An immediate EOF (zero bytes read) is a closed connection, not a parse
/// error — callers treat it as "nothing to do" rather than logging it as a
/// protocol failure. Parsing happens in three steps so a malformed request,
/// a well-formed-but-wrongly-shaped one, and one merely missing `tool` are
/// told apart: "parse error" is `-32700`, "request shape invalid" (not an
/// object) is `-32600`, and a missing or non-string `tool` is `-32602`,
/// same as any other missing/wrongly-typed argument.
pub async fn read_request<R>(reader: &mut R) -> Result<ToolRequest, ProtocolError>
where
    R: tokio::io::AsyncBufRead + Unpin,
{
    let line = read_line(reader).await?;
    if line.is_empty() {
        return Err(ProtocolError::ConnectionClosed);
    }
    let value: serde_json::Value = serde_json::from_slice(&line).map_err(ProtocolError::Json)?;
    if !value.is_object() {
        return Err(ProtocolError::InvalidShape(
            "request must be a JSON object".to_owned(),
        ));
    }
    if !matches!(value.get("tool"), Some(serde_json::Value::String(_))) {
        return Err(ProtocolError::BadArgument(
            "missing or non-string `tool` field".to_owned(),
        ));
    }
    serde_json::from_value(value).map_err(ProtocolError::Json)
}

/// Read a single newline-terminated (or EOF-terminated) line, capped at
/// [`DAEMON_READ_LIMIT_BYTES`]. The trailing newline, if any, is excluded.
async fn read_line<R>(reader: &mut R) -> Result<Vec<u8>, ProtocolError>
where
    R: tokio::io::AsyncBufRead + Unpin,
{
    let mut buf = Vec::new();
    let n = reader
        .take(DAEMON_READ_LIMIT_BYTES as u64)
        .read_until(b'\n', &mut buf)
        .await?;
    if n == 0 {
        return Ok(Vec::new());
    }
    if buf.last() == Some(&b'\n') {
        buf.pop();
    } else if buf.len() as u64 >= DAEMON_READ_LIMIT_BYTES as u64 {
        return Err(ProtocolError::TooLarge(DAEMON_READ_LIMIT_BYTES));
    }
    Ok(buf)
}

/// Write a response followed by `\n`.
pub async fn write_response<W>(writer: &mut W, response: &ToolResponse) -> Result<(), ProtocolError>
where
    W: tokio::io::AsyncWrite + Unpin,
{
    let mut data = serde_json::to_vec(response).map_err(ProtocolError::Json)?;
    data.push(b'\n');
    writer.write_all(&data).await?;
    writer.flush().await?;
    Ok(())
}

#[cfg(test)]
#[path = "protocol_wire_tests.rs"]
mod tests;
