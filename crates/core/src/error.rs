// SPDX-License-Identifier: MIT

//! Stable, JSON-RPC-adjacent error taxonomy for the tool dispatcher.

use thiserror::Error;

use crate::driver::DriverError;

/// Stable numeric codes returned on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ErrorCode {
    ParseError = -32700,
    InvalidRequest = -32600,
    InvalidParams = -32602,
    InternalError = -32603,
}

impl ErrorCode {
    pub fn as_i32(self) -> i32 {
        self as i32
    }
}

/// Errors the dispatcher can produce for a single tool call.
#[derive(Debug, Error)]
pub enum DispatchError {
    #[error("request not valid JSON: {0}")]
    Parse(String),

    #[error("request shape invalid: {0}")]
    InvalidRequest(String),

    #[error("unknown tool: {0}")]
    UnknownTool(String),

    #[error("missing or wrongly-typed argument `{0}`")]
    BadArgument(String),

    #[error("unknown session: {0}")]
    UnknownSession(String),

    #[error("not supported: {0}")]
    NotSupported(&'static str),

    #[error("driver operation failed: {0}")]
    Driver(String),

    #[error("internal error: {0}")]
    Internal(String),
}

impl DispatchError {
    /// Stable error code for this error.
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::Parse(_) => ErrorCode::ParseError,
            Self::InvalidRequest(_) => ErrorCode::InvalidRequest,
            Self::UnknownTool(_) | Self::BadArgument(_) => ErrorCode::InvalidParams,
            Self::UnknownSession(_)
            | Self::NotSupported(_)
            | Self::Driver(_)
            | Self::Internal(_) => ErrorCode::InternalError,
        }
    }

    /// Human message for the wire response. `NotSupported` keeps the literal
    /// text `"not supported"` so the dashboard can render it distinctly
    /// from a generic internal error even though both carry code -32603.
    pub fn message(&self) -> String {
        match self {
            Self::NotSupported(op) => format!("not supported: {op}"),
            other => other.to_string(),
        }
    }
}

impl From<DriverError> for DispatchError {
    fn from(err: DriverError) -> Self {
        match err {
            DriverError::NotSupported(op) => DispatchError::NotSupported(op),
            DriverError::UnknownBreakpoint(id) => {
                DispatchError::Driver(format!("unknown breakpoint id: {id}"))
            }
            DriverError::InvalidArgument(msg) => DispatchError::BadArgument(msg),
            other => DispatchError::Driver(other.to_string()),
        }
    }
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
