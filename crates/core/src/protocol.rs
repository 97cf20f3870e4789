// SPDX-License-Identifier: MIT

//! The daemon's request/response frame: one JSON object per line.

use serde::{Deserialize, Serialize};

/// `{"tool": "<name>", "args": { … }}`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolRequest {
    pub tool: String,
    #[serde(default)]
    pub args: serde_json::Value,
}

/// An error payload embedded in a failure response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolErrorPayload {
    pub code: i32,
    pub message: String,
}

/// `{"ok": true, "result": <raw-json>}` or
/// `{"ok": false, "error": {"code": <int>, "message": "<string>"}}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ToolResponse {
    Ok { ok: OkTag, result: serde_json::Value },
    Err { ok: ErrTag, error: ToolErrorPayload },
}

/// Serializes/deserializes only as the JSON literal `true`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OkTag;

/// Serializes/deserializes only as the JSON literal `false`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ErrTag;

impl Serialize for OkTag {
    fn serialize<S: serde::Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_bool(true)
    }
}

impl<'de> Deserialize<'de> for OkTag {
    fn deserialize<D: serde::Deserializer<'de>>(d: D) -> Result<Self, D::Error> {
        if bool::deserialize(d)? {
            Ok(OkTag)
        } else {
            Err(serde::de::Error::custom("expected `true`"))
        }
    }
}

impl Serialize for ErrTag {
    fn serialize<S: serde::Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_bool(false)
    }
}

impl<'de> Deserialize<'de> for ErrTag {
    fn deserialize<D: serde::Deserializer<'de>>(d: D) -> Result<Self, D::Error> {
        if bool::deserialize(d)? {
            Err(serde::de::Error::custom("expected `false`"))
        } else {
            Ok(ErrTag)
        }
    }
}

impl ToolResponse {
    pub fn ok(result: serde_json::Value) -> Self {
        Self::Ok { ok: OkTag, result }
    }

    pub fn err(code: i32, message: impl Into<String>) -> Self {
        Self::Err {
            ok: ErrTag,
            error: ToolErrorPayload {
                code,
                message: message.into(),
            },
        }
    }

    pub fn is_ok(&self) -> bool {
        matches!(self, Self::Ok { .. })
    }
}

#[cfg(test)]
#[path = "protocol_tests.rs"]
mod tests;
