// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use serde_json::Value;
use thiserror::Error;

/// Failure talking to the finance backend.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("not authorized: {0}")]
    Unauthorized(String),
    #[error("access denied: {0}")]
    Forbidden(String),
    #[error("not found: {0}")]
    NotFound(String),
    #[error("server returned {status}: {message}")]
    Status { status: u16, message: String },
    #[error("unexpected response body: {0}")]
    Decode(String),
}

impl ApiError {
    /// Build an error from a non-success status and whatever body came with it.
    pub fn from_status(status: u16, body: &str) -> Self {
        let message = extract_message(body).unwrap_or_else(|| format!("HTTP {}", status));
        match status {
            401 => ApiError::Unauthorized(message),
            403 => ApiError::Forbidden(message),
            404 => ApiError::NotFound(message),
            _ => ApiError::Status { status, message },
        }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Unauthorized(_) => Some(401),
            ApiError::Forbidden(_) => Some(403),
            ApiError::NotFound(_) => Some(404),
            ApiError::Status { status, .. } => Some(*status),
            ApiError::Transport { source, .. } => source.status().map(|s| s.as_u16()),
            ApiError::Decode(_) => None,
        }
    }
}

/// Best-effort human message from an error body.
///
/// Understands the shapes the backend produces: `{"message": ..}`,
/// `{"Message": ..}`, `{"error": ..}`, ASP.NET problem details
/// (`title` plus an `errors` map of field -> [messages]) and plain text.
pub fn extract_message(body: &str) -> Option<String> {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        return None;
    }
    let Ok(v) = serde_json::from_str::<Value>(trimmed) else {
        return Some(trimmed.to_string());
    };
    match &v {
        Value::String(s) if !s.trim().is_empty() => return Some(s.trim().to_string()),
        Value::Object(map) => {
            for key in ["message", "Message", "error", "detail"] {
                if let Some(Value::String(s)) = map.get(key) {
                    if !s.trim().is_empty() {
                        return Some(s.trim().to_string());
                    }
                }
            }
            if let Some(first) = map.get("errors").and_then(first_error) {
                return Some(first);
            }
            if let Some(Value::String(s)) = map.get("title") {
                return Some(s.clone());
            }
        }
        _ => {}
    }
    None
}

fn first_error(v: &Value) -> Option<String> {
    match v {
        Value::String(s) => Some(s.clone()),
        Value::Array(items) => items.iter().find_map(first_error),
        Value::Object(map) => map.values().find_map(first_error),
        _ => None,
    }
}

/// Validation failure on user input, raised before anything is sent.
#[derive(Debug, Error, PartialEq)]
pub enum FormError {
    #[error("{0} must not be empty")]
    Empty(&'static str),
    #[error("{0} must be greater than zero")]
    NotPositive(&'static str),
    #[error("{start_field} ({start}) must not be after {end_field} ({end})")]
    DateOrder {
        start_field: &'static str,
        start: String,
        end_field: &'static str,
        end: String,
    },
    #[error("deadline {0} must be in the future")]
    DeadlineInPast(String),
    #[error("invalid color '{0}', expected #RRGGBB")]
    InvalidColor(String),
}

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("upload of {key} failed: {source}")]
    Upload {
        key: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("object store rejected {key}: HTTP {status}")]
    Rejected { key: String, status: u16 },
    #[error("invalid report filename '{0}'")]
    BadFilename(String),
}
