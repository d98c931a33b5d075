// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Client error taxonomy.

use serde::{Deserialize, Serialize};

/// A single field-level validation failure as reported by the API.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FieldError {
    /// Location path, e.g. `["body", "name"]`. Elements may be strings or
    /// array indices.
    pub loc: Vec<serde_json::Value>,
    pub msg: String,
    #[serde(rename = "type")]
    pub kind: String,
}

/// Structured HTTP 422 payload: a list of field-level errors.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ValidationErrors {
    pub detail: Vec<FieldError>,
}

/// Errors surfaced by the API client.
///
/// `Request` covers every non-2xx outcome as well as transport failures,
/// timeouts, and cancellation (the latter three carry a sentinel status of
/// 0). `Validation` is the 422 case with its structured payload preserved so
/// callers can map errors back onto form fields.
///
/// Clonable so a single refresh outcome can be distributed to every request
/// waiting on it.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ApiError {
    #[error("{message} (status {status})")]
    Request { status: u16, message: String, body: Option<serde_json::Value> },
    #[error("validation failed: {} field error(s)", .errors.detail.len())]
    Validation { errors: ValidationErrors },
}

impl ApiError {
    /// HTTP status of the failed request. 0 for timeout, cancellation, and
    /// transport failures; 422 for validation errors.
    pub fn status(&self) -> u16 {
        match self {
            Self::Request { status, .. } => *status,
            Self::Validation { .. } => 422,
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        self.status() == 401
    }

    pub(crate) fn timeout() -> Self {
        Self::Request { status: 0, message: "request timed out".to_owned(), body: None }
    }

    pub(crate) fn cancelled() -> Self {
        Self::Request { status: 0, message: "request cancelled".to_owned(), body: None }
    }

    pub(crate) fn network(err: &reqwest::Error) -> Self {
        Self::Request { status: 0, message: format!("network error: {err}"), body: None }
    }
}
