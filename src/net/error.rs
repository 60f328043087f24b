//! Caller-facing gateway errors.
//!
//! ERROR HANDLING
//! ==============
//! Every failure a view can see collapses to one message: the backend's
//! own text when it sent one, otherwise a per-operation fallback.

#[cfg(test)]
#[path = "error_test.rs"]
mod error_test;

use super::transport::TransportError;
use super::types::ApiResponse;
use crate::state::storage::StorageError;

pub const REQUEST_FAILED: &str = "request failed";
pub const LOGIN_FAILED: &str = "login failed";
pub const REGISTER_FAILED: &str = "registration failed";

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ApiError {
    /// Non-2xx HTTP status.
    #[error("{message}")]
    Status { status: u16, message: String },
    /// 2xx response whose envelope `code` signals failure.
    #[error("{message}")]
    Rejected { code: i64, message: String },
    #[error("{0}")]
    Transport(String),
    #[error("malformed response: {0}")]
    Decode(String),
    #[error("could not persist session: {0}")]
    Storage(#[from] StorageError),
}

impl ApiError {
    /// Build a status error from a failed response.
    #[must_use]
    pub fn from_response(response: &ApiResponse, fallback: &str) -> Self {
        Self::Status {
            status: response.status,
            message: response.message().unwrap_or(fallback).to_owned(),
        }
    }

    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Text suitable for showing to the user.
    #[must_use]
    pub fn message(&self) -> String {
        self.to_string()
    }
}

impl From<TransportError> for ApiError {
    fn from(e: TransportError) -> Self {
        Self::Transport(e.to_string())
    }
}
