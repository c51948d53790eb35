//! Error types and outcome classification.
//!
//! This module provides:
//! - The caller-visible [`RequestError`] type
//! - Classification of transport outcomes into pass-through responses vs
//!   transient failures
//! - Mapping of `reqwest` errors onto transport failure variants
//!
//! The taxonomy is deliberately small. Configuration errors are detected
//! before any network attempt and never retried. Connection and timeout
//! failures are retried up to the budget and surface as status 504 when the
//! budget is exhausted. A received HTTP response is *never* an error at this
//! layer, whatever its status code: callers inspect `status` themselves.

mod categorization;

pub(crate) use categorization::{classify_outcome, outcome_from_reqwest_error, TransientFailure};

use thiserror::Error;

/// Terminal error for a logical request.
///
/// Every rejected request carries a numeric status and a message; the
/// underlying cause chain is preserved for diagnostics where one exists.
#[derive(Debug, Error)]
pub enum RequestError {
    /// Malformed or missing input, detected before any network attempt.
    #[error("invalid request: {0}")]
    Configuration(String),

    /// All transport attempts failed with connection or timeout errors.
    #[error("{message}")]
    GatewayTimeout {
        /// Description of the final transport failure.
        message: String,
        /// Total transport attempts made, including the first.
        attempts: u32,
        /// The final transport failure's cause chain, when available.
        cause: Option<anyhow::Error>,
    },
}

impl RequestError {
    /// The numeric status for this error: 504 for any connection/timeout
    /// failure, 400 for configuration errors.
    pub fn status(&self) -> u16 {
        match self {
            RequestError::Configuration(_) => 400,
            RequestError::GatewayTimeout { .. } => 504,
        }
    }

    /// The underlying cause, when one was preserved.
    pub fn cause(&self) -> Option<&anyhow::Error> {
        match self {
            RequestError::Configuration(_) => None,
            RequestError::GatewayTimeout { cause, .. } => cause.as_ref(),
        }
    }

    pub(crate) fn configuration(message: impl Into<String>) -> Self {
        RequestError::Configuration(message.into())
    }
}
