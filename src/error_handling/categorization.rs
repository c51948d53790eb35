//! Transport outcome and reqwest error categorization.

use anyhow::Error;

use crate::transport::{TimeoutPhase, TransportOutcome, TransportResponse};

/// A transport-level failure that may be retried.
///
/// Connection and timeout failures land here; a received HTTP response never
/// does. When the retry budget runs out this becomes a status-504
/// [`crate::RequestError`].
#[derive(Debug)]
pub(crate) struct TransientFailure {
    /// Human-readable description of what failed.
    pub message: String,
    /// The failure's cause chain.
    pub cause: Error,
}

/// Maps a transport outcome to either a received response or a transient
/// failure.
///
/// Any received status, success or error class, passes through unmodified:
/// a 404 or 500 is not reinterpreted as a client failure at this layer.
pub(crate) fn classify_outcome(
    outcome: TransportOutcome,
) -> Result<TransportResponse, TransientFailure> {
    match outcome {
        TransportOutcome::Success(response) => Ok(response),
        TransportOutcome::ConnectionFailure { cause } => Err(TransientFailure {
            message: format!("connection failure: {cause}"),
            cause,
        }),
        TransportOutcome::TimeoutFailure { phase, cause } => Err(TransientFailure {
            message: match phase {
                TimeoutPhase::Connect => format!("connect timeout: {cause}"),
                TimeoutPhase::Total => format!("request timeout: {cause}"),
            },
            cause,
        }),
    }
}

/// Categorizes a `reqwest::Error` into a transport failure variant.
///
/// Timeout errors map to [`TransportOutcome::TimeoutFailure`], with the
/// connect phase distinguished when reqwest flags the error as
/// connect-related; everything else at this level is a connection failure.
/// Errors carrying an HTTP status never reach this function, because any
/// received response is a success-shaped outcome.
pub(crate) fn outcome_from_reqwest_error(error: reqwest::Error) -> TransportOutcome {
    if error.is_timeout() {
        let phase = if error.is_connect() {
            TimeoutPhase::Connect
        } else {
            TimeoutPhase::Total
        };
        TransportOutcome::TimeoutFailure {
            phase,
            cause: error.into(),
        }
    } else {
        TransportOutcome::ConnectionFailure {
            cause: error.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::header::HeaderMap;

    fn response_with_status(status: u16) -> TransportResponse {
        TransportResponse {
            status,
            headers: HeaderMap::new(),
            body: Vec::new(),
            effective_uri: "https://example.com/".into(),
        }
    }

    #[test]
    fn received_responses_pass_through_whatever_the_status() {
        for status in [200, 301, 404, 500, 503] {
            let outcome = TransportOutcome::Success(response_with_status(status));
            let response = classify_outcome(outcome).unwrap();
            assert_eq!(response.status, status);
        }
    }

    #[test]
    fn connection_failures_are_transient() {
        let outcome = TransportOutcome::ConnectionFailure {
            cause: anyhow::anyhow!("connection refused"),
        };
        let failure = classify_outcome(outcome).unwrap_err();
        assert!(failure.message.contains("connection failure"));
        assert!(failure.cause.to_string().contains("refused"));
    }

    #[test]
    fn timeout_failures_name_their_phase() {
        let connect = TransportOutcome::TimeoutFailure {
            phase: TimeoutPhase::Connect,
            cause: anyhow::anyhow!("deadline elapsed"),
        };
        assert!(classify_outcome(connect)
            .unwrap_err()
            .message
            .contains("connect timeout"));

        let total = TransportOutcome::TimeoutFailure {
            phase: TimeoutPhase::Total,
            cause: anyhow::anyhow!("deadline elapsed"),
        };
        assert!(classify_outcome(total)
            .unwrap_err()
            .message
            .contains("request timeout"));
    }

    // Note: categorizing real reqwest::Error instances requires a live
    // socket to produce them; outcome_from_reqwest_error is exercised
    // end-to-end in tests/integration_test.rs against httptest servers.
}
