//! The transport seam.
//!
//! Everything network-shaped happens behind [`TransportAdapter`]: one
//! attempt in, one [`TransportOutcome`] out. The production implementation
//! is [`ReqwestTransport`]; tests inject deterministic fakes with fixed
//! delays, failures, or redirect chains instead of touching the network.

mod reqwest;

pub use self::reqwest::ReqwestTransport;

use anyhow::Error;
use async_trait::async_trait;
use ::reqwest::header::HeaderMap;

use crate::request::RequestDescriptor;

/// Which timeout knob expired.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeoutPhase {
    /// The connect-phase timeout elapsed before a connection was made.
    Connect,
    /// The total-request timeout elapsed.
    Total,
}

/// A response the transport actually received, before classification.
#[derive(Debug, Clone)]
pub struct TransportResponse {
    /// HTTP status code as received.
    pub status: u16,
    /// Response headers; `HeaderMap` keeps names lower-cased.
    pub headers: HeaderMap,
    /// Raw body bytes. If the adapter performed transparent decompression,
    /// these are the decompressed bytes.
    pub body: Vec<u8>,
    /// The URI actually reached after any redirect-following the transport
    /// performed internally.
    pub effective_uri: String,
}

/// The raw result of one network attempt.
///
/// Any received response is a `Success` outcome regardless of its HTTP
/// status; only connection and timeout problems are transport-level
/// failures.
#[derive(Debug)]
pub enum TransportOutcome {
    /// A response was received (any status, 2xx through 5xx).
    Success(TransportResponse),
    /// Socket, DNS, or connection-level failure before a response arrived.
    ConnectionFailure {
        /// The failure's cause chain.
        cause: Error,
    },
    /// A connect-phase or total-request timeout expired.
    TimeoutFailure {
        /// Which timeout knob expired.
        phase: TimeoutPhase,
        /// The failure's cause chain.
        cause: Error,
    },
}

/// Performs the actual network call for one attempt.
///
/// Contract: a returned outcome with a status code is always
/// [`TransportOutcome::Success`], whatever the status value. Adapters that
/// honor `RequestDescriptor::gzip` must hand back transparently
/// decompressed body bytes; the stale `content-encoding` header is stripped
/// downstream.
#[async_trait]
pub trait TransportAdapter: Send + Sync {
    /// Sends the request once and reports the raw outcome.
    async fn send(&self, request: &RequestDescriptor) -> TransportOutcome;
}
