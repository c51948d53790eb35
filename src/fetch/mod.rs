//! Request orchestration.
//!
//! [`ResilientClient`] wires the pipeline together: normalize the call
//! shape, drive transport attempts through the retry controller, then
//! finalize the received response with redirect annotation and body
//! decoding.

use crate::error_handling::RequestError;
use crate::request::{self, RequestInput};
use crate::response::{self, ResolvedResponse};
use crate::retry;
use crate::transport::{ReqwestTransport, TransportAdapter};

/// The resilience shell around a transport.
///
/// Cheap to construct and safe to share across tasks: per-request state is
/// created inside [`request`](ResilientClient::request) and owned by that
/// call alone.
#[derive(Debug, Clone)]
pub struct ResilientClient<T = ReqwestTransport> {
    transport: T,
}

impl ResilientClient<ReqwestTransport> {
    /// Creates a client backed by the default reqwest transport.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the HTTP client cannot be built.
    pub fn new() -> Result<Self, RequestError> {
        let transport = ReqwestTransport::new().map_err(|e| {
            RequestError::configuration(format!("failed to initialize HTTP transport: {e}"))
        })?;
        Ok(Self { transport })
    }
}

impl<T: TransportAdapter> ResilientClient<T> {
    /// Creates a client over an injected transport.
    ///
    /// This is the seam tests use to substitute deterministic fake
    /// transports (fixed failures, delays, redirect chains) for the real
    /// network.
    pub fn with_transport(transport: T) -> Self {
        Self { transport }
    }

    /// Performs one logical request.
    ///
    /// Accepts either a URI string, a `(uri, options)` pair, or a
    /// [`crate::RequestOptions`] value carrying the URI. Transient transport
    /// failures are retried per the options' budget; any received HTTP
    /// response resolves successfully with its status passed through.
    ///
    /// # Errors
    ///
    /// - [`RequestError::Configuration`] when no URI resolves or an option
    ///   is invalid (no network attempt is made).
    /// - [`RequestError::GatewayTimeout`] (status 504) when every transport
    ///   attempt failed with a connection or timeout error.
    pub async fn request(
        &self,
        input: impl Into<RequestInput>,
    ) -> Result<ResolvedResponse, RequestError> {
        let descriptor = request::normalize(input.into())?;
        let raw = retry::execute(&self.transport, &descriptor).await?;

        let content_location = response::content_location(&descriptor.uri, &raw.effective_uri);
        if let Some(location) = &content_location {
            log::debug!("request to {} resolved at {}", descriptor.uri, location);
        }

        let mut headers = raw.headers;
        let body =
            response::finalize_body(descriptor.encoding, descriptor.gzip, &mut headers, raw.body);

        Ok(ResolvedResponse {
            status: raw.status,
            headers,
            body,
            content_location,
        })
    }
}

/// Performs one request with a freshly-built default client.
///
/// Convenience entry point for callers without a long-lived
/// [`ResilientClient`]; see [`ResilientClient::request`] for semantics.
pub async fn request(
    input: impl Into<RequestInput>,
) -> Result<ResolvedResponse, RequestError> {
    ResilientClient::new()?.request(input).await
}
