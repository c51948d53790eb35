//! resilient_http: a resilience shell around an HTTP transport.
//!
//! This library turns a raw, failure-prone HTTP transport into a uniform
//! request/response contract: one call shape for requests, transient network
//! failures absorbed by retry with backoff, every outcome classified into a
//! single result/error shape, redirect changes surfaced, and the body
//! representation normalized (raw bytes vs decoded text).
//!
//! It is deliberately *not* a full HTTP client: connection pooling, cookies,
//! and caching belong to the underlying transport (`reqwest` by default).
//!
//! # Example
//!
//! ```no_run
//! use resilient_http::{request, RequestOptions};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), resilient_http::RequestError> {
//! // Bare URI, all defaults (GET, no retries).
//! let response = request("https://example.com/").await?;
//! println!("status: {}", response.status);
//!
//! // Structured options with retries and a query string.
//! let response = request(RequestOptions {
//!     uri: Some("https://example.com/search".into()),
//!     query: vec![("q".into(), "foo".into())],
//!     retries: 3,
//!     ..Default::default()
//! })
//! .await?;
//! println!("body: {:?}", response.text());
//! # Ok(())
//! # }
//! ```
//!
//! # Requirements
//!
//! This library requires a Tokio runtime. Use `#[tokio::main]` in your
//! application or call into it from within an async context.

#![warn(missing_docs)]

pub mod config;
mod error_handling;
mod fetch;
mod request;
mod response;
mod retry;
pub mod transport;

// Re-export public API
pub use error_handling::RequestError;
pub use fetch::{request, ResilientClient};
pub use request::{Encoding, RequestDescriptor, RequestInput, RequestOptions};
pub use response::{ResolvedResponse, ResponseBody};
pub use transport::{
    ReqwestTransport, TimeoutPhase, TransportAdapter, TransportOutcome, TransportResponse,
};
