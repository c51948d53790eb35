//! Request call shapes and normalization.
//!
//! Callers reach this library through two shapes: a bare URI string (with
//! optional options alongside) or a single [`RequestOptions`] value carrying
//! the URI. Both collapse into one canonical [`RequestDescriptor`] before
//! anything else runs; nothing downstream ever sees the original shape.

mod normalize;

pub(crate) use normalize::normalize;

use std::time::Duration;

use reqwest::header::HeaderMap;
use reqwest::Method;
use url::Url;

/// How the response body should be represented to the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Encoding {
    /// Decode the body to text (UTF-8 by default, honoring a Latin-1
    /// charset parameter when the response declares one).
    #[default]
    Text,
    /// Hand back the untouched byte sequence, independent of content type.
    Raw,
}

/// Caller-supplied request options.
///
/// Every field is optional in spirit: `Default::default()` is a plain GET
/// with no retries. The `uri` field is only consulted when no positional URI
/// accompanies the options.
#[derive(Debug, Clone)]
pub struct RequestOptions {
    /// Target URI. Required unless a positional URI is supplied alongside.
    pub uri: Option<String>,
    /// HTTP method; defaults to GET.
    pub method: Option<Method>,
    /// Query parameters, serialized into the URI's query string in the
    /// order given here.
    pub query: Vec<(String, String)>,
    /// Request headers as name/value pairs; validated during normalization.
    pub headers: Vec<(String, String)>,
    /// Optional request body.
    pub body: Option<Vec<u8>>,
    /// Body representation directive; defaults to decoded text.
    pub encoding: Encoding,
    /// Request compressed transfer and have the transport decompress it
    /// transparently.
    pub gzip: bool,
    /// Retry budget: additional transport attempts after the first failed
    /// one. Defaults to 0 (no retries).
    pub retries: u32,
    /// Total-request timeout.
    pub timeout: Option<Duration>,
    /// Connect-phase timeout, independent of the total timeout.
    pub connect_timeout: Option<Duration>,
}

impl Default for RequestOptions {
    fn default() -> Self {
        Self {
            uri: None,
            method: None,
            query: Vec::new(),
            headers: Vec::new(),
            body: None,
            encoding: Encoding::default(),
            gzip: false,
            retries: crate::config::DEFAULT_RETRY_BUDGET,
            timeout: None,
            connect_timeout: None,
        }
    }
}

/// The two accepted call shapes, resolved before any other component runs.
#[derive(Debug, Clone)]
pub enum RequestInput {
    /// A bare URI with defaults for everything else.
    Uri(String),
    /// A URI plus explicit options. The positional URI wins over
    /// `options.uri` if both are present.
    UriWithOptions(String, RequestOptions),
    /// A single options value carrying the URI.
    Options(RequestOptions),
}

impl From<&str> for RequestInput {
    fn from(uri: &str) -> Self {
        RequestInput::Uri(uri.to_string())
    }
}

impl From<String> for RequestInput {
    fn from(uri: String) -> Self {
        RequestInput::Uri(uri)
    }
}

impl From<RequestOptions> for RequestInput {
    fn from(options: RequestOptions) -> Self {
        RequestInput::Options(options)
    }
}

impl From<(&str, RequestOptions)> for RequestInput {
    fn from((uri, options): (&str, RequestOptions)) -> Self {
        RequestInput::UriWithOptions(uri.to_string(), options)
    }
}

impl From<(String, RequestOptions)> for RequestInput {
    fn from((uri, options): (String, RequestOptions)) -> Self {
        RequestInput::UriWithOptions(uri, options)
    }
}

/// One canonical, fully-resolved request.
///
/// Produced by normalization and owned by a single logical request; the
/// query string is already serialized into `uri` and the headers are
/// validated, so the transport can send this without further checks.
#[derive(Debug, Clone)]
pub struct RequestDescriptor {
    /// HTTP method.
    pub method: Method,
    /// Target URL with the query string serialized in.
    pub uri: Url,
    /// Validated request headers.
    pub headers: HeaderMap,
    /// Optional request body bytes.
    pub body: Option<Vec<u8>>,
    /// Body representation directive.
    pub encoding: Encoding,
    /// Whether compressed transfer was requested.
    pub gzip: bool,
    /// Retry budget (additional attempts after the first).
    pub retries: u32,
    /// Total-request timeout.
    pub timeout: Option<Duration>,
    /// Connect-phase timeout.
    pub connect_timeout: Option<Duration>,
}
