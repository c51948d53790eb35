//! Resolved responses and their finalization.
//!
//! Once the retry loop yields a received response, two last steps produce
//! the caller-visible value: redirect annotation (did the transport end up
//! somewhere other than the requested URI?) and body finalization (raw
//! bytes vs decoded text, encoding headers normalized).

mod decode;
mod redirects;

pub(crate) use decode::finalize_body;
pub(crate) use redirects::content_location;

use reqwest::header::HeaderMap;

/// The body of a resolved response: exactly one representation, chosen by
/// the caller's encoding directive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResponseBody {
    /// Untouched byte sequence (`Encoding::Raw`).
    Bytes(Vec<u8>),
    /// Decoded text (`Encoding::Text`, the default).
    Text(String),
}

/// The caller-visible result of a successful request.
///
/// "Successful" means a response was received; the status may still be
/// 4xx/5xx; callers inspect it themselves.
#[derive(Debug, Clone)]
pub struct ResolvedResponse {
    /// HTTP status code as received, passed through unmodified.
    pub status: u16,
    /// Response headers with lower-cased names.
    pub headers: HeaderMap,
    /// The body, in the representation the caller asked for.
    pub body: ResponseBody,
    /// The effective URI, present only when it differs from the requested
    /// one (i.e. the transport followed a redirect somewhere else).
    pub content_location: Option<String>,
}

impl ResolvedResponse {
    /// The body as text, if it was decoded as text.
    pub fn text(&self) -> Option<&str> {
        match &self.body {
            ResponseBody::Text(text) => Some(text),
            ResponseBody::Bytes(_) => None,
        }
    }

    /// The body as raw bytes, if the raw directive was used.
    pub fn bytes(&self) -> Option<&[u8]> {
        match &self.body {
            ResponseBody::Bytes(bytes) => Some(bytes),
            ResponseBody::Text(_) => None,
        }
    }
}
