//! Body representation and encoding-header normalization.

use reqwest::header::{HeaderMap, CONTENT_ENCODING, CONTENT_TYPE};

use crate::request::Encoding;

use super::ResponseBody;

/// Chooses the final body representation and normalizes encoding headers.
///
/// When compressed transfer was requested, the transport contract hands
/// back transparently decompressed bytes, so the `content-encoding` header
/// is removed; leaving it would falsely claim the body is still
/// compressed. The raw directive returns the bytes untouched, independent
/// of content type; otherwise the body is decoded to text.
pub(crate) fn finalize_body(
    encoding: Encoding,
    gzip: bool,
    headers: &mut HeaderMap,
    body: Vec<u8>,
) -> ResponseBody {
    if gzip {
        headers.remove(CONTENT_ENCODING);
    }
    match encoding {
        Encoding::Raw => ResponseBody::Bytes(body),
        Encoding::Text => ResponseBody::Text(decode_text(headers, &body)),
    }
}

/// Decodes body bytes to text using the response's indicated charset.
///
/// UTF-8 (lossy) is the default; a Latin-1 charset parameter selects the
/// direct byte-to-char mapping. Anything else falls back to lossy UTF-8.
fn decode_text(headers: &HeaderMap, body: &[u8]) -> String {
    if let Some(charset) = charset_param(headers) {
        if matches!(charset.as_str(), "iso-8859-1" | "latin-1" | "latin1") {
            return body.iter().map(|&b| b as char).collect();
        }
    }
    String::from_utf8_lossy(body).into_owned()
}

/// Extracts the charset parameter from the content-type header, if any.
fn charset_param(headers: &HeaderMap) -> Option<String> {
    let content_type = headers.get(CONTENT_TYPE)?.to_str().ok()?;
    content_type.split(';').skip(1).find_map(|param| {
        param
            .trim()
            .strip_prefix("charset=")
            .map(|charset| charset.trim_matches('"').to_ascii_lowercase())
    })
}
