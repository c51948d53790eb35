//! Normalization of call shapes into one request descriptor.

use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::Method;
use url::Url;

use crate::error_handling::RequestError;

use super::{RequestDescriptor, RequestInput, RequestOptions};

/// Normalizes a call shape into a [`RequestDescriptor`].
///
/// Fails with a configuration error (no network attempt made) when no URI is
/// resolvable, the URI does not parse, or a header name/value is invalid.
/// Query parameters are appended to the URI's query string in the order
/// provided.
pub(crate) fn normalize(input: RequestInput) -> Result<RequestDescriptor, RequestError> {
    let (uri, options) = match input {
        RequestInput::Uri(uri) => (uri, RequestOptions::default()),
        RequestInput::UriWithOptions(uri, options) => (uri, options),
        RequestInput::Options(options) => match options.uri.clone() {
            Some(uri) => (uri, options),
            None => {
                return Err(RequestError::configuration(
                    "no URI provided in request options",
                ))
            }
        },
    };

    let mut url = Url::parse(&uri)
        .map_err(|e| RequestError::configuration(format!("invalid URI {uri:?}: {e}")))?;

    if !options.query.is_empty() {
        url.query_pairs_mut().extend_pairs(&options.query);
    }

    let headers = build_headers(&options.headers)?;

    Ok(RequestDescriptor {
        method: options.method.unwrap_or(Method::GET),
        uri: url,
        headers,
        body: options.body,
        encoding: options.encoding,
        gzip: options.gzip,
        retries: options.retries,
        timeout: options.timeout,
        connect_timeout: options.connect_timeout,
    })
}

/// Validates header pairs into a `HeaderMap`, which lower-cases names.
fn build_headers(pairs: &[(String, String)]) -> Result<HeaderMap, RequestError> {
    let mut headers = HeaderMap::with_capacity(pairs.len());
    for (name, value) in pairs {
        let name = HeaderName::from_bytes(name.as_bytes())
            .map_err(|e| RequestError::configuration(format!("invalid header name {name:?}: {e}")))?;
        let value = HeaderValue::from_str(value).map_err(|e| {
            RequestError::configuration(format!("invalid value for header {name}: {e}"))
        })?;
        headers.append(name, value);
    }
    Ok(headers)
}
