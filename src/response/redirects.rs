//! Redirect tracking.
//!
//! The transport follows redirects internally; this module only compares
//! where it ended up against where the caller asked to go.

use url::Url;

/// Returns the effective URI when it differs from the requested one.
///
/// Both sides are compared in normalized string form (the requested URL is
/// already parsed; the effective URI is re-parsed when possible so that
/// e.g. an implied root path does not read as a difference). Equal URIs
/// yield `None`, never an empty or duplicate value.
pub(crate) fn content_location(requested: &Url, effective: &str) -> Option<String> {
    let effective = match Url::parse(effective) {
        Ok(url) => url.to_string(),
        Err(_) => effective.to_string(),
    };
    if requested.as_str() != effective {
        Some(effective)
    } else {
        None
    }
}
