//! Configuration constants.
//!
//! All timing and limit defaults used by the retry controller and the
//! default reqwest transport.

// Retry strategy
/// Default retry budget when unspecified: no retries.
///
/// A single network error on a non-retrying call surfaces immediately as a
/// status-504 rejection rather than silently waiting through backoff.
pub const DEFAULT_RETRY_BUDGET: u32 = 0;
/// Base of the exponential backoff schedule.
///
/// `tokio_retry::strategy::ExponentialBackoff` raises this base to the
/// attempt number and multiplies by [`RETRY_BACKOFF_SCALE_MS`], so base 2
/// with scale 150 yields 300ms, 600ms, 1.2s, 2.4s, ... Each wait strictly
/// exceeds the previous until [`RETRY_MAX_DELAY_SECS`] caps it.
pub const RETRY_BACKOFF_BASE_MS: u64 = 2;
/// Multiplier applied to each backoff step; scales the first delay to 300ms.
pub const RETRY_BACKOFF_SCALE_MS: u64 = 150;
/// Maximum delay between retries in seconds.
pub const RETRY_MAX_DELAY_SECS: u64 = 15;

// Redirect handling
/// Maximum number of redirect hops the default transport follows.
///
/// Prevents infinite redirect loops; the URL actually reached after
/// following is reported back as the effective URI.
pub const MAX_REDIRECT_HOPS: usize = 10;
