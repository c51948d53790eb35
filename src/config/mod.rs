//! Library configuration and constants.
//!
//! This module provides the compiled-in defaults for retry timing and
//! transport behavior. There is no global mutable configuration: every
//! per-request knob lives on [`crate::RequestOptions`], and the constants
//! here are the immutable defaults backing them.

mod constants;

// Re-export all constants
pub use constants::*;
