//! Error types for locator resolution.

use thiserror::Error;

/// Failures of the resolution machinery itself.
///
/// A chain that matches nothing is *not* represented here - `resolve`
/// returns `None` for that. These errors cover faults that prevent the
/// resolver from asking the question at all.
#[derive(Debug, Error, Clone)]
pub enum LocatorError {
    /// Driver fault during a no-fallback enumeration call
    #[error("driver failure during enumeration: {0}")]
    Driver(String),
}
