//! Error types for the gesture layer.

use thiserror::Error;

/// Failures a gesture can produce.
#[derive(Debug, Error, Clone)]
pub enum GestureError {
    /// Malformed geometry input: a degenerate viewport or a distance ratio
    /// outside `(0, 1]`. Always a programming or configuration mistake,
    /// never worth retrying.
    #[error("invalid geometry: {0}")]
    InvalidGeometry(String),

    /// Transport-level failure while issuing the gesture. Reported to the
    /// caller as-is; the executor never retries on its own.
    #[error("gesture transport failure: {0}")]
    Transport(String),
}

impl GestureError {
    pub fn is_transport(&self) -> bool {
        matches!(self, GestureError::Transport(_))
    }
}
