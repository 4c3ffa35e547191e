//! Error types for list traversal.

use action_gesture::GestureError;
use action_locator::LocatorError;
use thiserror::Error;

/// Failures that stop a traversal outright.
///
/// Running out of budget is *not* an error - it is a termination reason on
/// the result. These variants cover faults that leave the engine unable to
/// scan or scroll at all.
#[derive(Debug, Error, Clone)]
pub enum TraversalError {
    /// A scroll gesture could not be issued
    #[error("scroll gesture failed: {0}")]
    Gesture(#[from] GestureError),

    /// Visible items could not be enumerated
    #[error("item enumeration failed: {0}")]
    Locator(#[from] LocatorError),

    /// Driver fault outside gesture/locator calls (viewport fetch)
    #[error("driver failure: {0}")]
    Driver(String),
}
