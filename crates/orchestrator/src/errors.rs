//! Error type for workflow bodies.

use action_gesture::GestureError;
use action_locator::LocatorError;
use fingertip_core_types::DriverError;
use list_traversal::TraversalError;
use thiserror::Error;

/// Anything that makes a whole workflow unable to proceed.
///
/// Component-level recoveries (locator fallback, skipped elements) happen
/// below this type; what reaches here is surfaced exactly once, as the
/// `error_detail` of the workflow's result.
#[derive(Debug, Error, Clone)]
pub enum WorkflowError {
    /// A gesture could not be issued
    #[error("gesture failed: {0}")]
    Gesture(#[from] GestureError),

    /// Element enumeration failed
    #[error("locator failure: {0}")]
    Locator(#[from] LocatorError),

    /// A list traversal aborted
    #[error("traversal failed: {0}")]
    Traversal(#[from] TraversalError),

    /// Direct driver call failed
    #[error("driver failure: {0}")]
    Driver(#[from] DriverError),

    /// Workflow-level assertion: e.g. a required element was absent
    #[error("{0}")]
    Message(String),
}

impl WorkflowError {
    pub fn message(text: impl Into<String>) -> Self {
        Self::Message(text.into())
    }
}
