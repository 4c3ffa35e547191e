//! Scroll-and-scan list enumeration.
//!
//! Scrollable UIs only expose a window of their content at a time. The
//! [`ListTraversalEngine`] alternates scanning (enumerate what is visible,
//! fingerprint it, keep the unseen) with scrolling (reveal more) until a scan
//! stops producing new items or the scroll budget runs out. The result is
//! every logical item exactly once, in first-seen order, with an explicit
//! reason for stopping.

pub mod engine;
pub mod errors;
pub mod fingerprint;
pub mod types;

pub use engine::ListTraversalEngine;
pub use errors::TraversalError;
pub use types::{ListItemRecord, TerminationReason, TraversalConfig, TraversalResult};
