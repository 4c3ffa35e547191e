//! Core types for the locator system.

use std::time::Duration;

use fingertip_core_types::{ElementId, Locator};
use serde::{Deserialize, Serialize};

/// What "resolved" means for a candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WaitMode {
    /// The element exists in the tree.
    Presence,

    /// The element exists and reports itself enabled for interaction.
    Clickable,
}

impl WaitMode {
    pub fn name(&self) -> &'static str {
        match self {
            WaitMode::Presence => "presence",
            WaitMode::Clickable => "clickable",
        }
    }
}

/// A successful resolution: the element plus the candidate that won.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResolvedElement {
    /// Handle of the resolved element.
    pub element: ElementId,

    /// The locator that matched.
    pub locator: Locator,

    /// Position of the winning candidate within the chain. Zero means the
    /// most-preferred locator worked; anything higher means fallback kicked
    /// in.
    pub candidate_index: usize,
}

/// Tuning knobs for the resolver.
#[derive(Clone, Debug)]
pub struct ResolverConfig {
    /// Pause between consecutive probes of the same candidate.
    pub poll_interval: Duration,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            poll_interval: Duration::from_millis(250),
        }
    }
}

impl ResolverConfig {
    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }
}
