//! Core data types for list traversal.

use std::collections::BTreeMap;
use std::time::Duration;

use fingertip_core_types::Direction;
use serde::{Deserialize, Serialize};

/// Why a traversal stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TerminationReason {
    /// A scan added nothing new; the list is assumed exhausted.
    NoNewItems,

    /// The scroll budget ran out while items were still appearing. Content
    /// may remain undiscovered.
    BudgetExhausted,
}

impl TerminationReason {
    pub fn name(&self) -> &'static str {
        match self {
            TerminationReason::NoNewItems => "no-new-items",
            TerminationReason::BudgetExhausted => "budget-exhausted",
        }
    }
}

/// One logical list item, captured the first time it was seen.
///
/// Records live only as long as the traversal result that carries them; the
/// engine never persists them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListItemRecord {
    /// Stable identity derived from the item's attributes; two records with
    /// the same fingerprint are the same logical item regardless of where
    /// on screen they appeared.
    pub fingerprint: String,

    /// Screen position at first sighting.
    pub origin: (i32, i32),

    /// Size at first sighting.
    pub size: (u32, u32),

    /// Probed attributes. Absent attributes are simply missing from the map.
    pub attributes: BTreeMap<String, String>,
}

impl ListItemRecord {
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }
}

/// Outcome of one traversal call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TraversalResult {
    /// Unique items in first-seen order.
    pub items: Vec<ListItemRecord>,

    /// Scroll steps actually executed; never exceeds the budget.
    pub scrolls_performed: u32,

    /// Why the loop stopped.
    pub termination: TerminationReason,
}

impl TraversalResult {
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn fingerprints(&self) -> impl Iterator<Item = &str> {
        self.items.iter().map(|item| item.fingerprint.as_str())
    }
}

/// Tuning knobs for one traversal.
#[derive(Clone, Debug)]
pub struct TraversalConfig {
    /// Upper bound on scroll steps. Guards against infinitely-scrolling or
    /// buggy lists; zero means scan-once-never-scroll.
    pub scroll_budget: u32,

    /// Direction content moves to reveal more items.
    pub scroll_direction: Direction,

    /// Distance ratio for reveal scrolls. Deliberately smaller than
    /// navigation swipes so items shift by less than a screenful and the
    /// visible windows overlap.
    pub scroll_ratio: f64,

    /// Pause after each scroll before the next scan.
    pub per_scroll_delay: Duration,

    /// Wait allowed for resolving the list container chain.
    pub container_timeout: Duration,

    /// Attribute names probed on every discovered element.
    pub attribute_probes: Vec<String>,
}

impl Default for TraversalConfig {
    fn default() -> Self {
        Self {
            scroll_budget: 5,
            scroll_direction: Direction::Up,
            scroll_ratio: 0.3,
            per_scroll_delay: Duration::from_secs(1),
            container_timeout: Duration::from_secs(5),
            attribute_probes: vec![
                "content-desc".to_string(),
                "text".to_string(),
                "class".to_string(),
                "enabled".to_string(),
                "displayed".to_string(),
            ],
        }
    }
}

impl TraversalConfig {
    pub fn with_scroll_budget(mut self, budget: u32) -> Self {
        self.scroll_budget = budget;
        self
    }

    pub fn with_scroll_direction(mut self, direction: Direction) -> Self {
        self.scroll_direction = direction;
        self
    }

    pub fn with_scroll_ratio(mut self, ratio: f64) -> Self {
        self.scroll_ratio = ratio;
        self
    }

    pub fn with_per_scroll_delay(mut self, delay: Duration) -> Self {
        self.per_scroll_delay = delay;
        self
    }

    pub fn with_attribute_probes(mut self, probes: Vec<String>) -> Self {
        self.attribute_probes = probes;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_favor_overlapping_scrolls() {
        let config = TraversalConfig::default();
        assert_eq!(config.scroll_budget, 5);
        assert_eq!(config.scroll_direction, Direction::Up);
        assert!(config.scroll_ratio < 0.5);
        assert!(config
            .attribute_probes
            .iter()
            .any(|p| p == "content-desc"));
    }

    #[test]
    fn termination_reason_names() {
        assert_eq!(TerminationReason::NoNewItems.name(), "no-new-items");
        assert_eq!(
            TerminationReason::BudgetExhausted.name(),
            "budget-exhausted"
        );
    }
}
