//! The scroll-and-scan traversal state machine.

use std::collections::{BTreeMap, HashSet};
use std::sync::Arc;

use action_gesture::GestureExecutor;
use action_locator::{LocatorResolver, WaitMode};
use fingertip_core_types::{DriverError, ElementId, Locator, LocatorChain};
use tracing::{debug, info, warn};
use wd_adapter::DeviceSession;

use crate::errors::TraversalError;
use crate::fingerprint;
use crate::types::{ListItemRecord, TerminationReason, TraversalConfig, TraversalResult};

/// Enumerates every item of a scrollable list exactly once.
///
/// The loop alternates two steps: *scan* (enumerate visible matches,
/// fingerprint them, keep the unseen) and *scroll* (one reveal gesture, then
/// a settle pause). It stops when a scan adds nothing - scrolling further
/// cannot predictably reveal unseen content once a scan is idempotent - or
/// when the scroll budget is spent.
pub struct ListTraversalEngine {
    session: Arc<dyn DeviceSession>,
    gestures: GestureExecutor,
    resolver: LocatorResolver,
}

impl ListTraversalEngine {
    pub fn new(session: Arc<dyn DeviceSession>) -> Self {
        let gestures = GestureExecutor::new(session.clone());
        let resolver = LocatorResolver::new(session.clone());
        Self {
            session,
            gestures,
            resolver,
        }
    }

    /// Build from pre-configured components (shrunk delays in tests, shared
    /// tuning in callers).
    pub fn with_components(
        session: Arc<dyn DeviceSession>,
        gestures: GestureExecutor,
        resolver: LocatorResolver,
    ) -> Self {
        Self {
            session,
            gestures,
            resolver,
        }
    }

    /// Enumerate all items matching `item_locator`.
    ///
    /// When `list_chain` is given and resolves, reveal scrolls are anchored
    /// on the container element; otherwise the whole screen scrolls. The
    /// result preserves first-seen order, contains no duplicate
    /// fingerprints, and reports `scrolls_performed <= scroll_budget`.
    pub async fn traverse(
        &self,
        list_chain: Option<&LocatorChain>,
        item_locator: &Locator,
        config: &TraversalConfig,
    ) -> Result<TraversalResult, TraversalError> {
        let viewport = self
            .session
            .viewport()
            .await
            .map_err(|err| TraversalError::Driver(err.to_string()))?;
        let container = self.resolve_container(list_chain, config).await;

        let mut seen: HashSet<String> = HashSet::new();
        let mut items: Vec<ListItemRecord> = Vec::new();
        let mut scrolls_performed: u32 = 0;

        let termination = loop {
            let new_items = self
                .scan(item_locator, config, &mut seen, &mut items)
                .await?;
            debug!(
                new_items,
                total = items.len(),
                scrolls_performed,
                "scan complete"
            );

            if new_items == 0 {
                break TerminationReason::NoNewItems;
            }
            if scrolls_performed >= config.scroll_budget {
                break TerminationReason::BudgetExhausted;
            }

            match &container {
                Some(element) => {
                    self.gestures
                        .swipe_on_element(viewport, element, config.scroll_direction)
                        .await?
                }
                None => {
                    self.gestures
                        .swipe_direction(viewport, config.scroll_direction, config.scroll_ratio)
                        .await?
                }
            }
            scrolls_performed += 1;
            tokio::time::sleep(config.per_scroll_delay).await;
        };

        info!(
            items = items.len(),
            scrolls_performed,
            termination = termination.name(),
            "traversal finished"
        );
        Ok(TraversalResult {
            items,
            scrolls_performed,
            termination,
        })
    }

    /// Resolve the scroll container, if a chain was supplied. An unresolved
    /// chain degrades to whole-screen scrolling rather than failing the
    /// traversal.
    async fn resolve_container(
        &self,
        list_chain: Option<&LocatorChain>,
        config: &TraversalConfig,
    ) -> Option<ElementId> {
        let chain = list_chain?;
        match self
            .resolver
            .resolve(chain, WaitMode::Presence, config.container_timeout)
            .await
        {
            Some(resolved) => {
                debug!(locator = %resolved.locator, "scrolling within container");
                Some(resolved.element)
            }
            None => {
                warn!("list container chain did not resolve, scrolling whole screen");
                None
            }
        }
    }

    /// One scanning step: enumerate visible matches and append the unseen.
    /// Returns how many new records were added.
    async fn scan(
        &self,
        item_locator: &Locator,
        config: &TraversalConfig,
        seen: &mut HashSet<String>,
        items: &mut Vec<ListItemRecord>,
    ) -> Result<usize, TraversalError> {
        let elements = self.resolver.resolve_all(item_locator).await?;
        let mut new_items = 0;
        for element in &elements {
            match self.capture(element, &config.attribute_probes).await {
                Ok(record) => {
                    if seen.insert(record.fingerprint.clone()) {
                        debug!(fingerprint = %record.fingerprint, "new item");
                        items.push(record);
                        new_items += 1;
                    }
                }
                Err(err) => {
                    // Elements can vanish between enumeration and probing
                    // when the UI is still settling; skip and let a later
                    // scan pick them up.
                    warn!(%element, error = %err, "could not capture element, skipping");
                }
            }
        }
        Ok(new_items)
    }

    /// Read rect and probed attributes for one element and fingerprint it.
    async fn capture(
        &self,
        element: &ElementId,
        probes: &[String],
    ) -> Result<ListItemRecord, DriverError> {
        let rect = self.session.element_rect(element).await?;
        let mut attributes = BTreeMap::new();
        for name in probes {
            match self.session.element_attribute(element, name).await {
                Ok(Some(value)) if !value.is_empty() => {
                    attributes.insert(name.clone(), value);
                }
                Ok(_) => {}
                Err(err) => {
                    warn!(%element, attribute = name.as_str(), error = %err, "attribute probe failed");
                }
            }
        }
        let fingerprint = fingerprint::derive(&attributes, &rect);
        Ok(ListItemRecord {
            fingerprint,
            origin: (rect.x, rect.y),
            size: (rect.width, rect.height),
            attributes,
        })
    }
}
