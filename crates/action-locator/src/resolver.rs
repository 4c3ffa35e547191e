//! Element resolver with fallback chain orchestration.

use std::sync::Arc;
use std::time::Duration;

use fingertip_core_types::{ElementId, Locator, LocatorChain};
use tokio::time::Instant;
use tracing::{debug, info, warn};
use wd_adapter::DeviceSession;

use crate::errors::LocatorError;
use crate::types::{ResolvedElement, ResolverConfig, WaitMode};

/// Walks a locator chain against one device session.
///
/// Candidates are tried strictly in chain order. Each gets up to
/// `per_locator_timeout` of polling; a timeout or a per-attempt driver fault
/// advances to the next candidate with no early abort of the rest of the
/// chain. Total latency is therefore bounded by
/// `chain.len() x per_locator_timeout`.
pub struct LocatorResolver {
    session: Arc<dyn DeviceSession>,
    config: ResolverConfig,
}

impl LocatorResolver {
    pub fn new(session: Arc<dyn DeviceSession>) -> Self {
        Self::with_config(session, ResolverConfig::default())
    }

    pub fn with_config(session: Arc<dyn DeviceSession>, config: ResolverConfig) -> Self {
        Self { session, config }
    }

    /// Resolve the first candidate that satisfies `mode` within its timeout.
    ///
    /// `None` after exhausting the chain is a normal outcome; the caller
    /// decides whether absence is a failure.
    pub async fn resolve(
        &self,
        chain: &LocatorChain,
        mode: WaitMode,
        per_locator_timeout: Duration,
    ) -> Option<ResolvedElement> {
        for (candidate_index, locator) in chain.iter().enumerate() {
            debug!(%locator, mode = mode.name(), "trying locator candidate");
            match self.wait_for(locator, mode, per_locator_timeout).await {
                Some(element) => {
                    info!(%locator, %element, candidate_index, "locator resolved");
                    return Some(ResolvedElement {
                        element,
                        locator: locator.clone(),
                        candidate_index,
                    });
                }
                None => debug!(%locator, "candidate did not resolve, advancing"),
            }
        }
        debug!(candidates = chain.len(), "locator chain exhausted");
        None
    }

    /// Every element currently matching `locator`, in document order.
    /// No chain, no fallback, no waiting - the enumeration primitive for
    /// list traversal.
    pub async fn resolve_all(&self, locator: &Locator) -> Result<Vec<ElementId>, LocatorError> {
        self.session
            .find_elements(locator)
            .await
            .map_err(|err| LocatorError::Driver(err.to_string()))
    }

    /// Poll one candidate until it satisfies `mode` or the timeout lapses.
    /// A driver fault abandons the candidate: the fault is overwhelmingly
    /// likely to recur within the same window, and the next candidate may
    /// use a different query path.
    async fn wait_for(
        &self,
        locator: &Locator,
        mode: WaitMode,
        timeout: Duration,
    ) -> Option<ElementId> {
        let deadline = Instant::now() + timeout;
        loop {
            match self.check_once(locator, mode).await {
                Ok(Some(element)) => return Some(element),
                Ok(None) => {}
                Err(err) => {
                    warn!(%locator, error = %err, "locator attempt failed, skipping candidate");
                    return None;
                }
            }
            if Instant::now() + self.config.poll_interval > deadline {
                return None;
            }
            tokio::time::sleep(self.config.poll_interval).await;
        }
    }

    async fn check_once(
        &self,
        locator: &Locator,
        mode: WaitMode,
    ) -> Result<Option<ElementId>, fingertip_core_types::DriverError> {
        let Some(element) = self.session.find_element(locator).await? else {
            return Ok(None);
        };
        match mode {
            WaitMode::Presence => Ok(Some(element)),
            WaitMode::Clickable => {
                if self.session.element_enabled(&element).await? {
                    Ok(Some(element))
                } else {
                    Ok(None)
                }
            }
        }
    }
}
