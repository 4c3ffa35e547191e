//! Gesture execution against a live device session.

use std::sync::Arc;
use std::time::Duration;

use fingertip_core_types::{Direction, ElementId, SwipeGesture, Viewport};
use tracing::{debug, info};
use wd_adapter::DeviceSession;

use crate::errors::GestureError;
use crate::geometry;

/// Tuning knobs for gesture execution.
#[derive(Clone, Debug)]
pub struct GestureConfig {
    /// Pause after each issued gesture so the UI can finish animating before
    /// the next observation. Tests shrink this to keep suites fast.
    pub settle_delay: Duration,

    /// Press duration used by the convenience wrappers.
    pub swipe_duration_ms: u64,
}

impl Default for GestureConfig {
    fn default() -> Self {
        Self {
            settle_delay: Duration::from_millis(500),
            swipe_duration_ms: 1000,
        }
    }
}

impl GestureConfig {
    pub fn with_settle_delay(mut self, delay: Duration) -> Self {
        self.settle_delay = delay;
        self
    }

    pub fn with_swipe_duration_ms(mut self, duration_ms: u64) -> Self {
        self.swipe_duration_ms = duration_ms;
        self
    }
}

/// Issues swipes through the Device Session Port.
///
/// Transport failures surface as [`GestureError::Transport`]; the executor
/// never retries and never lets a raw driver error escape.
pub struct GestureExecutor {
    session: Arc<dyn DeviceSession>,
    config: GestureConfig,
}

impl GestureExecutor {
    pub fn new(session: Arc<dyn DeviceSession>) -> Self {
        Self::with_config(session, GestureConfig::default())
    }

    pub fn with_config(session: Arc<dyn DeviceSession>, config: GestureConfig) -> Self {
        Self { session, config }
    }

    pub fn config(&self) -> &GestureConfig {
        &self.config
    }

    /// Issue a pre-computed swipe, then wait out the settle delay.
    pub async fn swipe(&self, gesture: &SwipeGesture) -> Result<(), GestureError> {
        debug!(%gesture, "issuing swipe");
        self.session
            .perform_swipe(gesture)
            .await
            .map_err(|err| GestureError::Transport(err.to_string()))?;
        tokio::time::sleep(self.config.settle_delay).await;
        Ok(())
    }

    /// Whole-screen swipe in `direction` covering `distance_ratio` of the
    /// moving axis.
    pub async fn swipe_direction(
        &self,
        viewport: Viewport,
        direction: Direction,
        distance_ratio: f64,
    ) -> Result<(), GestureError> {
        info!(%direction, distance_ratio, "swiping screen");
        let gesture = geometry::compute_swipe(
            viewport,
            direction,
            distance_ratio,
            self.config.swipe_duration_ms,
        )?;
        self.swipe(&gesture).await
    }

    /// Swipe across an element, anchored on its on-screen centre.
    pub async fn swipe_on_element(
        &self,
        viewport: Viewport,
        element: &ElementId,
        direction: Direction,
    ) -> Result<(), GestureError> {
        let rect = self
            .session
            .element_rect(element)
            .await
            .map_err(|err| GestureError::Transport(err.to_string()))?;
        info!(%direction, ?rect, "swiping on element");
        let gesture = geometry::compute_element_swipe(
            viewport,
            rect,
            direction,
            self.config.swipe_duration_ms,
        )?;
        self.swipe(&gesture).await
    }

    /// Pull-to-refresh drag from the top quarter of the screen.
    pub async fn pull_to_refresh(&self, viewport: Viewport) -> Result<(), GestureError> {
        info!("pull to refresh");
        let gesture =
            geometry::compute_pull_to_refresh(viewport, self.config.swipe_duration_ms)?;
        self.swipe(&gesture).await
    }

    /// Left-edge swipe toward the centre (drawer open / back navigation).
    pub async fn edge_swipe(&self, viewport: Viewport) -> Result<(), GestureError> {
        info!("edge swipe");
        let gesture = geometry::compute_edge_swipe(viewport, self.config.swipe_duration_ms)?;
        self.swipe(&gesture).await
    }
}
