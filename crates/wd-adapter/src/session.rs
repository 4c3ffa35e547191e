//! The `DeviceSession` trait - everything the engine asks of a live session.

use async_trait::async_trait;
use fingertip_core_types::{
    DriverError, ElementId, ElementRect, Locator, SessionId, SwipeGesture, Viewport,
};
use serde::{Deserialize, Serialize};

/// Health report of the remote automation endpoint.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DriverStatus {
    pub ready: bool,
    pub message: Option<String>,
}

/// One live automation session against a device or emulator.
///
/// A session is exclusively owned by a single workflow for its entire
/// lifetime; implementations must still be `Send + Sync` because the owning
/// workflow runs on a multi-threaded runtime.
///
/// Element absence is modelled as `Ok(None)` / an empty `Vec`; `Err` is
/// reserved for transport and protocol faults.
#[async_trait]
pub trait DeviceSession: Send + Sync {
    /// Identifier of the underlying remote session.
    fn id(&self) -> &SessionId;

    /// Screen dimensions. Queried once at workflow start; the result is
    /// treated as immutable for the rest of the session.
    async fn viewport(&self) -> Result<Viewport, DriverError>;

    /// Issue a computed swipe gesture.
    async fn perform_swipe(&self, gesture: &SwipeGesture) -> Result<(), DriverError>;

    /// Query for a single element. `Ok(None)` when nothing matches.
    async fn find_element(&self, locator: &Locator) -> Result<Option<ElementId>, DriverError>;

    /// Query for every matching element, in document order.
    async fn find_elements(&self, locator: &Locator) -> Result<Vec<ElementId>, DriverError>;

    /// Read a named attribute. `Ok(None)` when the attribute is absent.
    async fn element_attribute(
        &self,
        element: &ElementId,
        name: &str,
    ) -> Result<Option<String>, DriverError>;

    /// Bounding box of an element in screen coordinates.
    async fn element_rect(&self, element: &ElementId) -> Result<ElementRect, DriverError>;

    /// Whether the element is enabled for interaction.
    async fn element_enabled(&self, element: &ElementId) -> Result<bool, DriverError>;

    /// Tap the element.
    async fn element_click(&self, element: &ElementId) -> Result<(), DriverError>;

    /// Raw PNG bytes of the current screen. The engine never stores these;
    /// they pass straight through to the caller.
    async fn screenshot(&self) -> Result<Vec<u8>, DriverError>;

    /// Health of the remote endpoint (not of this session).
    async fn status(&self) -> Result<DriverStatus, DriverError>;

    /// Reachability probe used for prerequisite gating: any fault collapses
    /// to `false`.
    async fn is_reachable(&self) -> bool {
        self.status().await.map(|s| s.ready).unwrap_or(false)
    }

    /// Terminate the remote session.
    async fn quit(&self) -> Result<(), DriverError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use fingertip_core_types::SwipeGesture;

    /// Minimal port whose status is scripted; everything else is unused.
    struct StatusOnly {
        id: SessionId,
        answer: Result<DriverStatus, DriverError>,
    }

    #[async_trait]
    impl DeviceSession for StatusOnly {
        fn id(&self) -> &SessionId {
            &self.id
        }

        async fn viewport(&self) -> Result<Viewport, DriverError> {
            unreachable!()
        }

        async fn perform_swipe(&self, _: &SwipeGesture) -> Result<(), DriverError> {
            unreachable!()
        }

        async fn find_element(&self, _: &Locator) -> Result<Option<ElementId>, DriverError> {
            unreachable!()
        }

        async fn find_elements(&self, _: &Locator) -> Result<Vec<ElementId>, DriverError> {
            unreachable!()
        }

        async fn element_attribute(
            &self,
            _: &ElementId,
            _: &str,
        ) -> Result<Option<String>, DriverError> {
            unreachable!()
        }

        async fn element_rect(&self, _: &ElementId) -> Result<ElementRect, DriverError> {
            unreachable!()
        }

        async fn element_enabled(&self, _: &ElementId) -> Result<bool, DriverError> {
            unreachable!()
        }

        async fn element_click(&self, _: &ElementId) -> Result<(), DriverError> {
            unreachable!()
        }

        async fn screenshot(&self) -> Result<Vec<u8>, DriverError> {
            unreachable!()
        }

        async fn status(&self) -> Result<DriverStatus, DriverError> {
            self.answer.clone()
        }

        async fn quit(&self) -> Result<(), DriverError> {
            unreachable!()
        }
    }

    #[tokio::test]
    async fn reachability_collapses_faults_to_false() {
        let down = StatusOnly {
            id: SessionId::new(),
            answer: Err(DriverError::Transport("connection refused".into())),
        };
        assert!(!down.is_reachable().await);

        let busy = StatusOnly {
            id: SessionId::new(),
            answer: Ok(DriverStatus {
                ready: false,
                message: Some("session in progress".into()),
            }),
        };
        assert!(!busy.is_reachable().await);

        let up = StatusOnly {
            id: SessionId::new(),
            answer: Ok(DriverStatus {
                ready: true,
                message: None,
            }),
        };
        assert!(up.is_reachable().await);
    }
}

