//! Fingertip library
//!
//! Re-exports the engine surface: gesture geometry and execution, locator
//! chain resolution, list traversal, and session orchestration. Callers
//! bring their own device session (anything implementing
//! [`DeviceSession`]) and get result records back; session bootstrap,
//! configuration, and artifact storage stay on the caller's side of the
//! boundary.

pub use fingertip_core_types::{
    Direction, DriverError, ElementId, ElementRect, Locator, LocatorChain, LocatorStrategy,
    SessionId, SwipeGesture, Viewport,
};
pub use wd_adapter::{DeviceSession, DriverConfig, DriverStatus, HttpDeviceSession};

pub use action_gesture::{geometry, GestureConfig, GestureError, GestureExecutor};
pub use action_locator::{
    LocatorError, LocatorResolver, ResolvedElement, ResolverConfig, WaitMode,
};
pub use list_traversal::{
    ListItemRecord, ListTraversalEngine, TerminationReason, TraversalConfig, TraversalError,
    TraversalResult,
};
pub use fingertip_orchestrator::{
    OrchestrationSummary, OrchestratorConfig, SessionOrchestrator, Workflow, WorkflowError,
    WorkflowResult,
};
