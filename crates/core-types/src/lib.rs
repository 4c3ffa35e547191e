//! Shared primitives for the Fingertip interaction engine.
//!
//! Every engine crate speaks in these types: session/element identifiers,
//! screen geometry, the locator data model, and the driver error surfaced by
//! the Device Session Port.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// Transport/protocol error reported by a device session.
///
/// "Element not found" is deliberately absent: absence is an `Option`, not an
/// error, everywhere in the engine.
#[derive(Debug, Error, Clone, Serialize, Deserialize)]
pub enum DriverError {
    /// Network-level failure talking to the session endpoint
    #[error("transport failure: {0}")]
    Transport(String),

    /// The endpoint answered with a protocol-level error payload
    #[error("protocol error: {0}")]
    Protocol(String),

    /// Response body could not be decoded
    #[error("malformed response: {0}")]
    Decode(String),

    /// The session id is unknown or the session has been terminated
    #[error("invalid session: {0}")]
    InvalidSession(String),

    /// The adapter was constructed with unusable settings
    #[error("configuration error: {0}")]
    Configuration(String),
}

impl DriverError {
    /// Transport faults are the only class worth retrying at a higher layer.
    pub fn is_transport(&self) -> bool {
        matches!(self, DriverError::Transport(_))
    }
}

#[derive(Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct SessionId(pub String);

impl SessionId {
    pub fn new() -> Self {
        Self(Uuid::new_v4().to_string())
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Opaque element handle returned by the port. Valid only within the session
/// that produced it.
#[derive(Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct ElementId(pub String);

impl From<String> for ElementId {
    fn from(raw: String) -> Self {
        Self(raw)
    }
}

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Screen dimensions of a device session. Fetched once per session and
/// read-only afterwards.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Both axes must be strictly positive for gesture math to make sense.
    pub fn is_valid(&self) -> bool {
        self.width > 0 && self.height > 0
    }

    pub fn center(&self) -> (i32, i32) {
        ((self.width / 2) as i32, (self.height / 2) as i32)
    }
}

impl fmt::Display for Viewport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// Travel direction of a swipe gesture.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub fn name(&self) -> &'static str {
        match self {
            Direction::Up => "up",
            Direction::Down => "down",
            Direction::Left => "left",
            Direction::Right => "right",
        }
    }

    /// Whether travel happens along the vertical axis.
    pub fn is_vertical(&self) -> bool {
        matches!(self, Direction::Up | Direction::Down)
    }

    /// Sign of travel along the moving axis: Up/Left move backward.
    pub fn sign(&self) -> i32 {
        match self {
            Direction::Up | Direction::Left => -1,
            Direction::Down | Direction::Right => 1,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Element bounding box as reported by the port: origin in screen
/// coordinates plus size.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct ElementRect {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

impl ElementRect {
    pub fn new(x: i32, y: i32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn center(&self) -> (i32, i32) {
        (
            self.x + (self.width / 2) as i32,
            self.y + (self.height / 2) as i32,
        )
    }

    /// Shorter side of the box, the basis for element-relative swipe travel.
    pub fn min_side(&self) -> u32 {
        self.width.min(self.height)
    }
}

/// A fully-computed swipe: absolute start/end coordinates plus press
/// duration.
///
/// Produced by the gesture geometry, which guarantees both endpoints lie
/// inside the originating viewport. Callers never build these by hand.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct SwipeGesture {
    pub start_x: i32,
    pub start_y: i32,
    pub end_x: i32,
    pub end_y: i32,
    pub duration_ms: u64,
}

impl SwipeGesture {
    pub fn new(start_x: i32, start_y: i32, end_x: i32, end_y: i32, duration_ms: u64) -> Self {
        Self {
            start_x,
            start_y,
            end_x,
            end_y,
            duration_ms,
        }
    }
}

impl fmt::Display for SwipeGesture {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "({}, {}) -> ({}, {}) over {}ms",
            self.start_x, self.start_y, self.end_x, self.end_y, self.duration_ms
        )
    }
}

/// Query strategy tag, carried verbatim onto the wire.
///
/// The engine never branches on a concrete strategy; it only forwards the tag
/// alongside its value to the Device Session Port. Constructors exist for the
/// tags the reference drivers understand, plus `custom` for anything else.
#[derive(Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LocatorStrategy(String);

impl LocatorStrategy {
    pub fn accessibility_id() -> Self {
        Self("accessibility id".into())
    }

    pub fn class_name() -> Self {
        Self("class name".into())
    }

    pub fn xpath() -> Self {
        Self("xpath".into())
    }

    pub fn android_uiautomator() -> Self {
        Self("-android uiautomator".into())
    }

    pub fn ios_predicate() -> Self {
        Self("-ios predicate string".into())
    }

    pub fn ios_class_chain() -> Self {
        Self("-ios class chain".into())
    }

    pub fn custom(tag: impl Into<String>) -> Self {
        Self(tag.into())
    }

    /// Wire name sent as the `using` field of a find request.
    pub fn as_wire(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for LocatorStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A single element query: strategy tag plus query value.
#[derive(Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct Locator {
    pub strategy: LocatorStrategy,
    pub value: String,
}

impl Locator {
    pub fn new(strategy: LocatorStrategy, value: impl Into<String>) -> Self {
        Self {
            strategy,
            value: value.into(),
        }
    }

    pub fn accessibility_id(value: impl Into<String>) -> Self {
        Self::new(LocatorStrategy::accessibility_id(), value)
    }

    pub fn class_name(value: impl Into<String>) -> Self {
        Self::new(LocatorStrategy::class_name(), value)
    }

    pub fn xpath(value: impl Into<String>) -> Self {
        Self::new(LocatorStrategy::xpath(), value)
    }

    /// Match on an exact `content-desc` attribute, the most stable handle on
    /// Compose-style view trees.
    pub fn content_desc(value: &str) -> Self {
        Self::xpath(format!("//*[@content-desc='{value}']"))
    }

    /// Match on exact visible text.
    pub fn text(value: &str) -> Self {
        Self::xpath(format!("//*[@text='{value}']"))
    }
}

impl fmt::Display for Locator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={}", self.strategy, self.value)
    }
}

/// Ordered sequence of locators, tried first to last until one resolves.
///
/// Order is significant and caller-supplied: most specific/stable first,
/// most generic last.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct LocatorChain {
    candidates: Vec<Locator>,
}

impl LocatorChain {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn single(locator: Locator) -> Self {
        Self {
            candidates: vec![locator],
        }
    }

    pub fn with(mut self, locator: Locator) -> Self {
        self.candidates.push(locator);
        self
    }

    pub fn push(&mut self, locator: Locator) {
        self.candidates.push(locator);
    }

    pub fn iter(&self) -> impl Iterator<Item = &Locator> {
        self.candidates.iter()
    }

    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }
}

impl From<Vec<Locator>> for LocatorChain {
    fn from(candidates: Vec<Locator>) -> Self {
        Self { candidates }
    }
}

impl IntoIterator for LocatorChain {
    type Item = Locator;
    type IntoIter = std::vec::IntoIter<Locator>;

    fn into_iter(self) -> Self::IntoIter {
        self.candidates.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn viewport_validity() {
        assert!(Viewport::new(1080, 2280).is_valid());
        assert!(!Viewport::new(0, 2280).is_valid());
        assert!(!Viewport::new(1080, 0).is_valid());
    }

    #[test]
    fn viewport_center() {
        assert_eq!(Viewport::new(1080, 2280).center(), (540, 1140));
    }

    #[test]
    fn direction_signs() {
        assert_eq!(Direction::Up.sign(), -1);
        assert_eq!(Direction::Left.sign(), -1);
        assert_eq!(Direction::Down.sign(), 1);
        assert_eq!(Direction::Right.sign(), 1);
    }

    #[test]
    fn rect_center_and_min_side() {
        let rect = ElementRect::new(100, 200, 300, 120);
        assert_eq!(rect.center(), (250, 260));
        assert_eq!(rect.min_side(), 120);
    }

    #[test]
    fn locator_constructors_build_wire_tags() {
        let loc = Locator::accessibility_id("Login");
        assert_eq!(loc.strategy.as_wire(), "accessibility id");
        assert_eq!(loc.value, "Login");

        let desc = Locator::content_desc("Settings");
        assert_eq!(desc.strategy.as_wire(), "xpath");
        assert_eq!(desc.value, "//*[@content-desc='Settings']");
    }

    #[test]
    fn chain_preserves_order() {
        let chain = LocatorChain::new()
            .with(Locator::content_desc("Login"))
            .with(Locator::text("Login"))
            .with(Locator::class_name("android.widget.Button"));

        assert_eq!(chain.len(), 3);
        let values: Vec<_> = chain.iter().map(|l| l.strategy.as_wire()).collect();
        assert_eq!(values, ["xpath", "xpath", "class name"]);
    }
}
