//! WebDriver JSON wire types.
//!
//! Shapes follow the W3C WebDriver protocol with the Appium extensions the
//! reference drivers speak: every response body is a `{"value": ...}`
//! envelope, element handles hide behind the W3C element key (or the legacy
//! `ELEMENT` key on older servers).

use fingertip_core_types::{ElementId, ElementRect, Locator, SwipeGesture, Viewport};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// W3C element key as defined by the WebDriver spec.
pub const W3C_ELEMENT_KEY: &str = "element-6066-11e4-a52e-4f735466cecf";

/// Legacy JSON-wire element key still emitted by older Appium servers.
pub const LEGACY_ELEMENT_KEY: &str = "ELEMENT";

/// Response envelope wrapping every WebDriver payload.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ValueEnvelope<T> {
    pub value: T,
}

/// Body of `POST /session/{id}/element` and `/elements`.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct FindParams {
    pub using: String,
    pub value: String,
}

impl From<&Locator> for FindParams {
    fn from(locator: &Locator) -> Self {
        Self {
            using: locator.strategy.as_wire().to_string(),
            value: locator.value.clone(),
        }
    }
}

/// Body of `POST /session/{id}/touch/swipe`.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SwipeParams {
    pub start_x: i32,
    pub start_y: i32,
    pub end_x: i32,
    pub end_y: i32,
    pub duration: u64,
}

impl From<&SwipeGesture> for SwipeParams {
    fn from(gesture: &SwipeGesture) -> Self {
        Self {
            start_x: gesture.start_x,
            start_y: gesture.start_y,
            end_x: gesture.end_x,
            end_y: gesture.end_y,
            duration: gesture.duration_ms,
        }
    }
}

/// Payload of `GET /session/{id}/window/rect`.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct WindowRect {
    pub x: Option<f64>,
    pub y: Option<f64>,
    pub width: f64,
    pub height: f64,
}

impl From<&WindowRect> for Viewport {
    fn from(rect: &WindowRect) -> Self {
        Viewport::new(rect.width.max(0.0) as u32, rect.height.max(0.0) as u32)
    }
}

/// Payload of `GET /session/{id}/element/{eid}/rect`. Servers are sloppy
/// about integer vs float here, so everything arrives as `f64`.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RectValue {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl From<&RectValue> for ElementRect {
    fn from(rect: &RectValue) -> Self {
        ElementRect::new(
            rect.x as i32,
            rect.y as i32,
            rect.width.max(0.0) as u32,
            rect.height.max(0.0) as u32,
        )
    }
}

/// Payload of `GET /status`.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct StatusValue {
    #[serde(default)]
    pub ready: bool,
    #[serde(default)]
    pub message: Option<String>,
}

/// Error payload carried inside the value envelope on failures.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ErrorValue {
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

impl ErrorValue {
    /// The spec-defined error code for a find that matched nothing.
    pub fn is_no_such_element(&self) -> bool {
        self.error.as_deref() == Some("no such element")
    }

    pub fn describe(&self) -> String {
        match (&self.error, &self.message) {
            (Some(code), Some(msg)) => format!("{code}: {msg}"),
            (Some(code), None) => code.clone(),
            (None, Some(msg)) => msg.clone(),
            (None, None) => "unspecified driver error".to_string(),
        }
    }
}

/// Pull an element handle out of a find-element payload, accepting both the
/// W3C and legacy key.
pub fn extract_element_id(value: &Value) -> Option<ElementId> {
    let object = value.as_object()?;
    object
        .get(W3C_ELEMENT_KEY)
        .or_else(|| object.get(LEGACY_ELEMENT_KEY))
        .and_then(Value::as_str)
        .map(|raw| ElementId(raw.to_string()))
}
