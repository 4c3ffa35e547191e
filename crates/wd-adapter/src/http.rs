//! HTTP implementation of the Device Session Port.
//!
//! `HttpDeviceSession` speaks W3C WebDriver (with the Appium touch extension)
//! over HTTP+JSON against a remote endpoint. It binds to a session someone
//! else created; it never negotiates capabilities itself.

use std::time::Duration;

use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use fingertip_core_types::{
    DriverError, ElementId, ElementRect, Locator, SessionId, SwipeGesture, Viewport,
};
use reqwest::{Client, RequestBuilder, StatusCode};
use serde_json::{json, Value};
use tracing::{debug, warn};
use url::Url;

use crate::session::{DeviceSession, DriverStatus};
use crate::wire::{
    extract_element_id, ErrorValue, FindParams, RectValue, StatusValue, SwipeParams, WindowRect,
};

/// Connection settings for a remote WebDriver endpoint.
#[derive(Clone, Debug)]
pub struct DriverConfig {
    /// Root of the automation server, e.g. `http://127.0.0.1:4723`.
    pub base_url: String,

    /// Per-request timeout. Bounds every port call; nothing in the engine
    /// waits longer than this on one HTTP exchange.
    pub http_timeout: Duration,
}

impl Default for DriverConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:4723".to_string(),
            http_timeout: Duration::from_secs(30),
        }
    }
}

impl DriverConfig {
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_http_timeout(mut self, timeout: Duration) -> Self {
        self.http_timeout = timeout;
        self
    }
}

/// Faults a single wire exchange can produce. `NoSuchElement` is split out so
/// find calls can map it to `Ok(None)` instead of an error.
enum WireFault {
    NoSuchElement,
    Driver(DriverError),
}

impl From<WireFault> for DriverError {
    fn from(fault: WireFault) -> Self {
        match fault {
            // Only reachable when a non-find endpoint answers with the find
            // error code; treat it as a protocol fault.
            WireFault::NoSuchElement => DriverError::Protocol("no such element".to_string()),
            WireFault::Driver(err) => err,
        }
    }
}

/// A live WebDriver session reached over HTTP.
pub struct HttpDeviceSession {
    client: Client,
    base: Url,
    session: SessionId,
}

impl HttpDeviceSession {
    /// Bind to an existing remote session.
    pub fn attach(config: DriverConfig, session: SessionId) -> Result<Self, DriverError> {
        let mut base = Url::parse(&config.base_url)
            .map_err(|err| DriverError::Configuration(format!("invalid base url: {err}")))?;
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }
        let client = Client::builder()
            .timeout(config.http_timeout)
            .build()
            .map_err(|err| DriverError::Configuration(format!("http client: {err}")))?;
        Ok(Self {
            client,
            base,
            session,
        })
    }

    fn server_url(&self, path: &str) -> String {
        format!("{}{}", self.base, path)
    }

    fn session_url(&self, path: &str) -> String {
        format!("{}session/{}/{}", self.base, self.session.0, path)
    }

    /// Run one exchange and unwrap the `{"value": ...}` envelope. Failure
    /// payloads become `WireFault`s; the caller decides what absence means.
    async fn execute(&self, request: RequestBuilder, what: &str) -> Result<Value, WireFault> {
        let response = request.send().await.map_err(|err| {
            WireFault::Driver(DriverError::Transport(format!("{what}: {err}")))
        })?;
        let status = response.status();
        let body: Value = response.json().await.map_err(|err| {
            WireFault::Driver(DriverError::Decode(format!("{what}: {err}")))
        })?;
        let value = body.get("value").cloned().unwrap_or(Value::Null);

        if status.is_success() {
            return Ok(value);
        }

        let error: ErrorValue = serde_json::from_value(value).unwrap_or(ErrorValue {
            error: None,
            message: None,
        });
        if status == StatusCode::NOT_FOUND && error.is_no_such_element() {
            return Err(WireFault::NoSuchElement);
        }
        if error.error.as_deref() == Some("invalid session id") {
            return Err(WireFault::Driver(DriverError::InvalidSession(
                error.describe(),
            )));
        }
        warn!(what, status = %status, error = %error.describe(), "driver call failed");
        Err(WireFault::Driver(DriverError::Protocol(format!(
            "{what}: {}",
            error.describe()
        ))))
    }

    async fn get(&self, url: String, what: &str) -> Result<Value, WireFault> {
        self.execute(self.client.get(url), what).await
    }

    async fn post(&self, url: String, body: Value, what: &str) -> Result<Value, WireFault> {
        self.execute(self.client.post(url).json(&body), what).await
    }

    fn decode<T: serde::de::DeserializeOwned>(value: Value, what: &str) -> Result<T, DriverError> {
        serde_json::from_value(value)
            .map_err(|err| DriverError::Decode(format!("{what}: {err}")))
    }
}

#[async_trait]
impl DeviceSession for HttpDeviceSession {
    fn id(&self) -> &SessionId {
        &self.session
    }

    async fn viewport(&self) -> Result<Viewport, DriverError> {
        let value = self
            .get(self.session_url("window/rect"), "window rect")
            .await?;
        let rect: WindowRect = Self::decode(value, "window rect")?;
        let viewport = Viewport::from(&rect);
        debug!(session = %self.session, %viewport, "fetched viewport");
        Ok(viewport)
    }

    async fn perform_swipe(&self, gesture: &SwipeGesture) -> Result<(), DriverError> {
        debug!(session = %self.session, %gesture, "issuing swipe");
        let body = serde_json::to_value(SwipeParams::from(gesture))
            .map_err(|err| DriverError::Decode(format!("swipe params: {err}")))?;
        self.post(self.session_url("touch/swipe"), body, "swipe")
            .await?;
        Ok(())
    }

    async fn find_element(&self, locator: &Locator) -> Result<Option<ElementId>, DriverError> {
        let body = serde_json::to_value(FindParams::from(locator))
            .map_err(|err| DriverError::Decode(format!("find params: {err}")))?;
        match self
            .post(self.session_url("element"), body, "find element")
            .await
        {
            Ok(value) => match extract_element_id(&value) {
                Some(id) => Ok(Some(id)),
                None => Err(DriverError::Decode(
                    "find element: payload carried no element key".to_string(),
                )),
            },
            Err(WireFault::NoSuchElement) => Ok(None),
            Err(WireFault::Driver(err)) => Err(err),
        }
    }

    async fn find_elements(&self, locator: &Locator) -> Result<Vec<ElementId>, DriverError> {
        let body = serde_json::to_value(FindParams::from(locator))
            .map_err(|err| DriverError::Decode(format!("find params: {err}")))?;
        match self
            .post(self.session_url("elements"), body, "find elements")
            .await
        {
            Ok(Value::Array(entries)) => {
                Ok(entries.iter().filter_map(extract_element_id).collect())
            }
            Ok(_) => Err(DriverError::Decode(
                "find elements: expected an array payload".to_string(),
            )),
            // An empty match is an empty array on conforming servers, but
            // some answer with the single-element error code instead.
            Err(WireFault::NoSuchElement) => Ok(Vec::new()),
            Err(WireFault::Driver(err)) => Err(err),
        }
    }

    async fn element_attribute(
        &self,
        element: &ElementId,
        name: &str,
    ) -> Result<Option<String>, DriverError> {
        let url = self.session_url(&format!("element/{}/attribute/{}", element.0, name));
        let value = self.get(url, "element attribute").await?;
        Ok(match value {
            Value::Null => None,
            Value::String(text) => Some(text),
            other => Some(other.to_string()),
        })
    }

    async fn element_rect(&self, element: &ElementId) -> Result<ElementRect, DriverError> {
        let url = self.session_url(&format!("element/{}/rect", element.0));
        let value = self.get(url, "element rect").await?;
        let rect: RectValue = Self::decode(value, "element rect")?;
        Ok(ElementRect::from(&rect))
    }

    async fn element_enabled(&self, element: &ElementId) -> Result<bool, DriverError> {
        let url = self.session_url(&format!("element/{}/enabled", element.0));
        let value = self.get(url, "element enabled").await?;
        Self::decode(value, "element enabled")
    }

    async fn element_click(&self, element: &ElementId) -> Result<(), DriverError> {
        let url = self.session_url(&format!("element/{}/click", element.0));
        self.post(url, json!({}), "element click").await?;
        Ok(())
    }

    async fn screenshot(&self) -> Result<Vec<u8>, DriverError> {
        let value = self
            .get(self.session_url("screenshot"), "screenshot")
            .await?;
        let encoded: String = Self::decode(value, "screenshot")?;
        BASE64
            .decode(encoded.as_bytes())
            .map_err(|err| DriverError::Decode(format!("screenshot: {err}")))
    }

    async fn status(&self) -> Result<DriverStatus, DriverError> {
        let value = self.get(self.server_url("status"), "status").await?;
        let status: StatusValue = Self::decode(value, "status")?;
        Ok(DriverStatus {
            ready: status.ready,
            message: status.message,
        })
    }

    async fn quit(&self) -> Result<(), DriverError> {
        debug!(session = %self.session, "terminating session");
        self.execute(
            self.client.delete(format!("{}session/{}", self.base, self.session.0)),
            "quit",
        )
        .await
        .map_err(DriverError::from)?;
        Ok(())
    }
}
