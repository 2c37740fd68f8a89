//! HTMX request detection and `HX-Trigger` notifications.
//!
//! Cart mutations answer HTMX requests with a fragment plus an `HX-Trigger`
//! header carrying client events:
//!
//! ```json
//! {"cart-updated": {"count": 3}, "notify": {"level": "success", "message": "Added to cart"}}
//! ```
//!
//! The page script listens for `notify` to show a toast and for
//! `cart-updated` to refresh the header badge. Plain form posts get a
//! redirect instead.

use std::convert::Infallible;
use std::fmt::Write as _;

use axum::extract::FromRequestParts;
use axum::http::{HeaderName, HeaderValue, request::Parts};
use axum::response::{IntoResponseParts, ResponseParts};
use serde::Serialize;
use serde_json::{Map, Value, json};

/// Request header set by HTMX on every request it issues.
pub const HX_REQUEST: &str = "hx-request";

/// Response header carrying client-side events.
pub const HX_TRIGGER: &str = "hx-trigger";

/// Whether the request was issued by HTMX.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HxRequest(pub bool);

impl<S> FromRequestParts<S> for HxRequest
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(Self(
            parts
                .headers
                .get(HX_REQUEST)
                .is_some_and(|v| v.as_bytes() == b"true"),
        ))
    }
}

/// Toast severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    Success,
    Info,
    Error,
}

/// A toast shown by the page script.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notify {
    pub level: Level,
    pub message: String,
}

impl Notify {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: Level::Success,
            message: message.into(),
        }
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self {
            level: Level::Info,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: Level::Error,
            message: message.into(),
        }
    }
}

/// Events for the `HX-Trigger` header.
#[derive(Debug, Clone, Default)]
pub struct Trigger {
    events: Map<String, Value>,
}

impl Trigger {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Announce the new cart item count.
    #[must_use]
    pub fn cart_updated(mut self, count: u64) -> Self {
        self.events
            .insert("cart-updated".to_string(), json!({ "count": count }));
        self
    }

    /// Show a toast.
    #[must_use]
    pub fn notify(mut self, notify: &Notify) -> Self {
        self.events.insert(
            "notify".to_string(),
            serde_json::to_value(notify).unwrap_or(Value::Null),
        );
        self
    }

    /// Serialized header value.
    #[must_use]
    pub fn to_header_value(&self) -> Option<HeaderValue> {
        if self.events.is_empty() {
            return None;
        }
        // Header values must be visible ASCII
        let body = Value::Object(self.events.clone()).to_string();
        HeaderValue::from_str(&ascii_escape(&body)).ok()
    }
}

impl IntoResponseParts for Trigger {
    type Error = Infallible;

    fn into_response_parts(self, mut res: ResponseParts) -> Result<ResponseParts, Self::Error> {
        if let Some(value) = self.to_header_value() {
            res.headers_mut()
                .insert(HeaderName::from_static(HX_TRIGGER), value);
        } else {
            tracing::debug!("Empty HX-Trigger not sent");
        }
        Ok(res)
    }
}

/// Escape non-ASCII characters in serialized JSON as `\uXXXX`.
fn ascii_escape(json: &str) -> String {
    let mut out = String::with_capacity(json.len());
    for c in json.chars() {
        if c.is_ascii() {
            out.push(c);
        } else {
            let mut units = [0u16; 2];
            for unit in c.encode_utf16(&mut units) {
                let _ = write!(out, "\\u{unit:04x}");
            }
        }
    }
    out
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_trigger_payload() {
        let value = Trigger::new()
            .cart_updated(3)
            .notify(&Notify::success("Added to cart"))
            .to_header_value()
            .unwrap();
        let parsed: Value = serde_json::from_str(value.to_str().unwrap()).unwrap();
        assert_eq!(parsed["cart-updated"]["count"], 3);
        assert_eq!(parsed["notify"]["level"], "success");
        assert_eq!(parsed["notify"]["message"], "Added to cart");
    }

    #[test]
    fn test_empty_trigger_has_no_header() {
        assert!(Trigger::new().to_header_value().is_none());
    }

    #[test]
    fn test_non_ascii_is_escaped() {
        let value = Trigger::new()
            .notify(&Notify::info("Add ₹102 more for free shipping"))
            .to_header_value()
            .unwrap();
        let raw = value.to_str().unwrap();
        assert!(raw.contains("\\u20b9"));
        let parsed: Value = serde_json::from_str(raw).unwrap();
        assert_eq!(parsed["notify"]["message"], "Add ₹102 more for free shipping");
    }
}
