//! Integration tests for the LK Printers storefront.
//!
//! The full router (sessions, middleware and templates included) is driven
//! in-process with [`tower::ServiceExt::oneshot`], against the data files
//! bundled with the storefront crate.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p lk-printers-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `cart` - Session cart flows
//! - `catalog` - Listing, category and product pages
//! - `pages` - Informational pages, 404 and health check

#![allow(clippy::missing_panics_doc, clippy::expect_used)]

use std::path::PathBuf;

use axum::Router;
use axum::body::Body;
use axum::http::{HeaderMap, Request, StatusCode, header};
use http_body_util::BodyExt;
use lk_printers_core::ShippingPolicy;
use lk_printers_storefront::config::{SentryConfig, StorefrontConfig};
use lk_printers_storefront::state::AppState;
use secrecy::SecretString;
use tower::ServiceExt;

/// Signing secret that passes the storefront's strength checks.
pub const TEST_SECRET: &str =
    "k3J9!xQ2@vL7#pR5$mN8%tW1^zB4&cF6*hY0(dG2)sA9-eU3+iO7=lK5_jH8qZ1wX4";

/// Root of the storefront crate, where `data/`, `content/` and `static/` live.
#[must_use]
pub fn storefront_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../storefront")
}

/// Configuration pointing at the bundled data, served over plain HTTP so the
/// session cookie is not marked `Secure`.
#[must_use]
pub fn test_config() -> StorefrontConfig {
    let root = storefront_dir();
    StorefrontConfig {
        host: "127.0.0.1".parse().expect("valid address"),
        port: 0,
        base_url: url::Url::parse("http://localhost:3000").expect("valid url"),
        session_secret: SecretString::from(TEST_SECRET),
        data_dir: root.join("data"),
        content_dir: root.join("content"),
        static_dir: root.join("static"),
        shipping: ShippingPolicy::default(),
        sentry: SentryConfig::default(),
    }
}

/// Build the full storefront router with a fresh in-memory session store.
#[must_use]
pub fn test_app() -> Router {
    let state = AppState::load(test_config()).expect("bundled data loads");
    lk_printers_storefront::app(state).expect("session layer builds")
}

/// A response with its body collected.
#[derive(Debug)]
pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: String,
}

impl TestResponse {
    /// A response header as a string, if present.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }
}

/// One browser: a router plus the session cookie it was last handed.
///
/// Clones of a [`Router`] share the session store, so two clients built
/// from the same app are two independent visitors to one server.
#[derive(Clone)]
pub struct TestClient {
    app: Router,
    cookie: Option<String>,
}

impl TestClient {
    #[must_use]
    pub const fn new(app: Router) -> Self {
        Self { app, cookie: None }
    }

    /// The `name=value` part of the current session cookie.
    #[must_use]
    pub fn cookie(&self) -> Option<&str> {
        self.cookie.as_deref()
    }

    pub async fn get(&mut self, uri: &str) -> TestResponse {
        let request = Request::builder().uri(uri);
        self.send(request, Body::empty()).await
    }

    /// Plain form post, as sent by a browser without JavaScript.
    pub async fn post_form(&mut self, uri: &str, form: &str) -> TestResponse {
        let request = Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded");
        self.send(request, Body::from(form.to_owned())).await
    }

    /// Form post issued by HTMX.
    pub async fn post_htmx(&mut self, uri: &str, form: &str) -> TestResponse {
        let request = Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .header("HX-Request", "true");
        self.send(request, Body::from(form.to_owned())).await
    }

    async fn send(&mut self, mut request: axum::http::request::Builder, body: Body) -> TestResponse {
        if let Some(cookie) = &self.cookie {
            request = request.header(header::COOKIE, cookie);
        }
        let request = request.body(body).expect("valid request");

        let response = self
            .app
            .clone()
            .oneshot(request)
            .await
            .expect("router is infallible");

        if let Some(set_cookie) = response
            .headers()
            .get(header::SET_COOKIE)
            .and_then(|v| v.to_str().ok())
            && let Some(pair) = set_cookie.split(';').next()
        {
            self.cookie = Some(pair.trim().to_owned());
        }

        let status = response.status();
        let headers = response.headers().clone();
        let bytes = response
            .into_body()
            .collect()
            .await
            .expect("body collects")
            .to_bytes();

        TestResponse {
            status,
            headers,
            body: String::from_utf8_lossy(&bytes).into_owned(),
        }
    }
}
