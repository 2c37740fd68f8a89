//! Session middleware configuration.
//!
//! Carts live in an in-memory store keyed by a signed session cookie. A
//! restart drops every session.

use secrecy::ExposeSecret;
use tower_sessions::cookie::{Key, SameSite, time::Duration};
use tower_sessions::{Expiry, MemoryStore, SessionManagerLayer};

use crate::config::StorefrontConfig;

/// Session cookie name.
pub const SESSION_COOKIE_NAME: &str = "lk_session";

/// Session expiry time in seconds (7 days).
const SESSION_EXPIRY_SECONDS: i64 = 7 * 24 * 60 * 60;

/// Session layer construction errors.
#[derive(Debug, thiserror::Error)]
pub enum SessionLayerError {
    #[error("session secret cannot be used as a signing key: {0}")]
    Key(String),
}

/// Create the session layer backed by a [`MemoryStore`].
///
/// The cookie is signed with a key derived from the configured session
/// secret and marked `Secure` when the base URL is `https`.
///
/// # Errors
///
/// Returns an error if the secret is too short to build a signing key.
pub fn create_session_layer(
    config: &StorefrontConfig,
) -> Result<SessionManagerLayer<MemoryStore, tower_sessions::service::SignedCookie>, SessionLayerError>
{
    let key = Key::try_from(config.session_secret.expose_secret().as_bytes())
        .map_err(|e| SessionLayerError::Key(e.to_string()))?;

    Ok(SessionManagerLayer::new(MemoryStore::default())
        .with_name(SESSION_COOKIE_NAME)
        .with_expiry(Expiry::OnInactivity(Duration::seconds(
            SESSION_EXPIRY_SECONDS,
        )))
        .with_secure(config.is_secure())
        .with_same_site(SameSite::Lax)
        .with_http_only(true)
        .with_path("/")
        .with_signed(key))
}
