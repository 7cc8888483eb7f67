//! Cookie-backed login sessions.
//!
//! A session is a random 256-bit token, base64url encoded, stored in the
//! `session` cookie and mapped to a user id in an in-memory TTL cache. The
//! authenticated identity reaches handlers as an explicit extractor value:
//! [`CurrentUser`] for routes that require a login and [`Viewer`] for routes
//! that only adapt their output to it.

use axum::{async_trait, extract::FromRequestParts, http::request::Parts};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use base64::Engine;
use model::entities::user;
use moka::future::Cache;
use rand::RngCore;
use std::time::Duration;
use tracing::{debug, trace};

use crate::error::AppError;
use crate::schemas::AppState;

pub const SESSION_COOKIE: &str = "session";

/// Token -> user id, with idle expiry.
#[derive(Clone, Debug)]
pub struct SessionStore {
    sessions: Cache<String, i32>,
}

impl SessionStore {
    pub fn new(capacity: u64, ttl: Duration) -> Self {
        let sessions = Cache::builder()
            .max_capacity(capacity)
            .time_to_idle(ttl)
            .build();
        Self { sessions }
    }

    /// Opens a session for `user_id` and returns its token.
    pub async fn open(&self, user_id: i32) -> String {
        let token = generate_token();
        self.sessions.insert(token.clone(), user_id).await;
        debug!("Opened session for user {}", user_id);
        token
    }

    pub async fn user_id(&self, token: &str) -> Option<i32> {
        self.sessions.get(token).await
    }

    pub async fn close(&self, token: &str) {
        self.sessions.invalidate(token).await;
    }
}

fn generate_token() -> String {
    let mut random_bytes = [0u8; 32];
    rand::thread_rng().fill_bytes(&mut random_bytes);
    base64::engine::general_purpose::URL_SAFE_NO_PAD.encode(random_bytes)
}

pub fn session_cookie(token: String) -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE, token))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .build()
}

pub fn removal_cookie() -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE, "")).path("/").build()
}

/// The logged-in user, if any.
#[derive(Debug, Clone)]
pub struct Viewer(pub Option<user::Model>);

impl Viewer {
    pub fn user(&self) -> Option<&user::Model> {
        self.0.as_ref()
    }
}

#[async_trait]
impl FromRequestParts<AppState> for Viewer {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let jar = CookieJar::from_headers(&parts.headers);
        let Some(token) = jar.get(SESSION_COOKIE).map(|c| c.value().to_string()) else {
            trace!("No session cookie");
            return Ok(Viewer(None));
        };
        let Some(user_id) = state.sessions.user_id(&token).await else {
            debug!("Session cookie does not match a live session");
            return Ok(Viewer(None));
        };
        let user = catalog::accounts::get_user(&state.db, user_id).await?;
        Ok(Viewer(user))
    }
}

/// A logged-in user. Rejects the request with 401 otherwise.
#[derive(Debug, Clone)]
pub struct CurrentUser(pub user::Model);

#[async_trait]
impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        match Viewer::from_request_parts(parts, state).await? {
            Viewer(Some(user)) => Ok(CurrentUser(user)),
            Viewer(None) => Err(AppError::unauthorized(
                "Please log in to access this page.",
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokens_are_random_and_url_safe() {
        let a = generate_token();
        let b = generate_token();
        assert_ne!(a, b);
        assert_eq!(a.len(), 43);
        assert!(a.chars().all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_'));
    }

    #[tokio::test]
    async fn test_open_and_close_session() {
        let store = SessionStore::new(10, Duration::from_secs(60));
        let token = store.open(7).await;
        assert_eq!(store.user_id(&token).await, Some(7));
        assert_eq!(store.user_id("bogus").await, None);

        store.close(&token).await;
        assert_eq!(store.user_id(&token).await, None);
    }
}
