//! One-shot flash messages carried in the `roster_flash` cookie.
//!
//! POST handlers attach messages to their redirect; the next GET view reads
//! them into its `messages` field and clears the cookie.

use axum::{
    extract::FromRequestParts,
    http::{header, request::Parts, StatusCode},
    response::{IntoResponse, Response},
};
use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
use serde::{Deserialize, Serialize};
use std::convert::Infallible;
use tracing::debug;

use roster_shared::constants::FLASH_COOKIE;

use crate::cookies::{read_cookie, set_cookie};

/// Flash lifetime; long enough to survive one redirect.
const FLASH_MAX_AGE_SECONDS: i64 = 300;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FlashLevel {
    Success,
    Info,
    Warning,
    Danger,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlashMessage {
    pub level: FlashLevel,
    pub message: String,
}

impl FlashMessage {
    pub fn new(level: FlashLevel, message: impl Into<String>) -> Self {
        Self {
            level,
            message: message.into(),
        }
    }
}

pub fn encode(messages: &[FlashMessage]) -> String {
    // Serializing plain strings and enums cannot fail.
    let json = serde_json::to_vec(messages).unwrap_or_default();
    URL_SAFE_NO_PAD.encode(json)
}

/// Tampered or stale cookies decode to no messages.
pub fn decode(value: &str) -> Vec<FlashMessage> {
    URL_SAFE_NO_PAD
        .decode(value)
        .ok()
        .and_then(|bytes| serde_json::from_slice(&bytes).ok())
        .unwrap_or_default()
}

/// Messages waiting to be shown.
#[derive(Debug, Clone, Default)]
pub struct IncomingFlash(pub Vec<FlashMessage>);

impl<S: Send + Sync> FromRequestParts<S> for IncomingFlash {
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let messages = read_cookie(&parts.headers, FLASH_COOKIE)
            .map(decode)
            .unwrap_or_default();
        Ok(IncomingFlash(messages))
    }
}

/// `303 See Other` to `location`, optionally leaving a flash message behind.
#[derive(Debug, Clone)]
pub struct FlashRedirect {
    location: String,
    messages: Vec<FlashMessage>,
    cookies: Vec<String>,
}

impl FlashRedirect {
    pub fn to(location: impl Into<String>) -> Self {
        Self {
            location: location.into(),
            messages: Vec::new(),
            cookies: Vec::new(),
        }
    }

    pub fn with(mut self, level: FlashLevel, message: impl Into<String>) -> Self {
        self.messages.push(FlashMessage::new(level, message));
        self
    }

    /// Extra `Set-Cookie` header, e.g. the session cookie.
    pub fn with_cookie(mut self, cookie: String) -> Self {
        self.cookies.push(cookie);
        self
    }

    pub fn location(&self) -> &str {
        &self.location
    }
}

impl IntoResponse for FlashRedirect {
    fn into_response(self) -> Response {
        debug!("Redirecting to {}", self.location);
        let mut builder = Response::builder()
            .status(StatusCode::SEE_OTHER)
            .header(header::LOCATION, self.location);
        for cookie in self.cookies {
            builder = builder.header(header::SET_COOKIE, cookie);
        }
        if !self.messages.is_empty() {
            builder = builder.header(
                header::SET_COOKIE,
                set_cookie(FLASH_COOKIE, &encode(&self.messages), FLASH_MAX_AGE_SECONDS, false),
            );
        }
        builder
            .body(axum::body::Body::empty())
            .unwrap_or_else(|_| StatusCode::INTERNAL_SERVER_ERROR.into_response())
    }
}
