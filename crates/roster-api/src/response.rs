//! API Response wrapper

use axum::{
    http::header,
    response::{IntoResponse, Response},
    Json,
};
use chrono::Utc;
use serde::Serialize;

use roster_shared::constants::FLASH_COOKIE;

use crate::cookies::clear_cookie;
use crate::flash::{FlashMessage, IncomingFlash};

#[derive(Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub success: bool,
    pub data: Option<T>,
    pub error: Option<ErrorBody>,
    /// Flash messages left by the previous redirect.
    pub messages: Vec<FlashMessage>,
    pub timestamp: String,
}

#[derive(Serialize)]
pub struct ErrorBody {
    pub code: String,
    pub message: String,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
            messages: Vec::new(),
            timestamp: Utc::now().to_rfc3339(),
        }
    }

    pub fn error(code: &str, message: &str) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(ErrorBody {
                code: code.to_string(),
                message: message.to_string(),
            }),
            messages: Vec::new(),
            timestamp: Utc::now().to_rfc3339(),
        }
    }

    pub fn with_messages(mut self, messages: Vec<FlashMessage>) -> Self {
        self.messages = messages;
        self
    }
}

/// JSON view of a page. Consumes pending flash messages.
pub struct View<T: Serialize> {
    data: T,
    flash: IncomingFlash,
}

impl<T: Serialize> View<T> {
    pub fn new(data: T, flash: IncomingFlash) -> Self {
        Self { data, flash }
    }
}

impl<T: Serialize> IntoResponse for View<T> {
    fn into_response(self) -> Response {
        let IncomingFlash(messages) = self.flash;
        let had_messages = !messages.is_empty();
        let body = Json(ApiResponse::success(self.data).with_messages(messages));

        if had_messages {
            ([(header::SET_COOKIE, clear_cookie(FLASH_COOKIE))], body).into_response()
        } else {
            body.into_response()
        }
    }
}
