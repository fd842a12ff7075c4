use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use roster_core::error::DomainError;

use crate::flash::{FlashLevel, FlashRedirect};
use crate::response::ApiResponse;

#[derive(Error, Debug)]
pub enum ApiError {
    /// Reported to the user through a flash message on the redirect target.
    #[error("Redirect to {location}: {message}")]
    Redirect {
        location: String,
        level: FlashLevel,
        message: String,
    },

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

impl ApiError {
    pub fn redirect(location: impl Into<String>, level: FlashLevel, message: impl Into<String>) -> Self {
        ApiError::Redirect {
            location: location.into(),
            level,
            message: message.into(),
        }
    }

    /// Maps a service failure. Business-rule rejections go back to `back`
    /// with the reason; login-gate failures go to the login form.
    pub fn from_domain(e: DomainError, back: &str) -> Self {
        if e.is_authentication_failure() {
            return ApiError::redirect("/login", FlashLevel::Danger, login_failure_message(&e));
        }
        if e.is_business_rule() {
            return ApiError::redirect(back, FlashLevel::Danger, e.to_string());
        }
        match e {
            DomainError::UserNotFound
            | DomainError::CompanyNotFound
            | DomainError::PlanNotFound
            | DomainError::EmployeeNotFound => ApiError::NotFound(e.to_string()),
            DomainError::ValidationError(msg) => ApiError::BadRequest(msg),
            DomainError::DatabaseError(msg) => ApiError::DatabaseError(msg),
            other => ApiError::InternalError(other.to_string()),
        }
    }
}

/// Text shown on the login form. Unknown email and wrong password share one
/// message.
fn login_failure_message(e: &DomainError) -> &'static str {
    match e {
        DomainError::UserNotActive => "This account has been disabled.",
        DomainError::CompanyNotActive => "This company account has been disabled.",
        DomainError::ContractNotFound => "No active contract. Please contact your administrator.",
        DomainError::ContractExpired => "Your contract has expired. Please contact your administrator.",
        _ => "Invalid email or password.",
    }
}

impl From<DomainError> for ApiError {
    fn from(e: DomainError) -> Self {
        ApiError::from_domain(e, "/")
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code, message) = match self {
            ApiError::Redirect {
                location,
                level,
                message,
            } => {
                tracing::info!("Rejected with redirect to {}: {}", location, message);
                return FlashRedirect::to(location).with(level, message).into_response();
            }
            ApiError::NotFound(msg) => {
                tracing::warn!("Not found: {}", msg);
                (StatusCode::NOT_FOUND, "NOT_FOUND", msg)
            }
            ApiError::BadRequest(msg) => {
                tracing::warn!("Bad request: {}", msg);
                (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg)
            }
            ApiError::DatabaseError(msg) => {
                tracing::error!("Database error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "DATABASE_ERROR",
                    "Internal server error".to_string(),
                )
            }
            ApiError::InternalError(msg) => {
                tracing::error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "Internal server error".to_string(),
                )
            }
        };

        (status, Json(ApiResponse::<()>::error(code, &message))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn login_failures_share_a_message() {
        let unknown = ApiError::from_domain(DomainError::InvalidCredentials, "/");
        assert!(matches!(
            unknown,
            ApiError::Redirect { ref location, ref message, .. }
                if location == "/login" && message == "Invalid email or password."
        ));
    }

    #[test]
    fn business_rules_go_back_to_form() {
        let err = ApiError::from_domain(DomainError::EmployeeLimitReached { max: 10 }, "/employees");
        assert!(matches!(err, ApiError::Redirect { ref location, .. } if location == "/employees"));
    }

    #[test]
    fn storage_details_stay_out_of_body() {
        let response = ApiError::DatabaseError("disk I/O error at /var/db".into()).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn missing_rows_are_404() {
        let response = ApiError::from(DomainError::EmployeeNotFound).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn validation_is_400() {
        let response = ApiError::from(DomainError::ValidationError("Name is required".into())).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
