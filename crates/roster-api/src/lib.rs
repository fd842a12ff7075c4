//! # Roster API
//!
//! HTTP surface: handlers, principal extractors, form coercion, flash
//! messages and JSON views.

pub mod cookies;
pub mod error;
pub mod extract;
pub mod flash;
pub mod forms;
pub mod handlers;
pub mod response;
pub mod router;
pub mod state;

pub use error::ApiError;
pub use router::build_router;
pub use state::AppState;
