//! # Roster Security
//!
//! Security utilities: password hashing, session tokens, redirect validation.

pub mod password;
pub mod session;
pub mod redirect;

pub use password::{PasswordError, PasswordService};
pub use session::SessionToken;
pub use redirect::safe_redirect_target;
