//! `notify-auth`: pure authorization boundary.
//!
//! This crate is intentionally decoupled from HTTP and storage. Identity is
//! asserted by an upstream gateway; nothing here verifies credentials.

pub mod authorize;
pub mod guard;
pub mod principal;

pub use authorize::{AuthzError, authorize, require_owner};
pub use guard::Guard;
pub use principal::{Principal, is_truthy};
