use notify_core::UserId;

use crate::AuthzError;
use crate::guard::Guard;

/// Identity attributed to a request via trusted gateway headers.
///
/// A principal can carry the admin marker, a user identity, both, or neither.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Principal {
    admin: bool,
    user_id: Option<UserId>,
}

impl Principal {
    pub fn new(admin: bool, user_id: Option<UserId>) -> Self {
        Self { admin, user_id }
    }

    /// No identity at all.
    pub fn anonymous() -> Self {
        Self::default()
    }

    pub fn admin() -> Self {
        Self::new(true, None)
    }

    pub fn user(user_id: UserId) -> Self {
        Self::new(false, Some(user_id))
    }

    /// Build a principal from raw trusted header values.
    ///
    /// The admin marker counts only when truthy (see [`is_truthy`]). A user
    /// header that does not parse as a [`UserId`] is treated as absent.
    pub fn from_markers(admin_marker: Option<&str>, user_marker: Option<&str>) -> Self {
        let admin = admin_marker.is_some_and(is_truthy);
        let user_id = user_marker.and_then(|raw| UserId::parse(raw).ok());
        Self { admin, user_id }
    }

    pub fn is_admin(&self) -> bool {
        self.admin
    }

    pub fn user_id(&self) -> Option<&UserId> {
        self.user_id.as_ref()
    }

    /// The acting user, or `Unauthorized` when no user identity was presented.
    pub fn require_user(&self) -> Result<&UserId, AuthzError> {
        self.user_id
            .as_ref()
            .ok_or(AuthzError::Unauthorized(Guard::UserRequired))
    }
}

/// Whether a marker header value means "yes".
///
/// Empty, `0`, `false`, `no` and `off` (case-insensitive) are falsy; anything
/// else is truthy.
pub fn is_truthy(value: &str) -> bool {
    let value = value.trim();
    !(value.is_empty()
        || value == "0"
        || value.eq_ignore_ascii_case("false")
        || value.eq_ignore_ascii_case("no")
        || value.eq_ignore_ascii_case("off"))
}
