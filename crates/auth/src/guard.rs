use serde::Serialize;

use crate::{AuthzError, Principal};

/// A capability check attached to an endpoint.
///
/// Endpoints declare an ordered list of guards; see [`crate::authorize`].
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Guard {
    /// The trusted admin marker must be present and truthy.
    AdminRequired,
    /// A caller user identity must be present.
    UserRequired,
}

impl Guard {
    pub fn check(&self, principal: &Principal) -> Result<(), AuthzError> {
        match self {
            Guard::AdminRequired if principal.is_admin() => Ok(()),
            Guard::AdminRequired => Err(AuthzError::Unauthorized(*self)),
            Guard::UserRequired => principal.require_user().map(|_| ()),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Guard::AdminRequired => "admin_required",
            Guard::UserRequired => "user_required",
        }
    }

    /// What the caller failed to present.
    pub fn requirement(&self) -> &'static str {
        match self {
            Guard::AdminRequired => "administrator identity required",
            Guard::UserRequired => "user identity required",
        }
    }
}

impl core::fmt::Display for Guard {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}
