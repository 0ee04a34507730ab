use thiserror::Error;

use notify_core::UserId;

use crate::{Guard, Principal};

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum AuthzError {
    /// No acceptable identity was presented.
    #[error("unauthorized: {}", .0.requirement())]
    Unauthorized(Guard),

    /// An identity was presented but has no rights over the resource.
    #[error("forbidden")]
    Forbidden,
}

/// Run an endpoint's guards in order; the first failure wins.
///
/// - No IO
/// - No panics
pub fn authorize(principal: &Principal, guards: &[Guard]) -> Result<(), AuthzError> {
    for guard in guards {
        if let Err(e) = guard.check(principal) {
            tracing::debug!(guard = guard.as_str(), "request rejected by guard");
            return Err(e);
        }
    }
    Ok(())
}

/// Require that the acting user is `owner`.
///
/// Without a user identity this is `Unauthorized`; with a different one it is
/// `Forbidden`. Admins get no bypass here.
pub fn require_owner(principal: &Principal, owner: &UserId) -> Result<(), AuthzError> {
    let acting = principal.require_user()?;
    if acting == owner {
        Ok(())
    } else {
        Err(AuthzError::Forbidden)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn uid(s: &str) -> UserId {
        UserId::parse(s).unwrap()
    }

    #[test]
    fn empty_guard_list_admits_anyone() {
        assert_eq!(authorize(&Principal::anonymous(), &[]), Ok(()));
    }

    #[test]
    fn admin_guard_rejects_plain_users_as_unauthorized() {
        let err = authorize(&Principal::user(uid("1")), &[Guard::AdminRequired]).unwrap_err();
        assert_eq!(err, AuthzError::Unauthorized(Guard::AdminRequired));
    }

    #[test]
    fn user_guard_rejects_admin_without_identity() {
        let err = authorize(&Principal::admin(), &[Guard::UserRequired]).unwrap_err();
        assert_eq!(err, AuthzError::Unauthorized(Guard::UserRequired));
    }

    #[test]
    fn first_failing_guard_wins() {
        let guards = [Guard::UserRequired, Guard::AdminRequired];
        let err = authorize(&Principal::anonymous(), &guards).unwrap_err();
        assert_eq!(err, AuthzError::Unauthorized(Guard::UserRequired));

        let err = authorize(&Principal::user(uid("1")), &guards).unwrap_err();
        assert_eq!(err, AuthzError::Unauthorized(Guard::AdminRequired));

        let both = Principal::new(true, Some(uid("1")));
        assert_eq!(authorize(&both, &guards), Ok(()));
    }

    #[test]
    fn ownership_mismatch_is_forbidden_not_unauthorized() {
        let owner = uid("owner");
        assert_eq!(require_owner(&Principal::user(owner.clone()), &owner), Ok(()));
        assert_eq!(
            require_owner(&Principal::user(uid("other")), &owner),
            Err(AuthzError::Forbidden)
        );
        assert_eq!(
            require_owner(&Principal::anonymous(), &owner),
            Err(AuthzError::Unauthorized(Guard::UserRequired))
        );
        assert_eq!(
            require_owner(&Principal::admin(), &owner),
            Err(AuthzError::Unauthorized(Guard::UserRequired))
        );
    }
}
