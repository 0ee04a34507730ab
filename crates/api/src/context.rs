use axum::http::{HeaderMap, HeaderName, header::InvalidHeaderName};

use notify_auth::Principal;
use notify_infra::Settings;

/// Names of the headers the upstream gateway uses to assert identity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrustedHeaders {
    admin: HeaderName,
    user: HeaderName,
}

impl TrustedHeaders {
    pub fn new(admin: HeaderName, user: HeaderName) -> Self {
        Self { admin, user }
    }

    pub fn from_settings(settings: &Settings) -> Result<Self, InvalidHeaderName> {
        Ok(Self {
            admin: HeaderName::from_bytes(settings.admin_header.as_bytes())?,
            user: HeaderName::from_bytes(settings.user_header.as_bytes())?,
        })
    }

    /// Derive the request principal. Non-UTF-8 values count as absent.
    pub fn principal(&self, headers: &HeaderMap) -> Principal {
        let value = |name: &HeaderName| headers.get(name).and_then(|v| v.to_str().ok());
        Principal::from_markers(value(&self.admin), value(&self.user))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn trusted() -> TrustedHeaders {
        TrustedHeaders::from_settings(&Settings::default()).unwrap()
    }

    #[test]
    fn no_headers_is_anonymous() {
        assert_eq!(trusted().principal(&HeaderMap::new()), Principal::anonymous());
    }

    #[test]
    fn reads_both_markers() {
        let mut headers = HeaderMap::new();
        headers.insert("x-balanced-admin", HeaderValue::from_static("1"));
        headers.insert("x-balanced-user", HeaderValue::from_static("u-42"));

        let principal = trusted().principal(&headers);
        assert!(principal.is_admin());
        assert_eq!(principal.user_id().map(|u| u.as_str()), Some("u-42"));
    }

    #[test]
    fn custom_header_names_are_honoured() {
        let trusted = TrustedHeaders::new(
            HeaderName::from_static("x-gw-admin"),
            HeaderName::from_static("x-gw-user"),
        );
        let mut headers = HeaderMap::new();
        headers.insert("x-balanced-admin", HeaderValue::from_static("1"));
        headers.insert("x-gw-user", HeaderValue::from_static("7"));

        let principal = trusted.principal(&headers);
        assert!(!principal.is_admin());
        assert_eq!(principal.user_id().map(|u| u.as_str()), Some("7"));
    }
}
