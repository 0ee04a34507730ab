//! Process configuration loaded from environment variables.

use std::net::SocketAddr;

use thiserror::Error;

pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
pub const DEFAULT_ADMIN_HEADER: &str = "x-balanced-admin";
pub const DEFAULT_USER_HEADER: &str = "x-balanced-user";

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid {key}: {message}")]
    Invalid { key: &'static str, message: String },
}

/// Service settings.
///
/// | Variable       | Default              |
/// |----------------|----------------------|
/// | `CORS_DOMAIN`  | unset (CORS off)     |
/// | `BIND_ADDR`    | `0.0.0.0:8080`       |
/// | `DATABASE_URL` | unset (in-memory)    |
/// | `ADMIN_HEADER` | `x-balanced-admin`   |
/// | `USER_HEADER`  | `x-balanced-user`    |
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub bind_addr: SocketAddr,
    /// Allowed CORS origin: a single origin, `*`, or a comma-separated list.
    pub cors_domain: Option<String>,
    pub database_url: Option<String>,
    /// Trusted header carrying the admin marker (lowercase).
    pub admin_header: String,
    /// Trusted header carrying the caller's user id (lowercase).
    pub user_header: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([0, 0, 0, 0], 8080)),
            cors_domain: None,
            database_url: None,
            admin_header: DEFAULT_ADMIN_HEADER.to_string(),
            user_header: DEFAULT_USER_HEADER.to_string(),
        }
    }
}

impl Settings {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build settings from an arbitrary key lookup. Blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let bind_addr = get("BIND_ADDR")
            .unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string())
            .parse::<SocketAddr>()
            .map_err(|e| ConfigError::Invalid {
                key: "BIND_ADDR",
                message: e.to_string(),
            })?;

        let admin_header = header_name(
            "ADMIN_HEADER",
            get("ADMIN_HEADER").unwrap_or_else(|| DEFAULT_ADMIN_HEADER.to_string()),
        )?;
        let user_header = header_name(
            "USER_HEADER",
            get("USER_HEADER").unwrap_or_else(|| DEFAULT_USER_HEADER.to_string()),
        )?;
        if admin_header == user_header {
            return Err(ConfigError::Invalid {
                key: "USER_HEADER",
                message: "must differ from ADMIN_HEADER".to_string(),
            });
        }

        Ok(Self {
            bind_addr,
            cors_domain: get("CORS_DOMAIN"),
            database_url: get("DATABASE_URL"),
            admin_header,
            user_header,
        })
    }
}

fn header_name(key: &'static str, value: String) -> Result<String, ConfigError> {
    let valid = value
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
    if !valid {
        return Err(ConfigError::Invalid {
            key,
            message: format!("'{value}' is not a valid header name"),
        });
    }
    Ok(value.to_ascii_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_apply_when_nothing_is_set() {
        let settings = Settings::from_lookup(lookup(&[])).unwrap();
        assert_eq!(settings, Settings::default());
        assert_eq!(settings.bind_addr.to_string(), DEFAULT_BIND_ADDR);
    }

    #[test]
    fn values_are_read_and_normalized() {
        let settings = Settings::from_lookup(lookup(&[
            ("CORS_DOMAIN", " https://app.example.com "),
            ("BIND_ADDR", "127.0.0.1:9000"),
            ("ADMIN_HEADER", "X-Gateway-Admin"),
            ("USER_HEADER", "x-gateway-user"),
        ]))
        .unwrap();

        assert_eq!(settings.cors_domain.as_deref(), Some("https://app.example.com"));
        assert_eq!(settings.bind_addr.port(), 9000);
        assert_eq!(settings.admin_header, "x-gateway-admin");
        assert_eq!(settings.user_header, "x-gateway-user");
        assert!(settings.database_url.is_none());
    }

    #[test]
    fn blank_cors_domain_disables_cors() {
        let settings = Settings::from_lookup(lookup(&[("CORS_DOMAIN", "   ")])).unwrap();
        assert!(settings.cors_domain.is_none());
    }

    #[test]
    fn invalid_values_are_rejected() {
        let err = Settings::from_lookup(lookup(&[("BIND_ADDR", "nope")])).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { key: "BIND_ADDR", .. }));

        let err = Settings::from_lookup(lookup(&[("USER_HEADER", "x user")])).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { key: "USER_HEADER", .. }));

        let err = Settings::from_lookup(lookup(&[("USER_HEADER", "X-Balanced-Admin")])).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { key: "USER_HEADER", .. }));
    }
}
