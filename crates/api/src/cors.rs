//! Cross-origin response headers.
//!
//! Each registered endpoint gets its own middleware instance carrying the
//! methods it supports. With no configured origin the middleware is a no-op.

use std::sync::Arc;

use axum::{
    extract::State,
    http::{
        HeaderValue, Method, StatusCode,
        header::{
            ACCESS_CONTROL_ALLOW_METHODS, ACCESS_CONTROL_ALLOW_ORIGIN, ACCESS_CONTROL_MAX_AGE,
            InvalidHeaderValue, ORIGIN, VARY,
        },
    },
    middleware::Next,
    response::{IntoResponse, Response},
};

/// Preflight cache duration (6 hours).
pub const MAX_AGE_SECS: u64 = 21600;

/// Configured origin policy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AllowedOrigin {
    /// `*`: echo the request origin, or `*` when there is none.
    Any,
    Exact(HeaderValue),
    /// Echo the request origin when listed, otherwise send the first entry.
    List(Vec<HeaderValue>),
}

impl AllowedOrigin {
    /// Parse a configured value: `*`, one origin, or a comma-separated list.
    ///
    /// A blank value means CORS is disabled (`Ok(None)`).
    pub fn parse(configured: &str) -> Result<Option<Self>, InvalidHeaderValue> {
        let entries: Vec<&str> = configured
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .collect();

        if entries.contains(&"*") {
            return Ok(Some(Self::Any));
        }

        let mut values = entries
            .into_iter()
            .map(HeaderValue::from_str)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(match values.len() {
            0 => None,
            1 => values.pop().map(Self::Exact),
            _ => Some(Self::List(values)),
        })
    }

    /// Whether the Allow-Origin value depends on the request's `Origin`, in
    /// which case responses must carry `Vary: Origin`.
    pub fn varies_by_origin(&self) -> bool {
        !matches!(self, Self::Exact(_))
    }

    /// Value for `Access-Control-Allow-Origin` given the request's `Origin`.
    pub fn resolve(&self, request_origin: Option<&HeaderValue>) -> HeaderValue {
        match self {
            Self::Any => request_origin
                .cloned()
                .unwrap_or_else(|| HeaderValue::from_static("*")),
            Self::Exact(origin) => origin.clone(),
            Self::List(origins) => match request_origin {
                Some(o) if origins.contains(o) => o.clone(),
                _ => origins
                    .first()
                    .cloned()
                    .unwrap_or_else(|| HeaderValue::from_static("null")),
            },
        }
    }
}

/// Render a method set as a header value: uppercase, sorted, de-duplicated.
pub fn methods_header(methods: &[Method]) -> Result<HeaderValue, InvalidHeaderValue> {
    let mut names: Vec<&str> = methods.iter().map(Method::as_str).collect();
    names.sort_unstable();
    names.dedup();
    HeaderValue::from_str(&names.join(", "))
}

/// Per-endpoint CORS state.
#[derive(Debug, Clone)]
pub struct EndpointCors {
    origin: Option<Arc<AllowedOrigin>>,
    allow_methods: HeaderValue,
}

impl EndpointCors {
    pub fn new(origin: Option<Arc<AllowedOrigin>>, allow_methods: HeaderValue) -> Self {
        Self {
            origin,
            allow_methods,
        }
    }
}

/// Answer preflights and decorate every response with CORS headers.
///
/// OPTIONS short-circuits here, before guards and handlers run.
pub async fn cors_middleware(
    State(cors): State<EndpointCors>,
    req: axum::http::Request<axum::body::Body>,
    next: Next,
) -> Response {
    let Some(origin) = cors.origin.as_deref() else {
        return next.run(req).await;
    };

    let allow_origin = origin.resolve(req.headers().get(ORIGIN));

    let mut response = if req.method() == Method::OPTIONS {
        StatusCode::OK.into_response()
    } else {
        next.run(req).await
    };

    let headers = response.headers_mut();
    headers.insert(ACCESS_CONTROL_ALLOW_ORIGIN, allow_origin);
    headers.insert(ACCESS_CONTROL_ALLOW_METHODS, cors.allow_methods.clone());
    headers.insert(ACCESS_CONTROL_MAX_AGE, HeaderValue::from(MAX_AGE_SECS));
    if origin.varies_by_origin() {
        headers.append(VARY, HeaderValue::from_static("Origin"));
    }
    response
}
