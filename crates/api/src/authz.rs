//! API-side enforcement of endpoint guards.
//!
//! Guards run after the CORS preflight short-circuit and before the handler
//! body, so authorization failures never reach persistence.

use axum::{
    extract::State,
    middleware::Next,
    response::{IntoResponse, Response},
};

use notify_auth::{Guard, Principal};

use crate::app::errors::ApiError;

/// Route-level middleware evaluating one endpoint method's guard list.
pub async fn guard_middleware(
    State(guards): State<&'static [Guard]>,
    req: axum::http::Request<axum::body::Body>,
    next: Next,
) -> Response {
    let anonymous = Principal::anonymous();
    let principal = req.extensions().get::<Principal>().unwrap_or(&anonymous);

    if let Err(e) = notify_auth::authorize(principal, guards) {
        return ApiError::from(e).into_response();
    }

    next.run(req).await
}
