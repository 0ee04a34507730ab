use std::sync::Arc;

use axum::{extract::State, middleware::Next, response::Response};

use crate::context::TrustedHeaders;

/// Attach the request [`notify_auth::Principal`] as an extension.
///
/// Never rejects: an absent identity is an anonymous principal, and the
/// endpoint guards decide what that means.
pub async fn principal_middleware(
    State(trusted): State<Arc<TrustedHeaders>>,
    mut req: axum::http::Request<axum::body::Body>,
    next: Next,
) -> Response {
    let principal = trusted.principal(req.headers());
    req.extensions_mut().insert(principal);

    next.run(req).await
}
