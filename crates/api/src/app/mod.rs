//! HTTP API application wiring (Axum router + store wiring).
//!
//! - `routes/`: the registration table and one file per resource
//! - `dto.rs`: request decoding and JSON marshaling
//! - `errors.rs`: consistent error responses

use std::sync::Arc;

use axum::{Extension, Router, routing::get};
use tower::ServiceBuilder;

use notify_infra::{Settings, Stores};

use crate::context::TrustedHeaders;
use crate::cors::AllowedOrigin;
use crate::middleware;

pub mod dto;
pub mod errors;
pub mod routes;

/// Build the full HTTP router (public entrypoint used by `main.rs` and tests).
pub fn build_app(settings: &Settings, stores: Stores) -> anyhow::Result<Router> {
    let trusted = Arc::new(TrustedHeaders::from_settings(settings)?);

    let origin = match settings.cors_domain.as_deref() {
        Some(configured) => AllowedOrigin::parse(configured)?.map(Arc::new),
        None => None,
    };

    let resources = routes::router(origin)?;

    Ok(Router::new()
        .route("/health", get(routes::system::health))
        .merge(resources)
        .layer(
            ServiceBuilder::new()
                .layer(axum::middleware::from_fn_with_state(
                    trusted,
                    middleware::principal_middleware,
                ))
                .layer(Extension(stores)),
        ))
}
