//! Route registration table.
//!
//! Every resource endpoint is declared once here: its path, and for each
//! method the ordered guard list and the handler. The CORS method list and
//! the OPTIONS answer are derived from the same declaration.

use std::sync::Arc;

use axum::{
    Router,
    handler::Handler,
    http::{Method, StatusCode, header::ALLOW, header::InvalidHeaderValue},
    routing::{MethodFilter, MethodRouter},
};

use notify_auth::Guard;

use crate::cors::{self, AllowedOrigin, EndpointCors};

pub mod notifications;
pub mod system;
pub mod users;

const USER: &[Guard] = &[Guard::UserRequired];
const ADMIN: &[Guard] = &[Guard::AdminRequired];

/// The resource surface of the service.
pub fn endpoints() -> Vec<Endpoint> {
    vec![
        Endpoint::new("/notifications")
            .get(USER, notifications::list)
            .post(ADMIN, notifications::create),
        Endpoint::new("/notifications/:id")
            .get(USER, notifications::get_one)
            .delete(USER, notifications::delete),
        Endpoint::new("/users").get(ADMIN, users::list),
        Endpoint::new("/users/:id").get(ADMIN, users::get_one),
    ]
}

/// Mount every endpoint, each wrapped in its own CORS middleware.
pub fn router(origin: Option<Arc<AllowedOrigin>>) -> Result<Router, InvalidHeaderValue> {
    endpoints()
        .into_iter()
        .try_fold(Router::new(), |router, endpoint| {
            let path = endpoint.path();
            Ok(router.route(path, endpoint.into_method_router(origin.clone())?))
        })
}

/// One path with its per-method guards and handlers.
pub struct Endpoint {
    path: &'static str,
    methods: Vec<Method>,
    guards: Vec<(Method, &'static [Guard])>,
    routes: MethodRouter,
}

impl Endpoint {
    pub fn new(path: &'static str) -> Self {
        Self {
            path,
            methods: vec![Method::OPTIONS],
            guards: Vec::new(),
            routes: MethodRouter::new(),
        }
    }

    /// Register a GET handler (HEAD is served by it too).
    pub fn get<H, T>(self, guards: &'static [Guard], handler: H) -> Self
    where
        H: Handler<T, ()>,
        T: 'static,
    {
        self.on(MethodFilter::GET, &[Method::GET, Method::HEAD], guards, handler)
    }

    pub fn post<H, T>(self, guards: &'static [Guard], handler: H) -> Self
    where
        H: Handler<T, ()>,
        T: 'static,
    {
        self.on(MethodFilter::POST, &[Method::POST], guards, handler)
    }

    pub fn delete<H, T>(self, guards: &'static [Guard], handler: H) -> Self
    where
        H: Handler<T, ()>,
        T: 'static,
    {
        self.on(MethodFilter::DELETE, &[Method::DELETE], guards, handler)
    }

    fn on<H, T>(
        mut self,
        filter: MethodFilter,
        methods: &[Method],
        guards: &'static [Guard],
        handler: H,
    ) -> Self
    where
        H: Handler<T, ()>,
        T: 'static,
    {
        let guarded = handler.layer(axum::middleware::from_fn_with_state(
            guards,
            crate::authz::guard_middleware,
        ));
        self.routes = self.routes.on(filter, guarded);
        for method in methods {
            self.guards.push((method.clone(), guards));
            self.methods.push(method.clone());
        }
        self
    }

    pub fn path(&self) -> &'static str {
        self.path
    }

    /// Supported methods, OPTIONS included.
    pub fn methods(&self) -> &[Method] {
        &self.methods
    }

    /// Guards declared for `method`, if the endpoint supports it.
    pub fn guards_for(&self, method: &Method) -> Option<&'static [Guard]> {
        self.guards
            .iter()
            .find(|(m, _)| m == method)
            .map(|(_, guards)| *guards)
    }

    /// Finish the endpoint: add the OPTIONS answer and the CORS layer.
    pub fn into_method_router(
        self,
        origin: Option<Arc<AllowedOrigin>>,
    ) -> Result<MethodRouter, InvalidHeaderValue> {
        let allow = cors::methods_header(&self.methods)?;

        // Reached only when CORS is off; otherwise the CORS layer answers first.
        let options = {
            let allow = allow.clone();
            move || async move { (StatusCode::OK, [(ALLOW, allow)]) }
        };

        let layer = axum::middleware::from_fn_with_state(
            EndpointCors::new(origin, allow),
            cors::cors_middleware,
        );
        Ok(self.routes.options(options).layer(layer))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn endpoint(path: &str) -> Endpoint {
        endpoints()
            .into_iter()
            .find(|e| e.path() == path)
            .unwrap()
    }

    fn methods(e: &Endpoint) -> String {
        cors::methods_header(e.methods())
            .unwrap()
            .to_str()
            .unwrap()
            .to_string()
    }

    #[test]
    fn method_sets_are_derived_per_endpoint() {
        assert_eq!(methods(&endpoint("/notifications")), "GET, HEAD, OPTIONS, POST");
        assert_eq!(methods(&endpoint("/notifications/:id")), "DELETE, GET, HEAD, OPTIONS");
        assert_eq!(methods(&endpoint("/users")), "GET, HEAD, OPTIONS");
        assert_eq!(methods(&endpoint("/users/:id")), "GET, HEAD, OPTIONS");
    }

    #[test]
    fn guard_lists_match_the_access_table() {
        let notifications = endpoint("/notifications");
        assert_eq!(notifications.guards_for(&Method::GET), Some(USER));
        assert_eq!(notifications.guards_for(&Method::POST), Some(ADMIN));
        assert_eq!(notifications.guards_for(&Method::DELETE), None);

        let one = endpoint("/notifications/:id");
        assert_eq!(one.guards_for(&Method::DELETE), Some(USER));
        assert_eq!(one.guards_for(&Method::HEAD), Some(USER));

        for path in ["/users", "/users/:id"] {
            assert_eq!(endpoint(path).guards_for(&Method::GET), Some(ADMIN));
        }
    }

    #[test]
    fn options_is_never_guarded() {
        for e in endpoints() {
            assert!(e.methods().contains(&Method::OPTIONS));
            assert_eq!(e.guards_for(&Method::OPTIONS), None);
        }
    }
}
