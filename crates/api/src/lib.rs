//! HTTP API: router, request/response mapping, CORS and guard enforcement.

pub mod app;
pub mod authz;
pub mod context;
pub mod cors;
pub mod middleware;
