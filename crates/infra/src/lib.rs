//! Infrastructure layer: document persistence and configuration.

pub mod config;
pub mod store;

pub use config::{ConfigError, Settings};
pub use store::{
    Document, DocumentStore, InMemoryDocumentStore, PostgresDocumentStore, StoreError,
    StoreResult, Stores,
};
