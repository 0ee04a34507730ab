//! Document persistence: one abstraction, an in-memory and a Postgres backend.

pub mod document;
pub mod memory;
pub mod postgres;

use std::sync::Arc;

use thiserror::Error;

use notify_core::{Notification, User};

pub use document::{Document, DocumentStore};
pub use memory::InMemoryDocumentStore;
pub use postgres::PostgresDocumentStore;

use crate::Settings;

pub type StoreResult<T> = Result<T, StoreError>;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("document (de)serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("store lock poisoned")]
    Poisoned,
}

/// Typed store handles used by the API layer.
#[derive(Clone)]
pub struct Stores {
    pub notifications: Arc<dyn DocumentStore<Notification>>,
    pub users: Arc<dyn DocumentStore<User>>,
}

impl Stores {
    /// Both collections backed by one in-memory store (dev/test).
    pub fn in_memory() -> Self {
        Self::shared(Arc::new(InMemoryDocumentStore::new()))
    }

    /// Connect to Postgres and make sure the documents table exists.
    pub async fn postgres(database_url: &str) -> StoreResult<Self> {
        let store = PostgresDocumentStore::connect(database_url).await?;
        store.ensure_schema().await?;
        Ok(Self::shared(Arc::new(store)))
    }

    /// Pick the backend from settings: Postgres when `DATABASE_URL` is set.
    pub async fn from_settings(settings: &Settings) -> StoreResult<Self> {
        match settings.database_url.as_deref() {
            Some(url) => {
                tracing::info!("using postgres document store");
                Self::postgres(url).await
            }
            None => {
                tracing::info!("DATABASE_URL not set; using in-memory document store");
                Ok(Self::in_memory())
            }
        }
    }

    fn shared<S>(store: Arc<S>) -> Self
    where
        S: DocumentStore<Notification> + DocumentStore<User> + 'static,
    {
        Self {
            notifications: store.clone(),
            users: store,
        }
    }
}
