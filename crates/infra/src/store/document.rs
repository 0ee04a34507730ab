use async_trait::async_trait;
use serde::Serialize;
use serde::de::DeserializeOwned;

use notify_core::{Entity, Notification, User};

use super::StoreResult;

/// A value persisted as a JSON document in a named collection.
pub trait Document: Serialize + DeserializeOwned + Send + Sync + 'static {
    const COLLECTION: &'static str;

    /// Primary key within the collection.
    fn key(&self) -> String;
}

impl Document for Notification {
    const COLLECTION: &'static str = "notifications";

    fn key(&self) -> String {
        self.id().to_string()
    }
}

impl Document for User {
    const COLLECTION: &'static str = "users";

    fn key(&self) -> String {
        self.id().to_string()
    }
}

/// Collection-scoped document storage.
///
/// Every method is a single-document (or single-statement) operation; no
/// transactions span calls.
#[async_trait]
pub trait DocumentStore<D: Document>: Send + Sync {
    /// Insert or replace the document under its key.
    async fn save(&self, doc: &D) -> StoreResult<()>;

    async fn get(&self, key: &str) -> StoreResult<Option<D>>;

    /// All documents in insertion order.
    async fn list(&self) -> StoreResult<Vec<D>>;

    /// Documents whose top-level string `field` equals `value`, in insertion order.
    async fn find_by(&self, field: &str, value: &str) -> StoreResult<Vec<D>>;

    /// Remove a document. Returns `false` when nothing was stored under `key`.
    async fn delete(&self, key: &str) -> StoreResult<bool>;
}
