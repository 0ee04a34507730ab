use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;
use serde_json::Value;

use super::{Document, DocumentStore, StoreError, StoreResult};

/// In-memory document store for tests/dev.
///
/// A single instance serves every collection. Documents are kept as JSON so
/// behaviour (including `find_by`) matches the Postgres backend.
#[derive(Debug, Default)]
pub struct InMemoryDocumentStore {
    inner: RwLock<Collections>,
}

#[derive(Debug, Default)]
struct Collections {
    next_seq: u64,
    docs: HashMap<(&'static str, String), Stored>,
}

#[derive(Debug, Clone)]
struct Stored {
    seq: u64,
    body: Value,
}

impl InMemoryDocumentStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn collect<D, F>(&self, mut keep: F) -> StoreResult<Vec<D>>
    where
        D: Document,
        F: FnMut(&Value) -> bool,
    {
        let map = self.inner.read().map_err(|_| StoreError::Poisoned)?;

        let mut hits: Vec<&Stored> = map
            .docs
            .iter()
            .filter(|((c, _), s)| *c == D::COLLECTION && keep(&s.body))
            .map(|(_, s)| s)
            .collect();
        hits.sort_by_key(|s| s.seq);

        hits.into_iter()
            .map(|s| serde_json::from_value(s.body.clone()).map_err(StoreError::from))
            .collect()
    }
}

#[async_trait]
impl<D: Document> DocumentStore<D> for InMemoryDocumentStore {
    async fn save(&self, doc: &D) -> StoreResult<()> {
        let body = serde_json::to_value(doc)?;
        let mut map = self.inner.write().map_err(|_| StoreError::Poisoned)?;

        let key = (D::COLLECTION, doc.key());
        // Replacing keeps the original position in insertion order.
        let seq = match map.docs.get(&key) {
            Some(existing) => existing.seq,
            None => {
                map.next_seq += 1;
                map.next_seq
            }
        };
        map.docs.insert(key, Stored { seq, body });
        Ok(())
    }

    async fn get(&self, key: &str) -> StoreResult<Option<D>> {
        let map = self.inner.read().map_err(|_| StoreError::Poisoned)?;
        match map.docs.get(&(D::COLLECTION, key.to_string())) {
            Some(s) => Ok(Some(serde_json::from_value(s.body.clone())?)),
            None => Ok(None),
        }
    }

    async fn list(&self) -> StoreResult<Vec<D>> {
        self.collect(|_| true)
    }

    async fn find_by(&self, field: &str, value: &str) -> StoreResult<Vec<D>> {
        self.collect(|body| body.get(field).and_then(Value::as_str) == Some(value))
    }

    async fn delete(&self, key: &str) -> StoreResult<bool> {
        let mut map = self.inner.write().map_err(|_| StoreError::Poisoned)?;
        Ok(map.docs.remove(&(D::COLLECTION, key.to_string())).is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use notify_core::{Entity, Notification, NotificationDraft, User, UserId};

    fn notification(message: &str, user: &str) -> Notification {
        let draft = NotificationDraft {
            message: Some(message.to_string()),
            user: Some(user.to_string()),
        };
        Notification::create(&draft, Utc::now()).unwrap()
    }

    #[tokio::test]
    async fn save_then_get_round_trips() {
        let store = InMemoryDocumentStore::new();
        let n = notification("hello", "u1");
        store.save(&n).await.unwrap();

        let got: Option<Notification> = store.get(&n.key()).await.unwrap();
        assert_eq!(got, Some(n));
    }

    #[tokio::test]
    async fn collections_are_isolated() {
        let store = InMemoryDocumentStore::new();
        let user = User::new(UserId::parse("u1").unwrap(), "u1@example.com");
        DocumentStore::<User>::save(&store, &user).await.unwrap();

        let notes: Vec<Notification> = store.list().await.unwrap();
        assert!(notes.is_empty());

        let missing: Option<Notification> = store.get(user.id().as_str()).await.unwrap();
        assert!(missing.is_none());
    }

    #[tokio::test]
    async fn find_by_matches_field_in_insertion_order() {
        let store = InMemoryDocumentStore::new();
        let a = notification("first", "u1");
        let b = notification("other", "u2");
        let c = notification("second", "u1");
        for n in [&a, &b, &c] {
            store.save(n).await.unwrap();
        }

        let mine: Vec<Notification> = store.find_by("user", "u1").await.unwrap();
        let messages: Vec<&str> = mine.iter().map(Notification::message).collect();
        assert_eq!(messages, vec!["first", "second"]);

        let nobody: Vec<Notification> = store.find_by("user", "u3").await.unwrap();
        assert!(nobody.is_empty());
    }

    #[tokio::test]
    async fn delete_reports_whether_anything_was_removed() {
        let store = InMemoryDocumentStore::new();
        let n = notification("bye", "u1");
        store.save(&n).await.unwrap();

        assert!(DocumentStore::<Notification>::delete(&store, &n.key()).await.unwrap());
        assert!(!DocumentStore::<Notification>::delete(&store, &n.key()).await.unwrap());
    }
}
