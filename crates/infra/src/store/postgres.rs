//! Postgres-backed document store.
//!
//! Documents live in a single `documents` table as JSONB, keyed by
//! `(collection, key)`. `seq` preserves insertion order for listings.

use async_trait::async_trait;
use serde_json::Value;
use sqlx::postgres::PgPoolOptions;
use sqlx::{PgPool, Row};

use super::{Document, DocumentStore, StoreResult};

const SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS documents (
    seq        BIGSERIAL,
    collection TEXT  NOT NULL,
    key        TEXT  NOT NULL,
    body       JSONB NOT NULL,
    PRIMARY KEY (collection, key)
)
"#;

pub struct PostgresDocumentStore {
    pool: PgPool,
}

impl PostgresDocumentStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn connect(database_url: &str) -> StoreResult<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(8)
            .connect(database_url)
            .await?;
        Ok(Self::new(pool))
    }

    /// Create the documents table if it does not exist yet.
    pub async fn ensure_schema(&self) -> StoreResult<()> {
        sqlx::query(SCHEMA).execute(&self.pool).await?;
        Ok(())
    }

    fn decode<D: Document>(rows: Vec<sqlx::postgres::PgRow>) -> StoreResult<Vec<D>> {
        rows.into_iter()
            .map(|row| -> StoreResult<D> {
                let body: Value = row.try_get("body")?;
                Ok(serde_json::from_value(body)?)
            })
            .collect()
    }
}

#[async_trait]
impl<D: Document> DocumentStore<D> for PostgresDocumentStore {
    async fn save(&self, doc: &D) -> StoreResult<()> {
        let body = serde_json::to_value(doc)?;
        sqlx::query(
            r#"
            INSERT INTO documents (collection, key, body)
            VALUES ($1, $2, $3)
            ON CONFLICT (collection, key) DO UPDATE SET body = EXCLUDED.body
            "#,
        )
        .bind(D::COLLECTION)
        .bind(doc.key())
        .bind(body)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn get(&self, key: &str) -> StoreResult<Option<D>> {
        let row = sqlx::query("SELECT body FROM documents WHERE collection = $1 AND key = $2")
            .bind(D::COLLECTION)
            .bind(key)
            .fetch_optional(&self.pool)
            .await?;

        match row {
            Some(row) => {
                let body: Value = row.try_get("body")?;
                Ok(Some(serde_json::from_value(body)?))
            }
            None => Ok(None),
        }
    }

    async fn list(&self) -> StoreResult<Vec<D>> {
        let rows = sqlx::query("SELECT body FROM documents WHERE collection = $1 ORDER BY seq")
            .bind(D::COLLECTION)
            .fetch_all(&self.pool)
            .await?;
        Self::decode(rows)
    }

    async fn find_by(&self, field: &str, value: &str) -> StoreResult<Vec<D>> {
        let rows = sqlx::query(
            r#"
            SELECT body FROM documents
            WHERE collection = $1 AND body ->> $2 = $3
            ORDER BY seq
            "#,
        )
        .bind(D::COLLECTION)
        .bind(field)
        .bind(value)
        .fetch_all(&self.pool)
        .await?;
        Self::decode(rows)
    }

    async fn delete(&self, key: &str) -> StoreResult<bool> {
        let result = sqlx::query("DELETE FROM documents WHERE collection = $1 AND key = $2")
            .bind(D::COLLECTION)
            .bind(key)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
