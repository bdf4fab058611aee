//! Order data-source trait and in-memory implementation.
//!
//! The backing store is an external collaborator; callers inject whichever
//! [`OrderSource`] talks to it. Rows are handed back untyped so that
//! validation stays in one place.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;
use tokio::sync::RwLock;

/// Failures reported by an order source.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SourceError {
    /// The store could not be reached.
    #[error("Connection error: {0}")]
    Connection(String),

    /// The store rejected or failed the query.
    #[error("Query error: {0}")]
    Query(String),
}

/// Read access to stored order rows.
#[async_trait]
pub trait OrderSource: Send + Sync {
    /// Returns every stored order row.
    async fn fetch_orders(&self) -> Result<Vec<Value>, SourceError>;

    /// Returns the row whose `id` equals `id`, if any.
    async fn fetch_order(&self, id: &str) -> Result<Option<Value>, SourceError>;
}

#[derive(Debug, Default)]
struct InMemorySourceState {
    rows: Vec<Value>,
    failure: Option<SourceError>,
}

/// In-memory order source for tests and local runs.
#[derive(Debug, Clone, Default)]
pub struct InMemoryOrderSource {
    state: Arc<RwLock<InMemorySourceState>>,
}

impl InMemoryOrderSource {
    /// Creates an empty source.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a source pre-loaded with `rows`.
    pub fn with_rows(rows: Vec<Value>) -> Self {
        Self {
            state: Arc::new(RwLock::new(InMemorySourceState {
                rows,
                failure: None,
            })),
        }
    }

    /// Stores another row.
    pub async fn insert(&self, row: Value) {
        self.state.write().await.rows.push(row);
    }

    /// Returns the number of stored rows.
    pub async fn len(&self) -> usize {
        self.state.read().await.rows.len()
    }

    /// Returns true if no rows are stored.
    pub async fn is_empty(&self) -> bool {
        self.state.read().await.rows.is_empty()
    }

    /// Makes every subsequent fetch fail with `failure`, or clears it with `None`.
    pub async fn set_failure(&self, failure: Option<SourceError>) {
        self.state.write().await.failure = failure;
    }
}

#[async_trait]
impl OrderSource for InMemoryOrderSource {
    async fn fetch_orders(&self) -> Result<Vec<Value>, SourceError> {
        let state = self.state.read().await;
        if let Some(failure) = &state.failure {
            return Err(failure.clone());
        }
        Ok(state.rows.clone())
    }

    async fn fetch_order(&self, id: &str) -> Result<Option<Value>, SourceError> {
        let state = self.state.read().await;
        if let Some(failure) = &state.failure {
            return Err(failure.clone());
        }
        Ok(state
            .rows
            .iter()
            .find(|row| row.get("id").and_then(Value::as_str) == Some(id))
            .cloned())
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[tokio::test]
    async fn test_insert_and_fetch() {
        let source = InMemoryOrderSource::new();
        assert!(source.is_empty().await);

        source.insert(json!({ "id": "order-1" })).await;
        source.insert(json!({ "id": "order-2" })).await;

        assert_eq!(source.len().await, 2);
        assert_eq!(source.fetch_orders().await.unwrap().len(), 2);

        let row = source.fetch_order("order-2").await.unwrap().unwrap();
        assert_eq!(row["id"], "order-2");
        assert!(source.fetch_order("order-3").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_injected_failure() {
        let source = InMemoryOrderSource::with_rows(vec![json!({ "id": "order-1" })]);
        source
            .set_failure(Some(SourceError::Connection("refused".to_string())))
            .await;

        assert_eq!(
            source.fetch_orders().await,
            Err(SourceError::Connection("refused".to_string()))
        );
        assert!(source.fetch_order("order-1").await.is_err());

        source.set_failure(None).await;
        assert_eq!(source.fetch_orders().await.unwrap().len(), 1);
    }
}
