use std::collections::HashMap;

use async_trait::async_trait;

/// One result row: column name → loosely typed value.
pub type Row = HashMap<String, serde_json::Value>;

/// Database operation errors.
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error("unsupported protocol `{0}`")]
    UnsupportedProtocol(String),

    #[error("connection failed: {0}")]
    ConnectionFailed(String),

    #[error("query failed: {0}")]
    QueryFailed(String),

    #[error("connection not available")]
    NoConnection,
}

/// Contract for a SQL driver.
///
/// `connect` runs once at bootstrap; `statement` is what handlers call per
/// query, with positional bindings; `close` tears the connection down.
#[async_trait]
pub trait DatabaseDriver: Send + Sync {
    async fn connect(
        &mut self,
        protocol: &str,
        host: &str,
        port: u16,
        database: &str,
        username: &str,
        password: &str,
    ) -> Result<(), DbError>;

    async fn statement(
        &self,
        query: &str,
        bindings: &[serde_json::Value],
    ) -> Result<Vec<Row>, DbError>;

    async fn close(&mut self);
}
