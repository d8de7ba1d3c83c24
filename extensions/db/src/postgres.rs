use async_trait::async_trait;
use serde_json::Value;
use sqlx::postgres::{PgPool, PgPoolOptions, PgRow};
use sqlx::{Column, Row as _};

use crate::driver::{DatabaseDriver, DbError, Row};

/// PostgreSQL driver backed by a sqlx connection pool.
#[derive(Default)]
pub struct PgDriver {
    pool: Option<PgPool>,
}

impl PgDriver {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl DatabaseDriver for PgDriver {
    async fn connect(
        &mut self,
        protocol: &str,
        host: &str,
        port: u16,
        database: &str,
        username: &str,
        password: &str,
    ) -> Result<(), DbError> {
        if protocol != "postgres" {
            return Err(DbError::UnsupportedProtocol(protocol.to_string()));
        }

        let url = format!("postgres://{username}:{password}@{host}:{port}/{database}");
        let pool = PgPoolOptions::new()
            .connect(&url)
            .await
            .map_err(|err| DbError::ConnectionFailed(err.to_string()))?;
        self.pool = Some(pool);
        Ok(())
    }

    async fn statement(
        &self,
        query: &str,
        bindings: &[Value],
    ) -> Result<Vec<Row>, DbError> {
        let pool = self.pool.as_ref().ok_or(DbError::NoConnection)?;

        let mut prepared = sqlx::query(query);
        for value in bindings {
            prepared = match value {
                Value::Null => prepared.bind(Option::<String>::None),
                Value::Bool(flag) => prepared.bind(*flag),
                Value::Number(number) if number.is_i64() => {
                    prepared.bind(number.as_i64().unwrap_or_default())
                }
                Value::Number(number) => prepared.bind(number.as_f64().unwrap_or_default()),
                Value::String(text) => prepared.bind(text.clone()),
                other => prepared.bind(other.to_string()),
            };
        }

        let rows = prepared
            .fetch_all(pool)
            .await
            .map_err(|err| DbError::QueryFailed(err.to_string()))?;
        Ok(rows.iter().map(decode_row).collect())
    }

    async fn close(&mut self) {
        if let Some(pool) = self.pool.take() {
            pool.close().await;
        }
    }
}

/// Decode every column leniently: integer, float, boolean, then text, with
/// null as the fallback for anything undecodable.
fn decode_row(row: &PgRow) -> Row {
    row.columns()
        .iter()
        .enumerate()
        .map(|(index, column)| {
            let value = row
                .try_get::<i64, _>(index)
                .map(Value::from)
                .or_else(|_| row.try_get::<f64, _>(index).map(Value::from))
                .or_else(|_| row.try_get::<bool, _>(index).map(Value::from))
                .or_else(|_| row.try_get::<String, _>(index).map(Value::from))
                .unwrap_or(Value::Null);
            (column.name().to_string(), value)
        })
        .collect()
}
