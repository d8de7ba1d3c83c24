use std::collections::VecDeque;

use async_trait::async_trait;
use parking_lot::Mutex;
use serde_json::Value;

use crate::driver::{DatabaseDriver, DbError, Row};

/// Scripted in-process driver for tests and demos.
///
/// Queue result sets with [`MemoryDriver::push_result`]; every `statement`
/// call pops the next one (or yields no rows) and records the query with
/// its bindings for later inspection.
#[derive(Default)]
pub struct MemoryDriver {
    connected: Mutex<bool>,
    results: Mutex<VecDeque<Vec<Row>>>,
    executed: Mutex<Vec<(String, Vec<Value>)>>,
}

impl MemoryDriver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue the result set returned by the next `statement` call.
    pub fn push_result(&self, rows: Vec<Row>) {
        self.results.lock().push_back(rows);
    }

    /// Every statement executed so far, with its bindings.
    pub fn executed(&self) -> Vec<(String, Vec<Value>)> {
        self.executed.lock().clone()
    }
}

#[async_trait]
impl DatabaseDriver for MemoryDriver {
    async fn connect(
        &mut self,
        _protocol: &str,
        _host: &str,
        _port: u16,
        _database: &str,
        _username: &str,
        _password: &str,
    ) -> Result<(), DbError> {
        *self.connected.lock() = true;
        Ok(())
    }

    async fn statement(
        &self,
        query: &str,
        bindings: &[Value],
    ) -> Result<Vec<Row>, DbError> {
        if !*self.connected.lock() {
            return Err(DbError::NoConnection);
        }
        self.executed
            .lock()
            .push((query.to_string(), bindings.to_vec()));
        Ok(self.results.lock().pop_front().unwrap_or_default())
    }

    async fn close(&mut self) {
        *self.connected.lock() = false;
    }
}
