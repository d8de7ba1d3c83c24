//! Session storage for junction applications.
//!
//! The router core never touches sessions; handlers and middlewares pull a
//! [`Session`] over whatever [`SessionStorage`] backend the application
//! wired up at bootstrap. [`MemoryStorage`] is the in-process backend:
//! clones share one underlying map, so the store outlives any single
//! request's `Session` value.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;
use serde_json::Value;

/// Storage key holding the flash bookkeeping lists.
const FLASH_KEY: &str = "_flash";

/// Contract for a session storage backend.
pub trait SessionStorage: Send + Sync {
    /// Initialize the backing store for use. Idempotent.
    fn start(&mut self);

    /// Unique identifier of the running session.
    fn id(&self) -> String;

    fn get(&self, key: &str) -> Option<Value>;

    fn set(&mut self, key: &str, value: Value);

    fn has(&self, key: &str) -> bool;

    fn remove(&mut self, key: &str);

    /// Clear all stored data and end the session.
    fn destroy(&mut self);
}

#[derive(Default)]
struct MemoryInner {
    id: String,
    values: HashMap<String, Value>,
}

/// Process-local storage backend.
#[derive(Clone, Default)]
pub struct MemoryStorage {
    inner: Arc<RwLock<MemoryInner>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionStorage for MemoryStorage {
    fn start(&mut self) {
        let mut inner = self.inner.write();
        if inner.id.is_empty() {
            inner.id = uuid::Uuid::new_v4().to_string();
        }
    }

    fn id(&self) -> String {
        self.inner.read().id.clone()
    }

    fn get(&self, key: &str) -> Option<Value> {
        self.inner.read().values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: Value) {
        self.inner.write().values.insert(key.to_string(), value);
    }

    fn has(&self, key: &str) -> bool {
        self.inner.read().values.contains_key(key)
    }

    fn remove(&mut self, key: &str) {
        self.inner.write().values.remove(key);
    }

    fn destroy(&mut self) {
        let mut inner = self.inner.write();
        inner.values.clear();
        inner.id.clear();
    }
}

/// Facade over a storage backend, with one-request flash data.
///
/// A value flashed during one request survives exactly one subsequent
/// session start and is removed on the one after that — the flow behind
/// "set an error message, redirect, render it once".
pub struct Session {
    storage: Box<dyn SessionStorage>,
}

impl Session {
    pub fn new(mut storage: Box<dyn SessionStorage>) -> Self {
        storage.start();
        let mut session = Self { storage };
        session.age_flash_data();
        session
    }

    /// Expire keys flashed two requests ago; promote keys flashed last
    /// request so they expire on the next start.
    fn age_flash_data(&mut self) {
        let (old, new) = self.read_flash();
        for key in &old {
            self.storage.remove(key);
        }
        self.write_flash(new, Vec::new());
    }

    fn read_flash(&self) -> (Vec<String>, Vec<String>) {
        let flash = self.storage.get(FLASH_KEY).unwrap_or(Value::Null);
        let list = |name: &str| {
            flash
                .get(name)
                .and_then(Value::as_array)
                .map(|keys| {
                    keys.iter()
                        .filter_map(Value::as_str)
                        .map(str::to_owned)
                        .collect()
                })
                .unwrap_or_default()
        };
        (list("old"), list("new"))
    }

    fn write_flash(&mut self, old: Vec<String>, new: Vec<String>) {
        self.storage
            .set(FLASH_KEY, serde_json::json!({ "old": old, "new": new }));
    }

    /// Store `value` under `key` for the duration of the next request only.
    pub fn flash(&mut self, key: &str, value: Value) {
        self.storage.set(key, value);
        let (old, mut new) = self.read_flash();
        new.push(key.to_string());
        self.write_flash(old, new);
    }

    pub fn id(&self) -> String {
        self.storage.id()
    }

    pub fn get(&self, key: &str) -> Option<Value> {
        self.storage.get(key)
    }

    /// Like [`Session::get`], falling back to `default`.
    pub fn get_or(&self, key: &str, default: Value) -> Value {
        self.storage.get(key).unwrap_or(default)
    }

    pub fn set(&mut self, key: &str, value: Value) {
        self.storage.set(key, value);
    }

    pub fn has(&self, key: &str) -> bool {
        self.storage.has(key)
    }

    pub fn remove(&mut self, key: &str) {
        self.storage.remove(key);
    }

    pub fn destroy(&mut self) {
        self.storage.destroy();
    }
}
