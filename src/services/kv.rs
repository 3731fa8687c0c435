//! KV blob store seam.
//!
//! Synchronous get/put of whole JSON documents by string key. The in-memory
//! stores stay authoritative for the session: reads that fail to parse fall
//! back to the caller's default and writes that fail are dropped, both with
//! a log line and nothing else.

use std::cell::RefCell;
use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;
use std::rc::Rc;

use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use serde::Serialize;

/// Opaque blob storage. Implementations own durability; callers own schema.
pub trait KvStore {
    fn get_raw(&self, key: &str) -> Option<String>;
    fn put_raw(&self, key: &str, value: String) -> Result<()>;
}

/// Process-local store, used by tests and as a fallback when no data
/// directory is available.
#[derive(Debug, Default)]
pub struct MemoryKv {
    entries: RefCell<HashMap<String, String>>,
}

impl MemoryKv {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }
}

impl KvStore for MemoryKv {
    fn get_raw(&self, key: &str) -> Option<String> {
        self.entries.borrow().get(key).cloned()
    }

    fn put_raw(&self, key: &str, value: String) -> Result<()> {
        self.entries.borrow_mut().insert(key.to_string(), value);
        Ok(())
    }
}

/// One JSON file per key under a data directory.
#[derive(Debug)]
pub struct FileKv {
    dir: PathBuf,
}

impl FileKv {
    pub fn new(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir)
            .with_context(|| format!("creating kv directory {}", dir.display()))?;
        Ok(Self { dir })
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl KvStore for FileKv {
    fn get_raw(&self, key: &str) -> Option<String> {
        fs::read_to_string(self.path_for(key)).ok()
    }

    fn put_raw(&self, key: &str, value: String) -> Result<()> {
        let path = self.path_for(key);
        fs::write(&path, value).with_context(|| format!("writing {}", path.display()))
    }
}

/// Prefix-namespaced, typed access to a [`KvStore`].
///
/// The prefix is a build-time constant doubling as a schema-version tag;
/// bumping it makes every prior key invisible, retiring the old cache
/// wholesale on the next boot.
pub struct Namespace {
    kv: Rc<dyn KvStore>,
    prefix: String,
}

impl Namespace {
    pub fn new(kv: Rc<dyn KvStore>, prefix: impl Into<String>) -> Self {
        Self {
            kv,
            prefix: prefix.into(),
        }
    }

    fn key(&self, collection: &str) -> String {
        format!("{}{}", self.prefix, collection)
    }

    /// Typed read; `None` when the key is absent or fails to parse.
    pub fn get<T: DeserializeOwned>(&self, collection: &str) -> Option<T> {
        let raw = self.kv.get_raw(&self.key(collection))?;
        match serde_json::from_str(&raw) {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::warn!(collection, error = %e, "discarding unparsable kv value");
                None
            }
        }
    }

    /// Typed read with a caller-supplied default for the absent/corrupt cases.
    pub fn get_or<T: DeserializeOwned>(&self, collection: &str, default: T) -> T {
        self.get(collection).unwrap_or(default)
    }

    /// Best-effort write-through. Failures are logged and dropped.
    pub fn put<T: Serialize>(&self, collection: &str, value: &T) {
        let raw = match serde_json::to_string(value) {
            Ok(raw) => raw,
            Err(e) => {
                tracing::warn!(collection, error = %e, "failed to serialize kv value");
                return;
            }
        };
        if let Err(e) = self.kv.put_raw(&self.key(collection), raw) {
            tracing::warn!(collection, error = %e, "dropping failed kv write");
        }
    }
}
