//! Child collectors.
//!
//! A [`MetaCollector`] supplies the children of an entity on demand. The tree
//! treats it as untrusted: a failing fetch is logged and remembered, never
//! propagated.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, PoisonError};

use super::kind::MetadataKind;
use super::object::MetaObject;
use crate::error::{MetadataError, Result};

/// Source of child entities for a live metadata tree.
pub trait MetaCollector: Send + Sync {
    /// Fetch the children of kind `kind` under the entity at `parent_path`.
    fn fetch(&self, kind: MetadataKind, parent_path: &str) -> Result<Vec<MetaObject>>;
}

/// In-memory collector for tests and embedded fixtures.
///
/// Children are registered per `(kind, parent path)`. Failure injection and a
/// fetch counter make the lazy-fetch behavior of the tree observable.
#[derive(Default)]
pub struct InMemoryCollector {
    entries: Mutex<HashMap<(MetadataKind, String), Vec<MetaObject>>>,
    failing: Mutex<Vec<(MetadataKind, String)>>,
    fetches: AtomicUsize,
}

impl InMemoryCollector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register children returned for `kind` under `parent_path`.
    pub fn insert(&self, parent_path: &str, children: Vec<MetaObject>) {
        let mut entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        for child in children {
            entries
                .entry((child.kind(), parent_path.to_string()))
                .or_default()
                .push(child);
        }
    }

    /// Make fetches of `kind` under `parent_path` fail.
    pub fn fail_on(&self, kind: MetadataKind, parent_path: &str) {
        self.failing
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push((kind, parent_path.to_string()));
    }

    /// Number of `fetch` calls served so far, failed ones included.
    pub fn fetch_count(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }
}

impl MetaCollector for InMemoryCollector {
    fn fetch(&self, kind: MetadataKind, parent_path: &str) -> Result<Vec<MetaObject>> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        let key = (kind, parent_path.to_string());
        if self
            .failing
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .contains(&key)
        {
            return Err(MetadataError::Fetch {
                kind,
                path: parent_path.to_string(),
                reason: "simulated collector failure".to_string(),
            });
        }
        let entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        Ok(entries.get(&key).cloned().unwrap_or_default())
    }
}
