//! In-memory reference store.
//!
//! Storage lives behind a shared backend. Each [`MemoryStore`] handle is one
//! context (a tab, a window, a process) looking at that storage; a write
//! through one context notifies listeners registered through the others,
//! the way a browser delivers storage events to every tab but the writer.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;

use tracing::debug;

use crate::error::{StoreError, StoreResult};
use crate::store::{ChangeListener, DurableStore, SubscriptionId};

struct Registration {
    id: SubscriptionId,
    key: String,
    context: u64,
    listener: Rc<RefCell<ChangeListener>>,
}

impl std::fmt::Debug for Registration {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Registration")
            .field("id", &self.id)
            .field("key", &self.key)
            .field("context", &self.context)
            .finish_non_exhaustive()
    }
}

#[derive(Debug, Default)]
struct Backend {
    values: BTreeMap<String, String>,
    quota: Option<usize>,
    registrations: Vec<Registration>,
    next_context: u64,
    next_subscription: u64,
}

impl Backend {
    fn usage(&self) -> usize {
        self.values.iter().map(|(k, v)| k.len() + v.len()).sum()
    }

    fn listeners_for(&self, key: &str, writer: u64) -> Vec<Rc<RefCell<ChangeListener>>> {
        self.registrations
            .iter()
            .filter(|r| r.key == key && r.context != writer)
            .map(|r| Rc::clone(&r.listener))
            .collect()
    }
}

/// A context handle onto shared in-memory storage.
///
/// Cloning a handle keeps the same context; use [`MemoryStore::context`] to
/// open another one.
#[derive(Debug, Clone)]
pub struct MemoryStore {
    backend: Rc<RefCell<Backend>>,
    context: u64,
}

impl MemoryStore {
    /// Create empty storage with no capacity limit and return its first context.
    pub fn new() -> Self {
        Self::from_backend(Backend::default())
    }

    /// Create empty storage that holds at most `bytes` of keys plus values.
    pub fn with_quota(bytes: usize) -> Self {
        Self::from_backend(Backend {
            quota: Some(bytes),
            ..Backend::default()
        })
    }

    fn from_backend(mut backend: Backend) -> Self {
        let context = backend.next_context;
        backend.next_context += 1;
        Self {
            backend: Rc::new(RefCell::new(backend)),
            context,
        }
    }

    /// Open another context onto the same storage.
    pub fn context(&self) -> Self {
        let mut backend = self.backend.borrow_mut();
        let context = backend.next_context;
        backend.next_context += 1;
        Self {
            backend: Rc::clone(&self.backend),
            context,
        }
    }

    /// Delete the value under `key`, notifying other contexts with `None`.
    pub fn remove(&self, key: &str) {
        let listeners = {
            let mut backend = self.backend.borrow_mut();
            if backend.values.remove(key).is_none() {
                return;
            }
            backend.listeners_for(key, self.context)
        };
        notify(&listeners, None);
    }

    /// Bytes currently used by keys and values.
    pub fn usage(&self) -> usize {
        self.backend.borrow().usage()
    }

    /// Number of stored keys.
    pub fn len(&self) -> usize {
        self.backend.borrow().values.len()
    }

    /// Whether nothing is stored.
    pub fn is_empty(&self) -> bool {
        self.backend.borrow().values.is_empty()
    }

    /// Number of change listeners registered across all contexts.
    pub fn listener_count(&self) -> usize {
        self.backend.borrow().registrations.len()
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl DurableStore for MemoryStore {
    fn read_raw(&self, key: &str) -> StoreResult<Option<String>> {
        Ok(self.backend.borrow().values.get(key).cloned())
    }

    fn write_raw(&self, key: &str, value: &str) -> StoreResult<()> {
        let listeners = {
            let mut backend = self.backend.borrow_mut();
            if let Some(quota) = backend.quota {
                let replaced = backend.values.get(key).map_or(0, |old| key.len() + old.len());
                let needed = backend.usage() - replaced + key.len() + value.len();
                if needed > quota {
                    return Err(StoreError::QuotaExceeded {
                        key: key.to_string(),
                        quota,
                    });
                }
            }
            backend.values.insert(key.to_string(), value.to_string());
            backend.listeners_for(key, self.context)
        };
        debug!(key, context = self.context, listeners = listeners.len(), "stored value");
        notify(&listeners, Some(value));
        Ok(())
    }

    fn subscribe(&self, key: &str, listener: ChangeListener) -> SubscriptionId {
        let mut backend = self.backend.borrow_mut();
        let id = SubscriptionId(backend.next_subscription);
        backend.next_subscription += 1;
        backend.registrations.push(Registration {
            id,
            key: key.to_string(),
            context: self.context,
            listener: Rc::new(RefCell::new(listener)),
        });
        id
    }

    fn unsubscribe(&self, id: SubscriptionId) {
        self.backend
            .borrow_mut()
            .registrations
            .retain(|r| r.id != id);
    }
}

fn notify(listeners: &[Rc<RefCell<ChangeListener>>], value: Option<&str>) {
    for listener in listeners {
        // A listener that is already running is skipped rather than re-entered.
        if let Ok(mut callback) = listener.try_borrow_mut() {
            (*callback)(value);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn recorder() -> (Rc<RefCell<Vec<Option<String>>>>, ChangeListener) {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        let listener: ChangeListener = Box::new(move |v: Option<&str>| {
            sink.borrow_mut().push(v.map(str::to_string));
        });
        (seen, listener)
    }

    #[test]
    fn write_and_read() {
        let store = MemoryStore::new();
        store.write_raw("k", "1").unwrap();
        assert_eq!(store.read_raw("k").unwrap().as_deref(), Some("1"));
        assert_eq!(store.len(), 1);
        assert!(!store.is_empty());
    }

    #[test]
    fn contexts_share_values() {
        let a = MemoryStore::new();
        let b = a.context();
        a.write_raw("k", "\"x\"").unwrap();
        assert_eq!(b.read_raw("k").unwrap().as_deref(), Some("\"x\""));
    }

    #[test]
    fn other_context_is_notified() {
        let a = MemoryStore::new();
        let b = a.context();
        let (seen, listener) = recorder();
        b.subscribe("k", listener);
        a.write_raw("k", "2").unwrap();
        assert_eq!(*seen.borrow(), vec![Some("2".to_string())]);
    }

    #[test]
    fn writer_is_not_notified() {
        let a = MemoryStore::new();
        let (seen, listener) = recorder();
        a.subscribe("k", listener);
        a.write_raw("k", "2").unwrap();
        assert!(seen.borrow().is_empty());
    }

    #[test]
    fn other_keys_are_ignored() {
        let a = MemoryStore::new();
        let b = a.context();
        let (seen, listener) = recorder();
        b.subscribe("test-key", listener);
        a.write_raw("different-key", "1").unwrap();
        assert!(seen.borrow().is_empty());
    }

    #[test]
    fn unsubscribe_stops_notifications() {
        let a = MemoryStore::new();
        let b = a.context();
        let (seen, listener) = recorder();
        let id = b.subscribe("k", listener);
        b.unsubscribe(id);
        a.write_raw("k", "1").unwrap();
        assert!(seen.borrow().is_empty());
    }

    #[test]
    fn remove_notifies_with_none() {
        let a = MemoryStore::new();
        let b = a.context();
        a.write_raw("k", "1").unwrap();
        let (seen, listener) = recorder();
        b.subscribe("k", listener);
        a.remove("k");
        assert_eq!(*seen.borrow(), vec![None]);
        assert!(a.read_raw("k").unwrap().is_none());
    }

    #[test]
    fn quota_exceeded_keeps_previous_value() {
        let store = MemoryStore::with_quota(8);
        store.write_raw("k", "abc").unwrap();
        let err = store.write_raw("k", "abcdefghij").unwrap_err();
        assert_eq!(
            err,
            StoreError::QuotaExceeded {
                key: "k".to_string(),
                quota: 8
            }
        );
        assert_eq!(store.read_raw("k").unwrap().as_deref(), Some("abc"));
    }

    #[test]
    fn quota_counts_replacement_not_addition() {
        let store = MemoryStore::with_quota(6);
        store.write_raw("k", "12345").unwrap();
        store.write_raw("k", "54321").unwrap();
        assert_eq!(store.usage(), 6);
    }
}
