//! The durable store contract and typed helpers.

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::{StoreError, StoreResult};

/// Callback invoked with the new raw text of a key changed by another
/// context, or `None` when the key was removed.
pub type ChangeListener = Box<dyn FnMut(Option<&str>)>;

/// Handle identifying a registered change listener.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubscriptionId(pub u64);

/// Persistence of JSON text under string keys, with change notification.
///
/// Methods take `&self`; implementations that mutate use interior
/// mutability, since several bindings share one store handle.
pub trait DurableStore {
    /// Read the raw text stored under `key`, or `None` if absent.
    fn read_raw(&self, key: &str) -> StoreResult<Option<String>>;

    /// Store `value` under `key`.
    ///
    /// Listeners registered through other contexts for the same key are
    /// notified. The writing context is never notified of its own write.
    fn write_raw(&self, key: &str, value: &str) -> StoreResult<()>;

    /// Register a listener for changes to `key` made by other contexts.
    fn subscribe(&self, key: &str, listener: ChangeListener) -> SubscriptionId;

    /// Remove a listener. Unknown ids are ignored.
    fn unsubscribe(&self, id: SubscriptionId);
}

/// Read and deserialize the value stored under `key`.
///
/// Returns `Ok(None)` when nothing is stored and
/// [`StoreError::Deserialize`] when the stored text does not parse as `T`.
pub fn read_value<T: DeserializeOwned>(
    store: &dyn DurableStore,
    key: &str,
) -> StoreResult<Option<T>> {
    let Some(raw) = store.read_raw(key)? else {
        return Ok(None);
    };
    parse_value(key, &raw).map(Some)
}

/// Serialize `value` and store it under `key`.
pub fn write_value<T: Serialize>(store: &dyn DurableStore, key: &str, value: &T) -> StoreResult<()> {
    let raw = serde_json::to_string(value).map_err(|e| StoreError::Serialize {
        key: key.to_string(),
        message: e.to_string(),
    })?;
    store.write_raw(key, &raw)
}

/// Parse raw store text as `T`.
pub(crate) fn parse_value<T: DeserializeOwned>(key: &str, raw: &str) -> StoreResult<T> {
    serde_json::from_str(raw).map_err(|e| StoreError::Deserialize {
        key: key.to_string(),
        message: e.to_string(),
    })
}
