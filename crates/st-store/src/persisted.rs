//! A typed value bound to one store key.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, error, warn};

use crate::error::StoreError;
use crate::store::{DurableStore, SubscriptionId, parse_value, read_value, write_value};

#[derive(Debug)]
struct Slot<T> {
    value: T,
    error: Option<StoreError>,
}

/// A value of type `T` kept in sync with a key of a [`DurableStore`].
///
/// Loading happens once, when the binding is created. Every [`set`] writes
/// through immediately. Failures never reach the caller: the in-memory value
/// stays as set and the failure is kept in an error slot readable through
/// [`last_error`]. Changes made to the key by other contexts replace the
/// in-memory value as they arrive.
///
/// [`set`]: Persisted::set
/// [`last_error`]: Persisted::last_error
pub struct Persisted<T> {
    key: String,
    store: Rc<dyn DurableStore>,
    slot: Rc<RefCell<Slot<T>>>,
    subscription: SubscriptionId,
}

impl<T> Persisted<T>
where
    T: Serialize + DeserializeOwned + Clone + 'static,
{
    /// Bind `key` of `store`, loading the stored value or falling back to
    /// `default` when the key is absent or does not parse.
    pub fn bind(store: Rc<dyn DurableStore>, key: impl Into<String>, default: T) -> Self {
        let key = key.into();
        let (value, error) = match read_value::<T>(store.as_ref(), &key) {
            Ok(Some(value)) => {
                debug!(key = %key, "loaded stored value");
                (value, None)
            }
            Ok(None) => (default, None),
            Err(e) => {
                warn!(key = %key, error = %e, "stored value unreadable, using default");
                (default, Some(e))
            }
        };

        let slot = Rc::new(RefCell::new(Slot { value, error }));
        let subscription = store.subscribe(&key, external_change_listener(&key, &slot));

        Self {
            key,
            store,
            slot,
            subscription,
        }
    }

    /// Replace the value and write it to the store.
    pub fn set(&mut self, value: T) {
        self.slot.borrow_mut().value = value;
        self.save();
    }

    /// Modify the value in place and write it to the store.
    pub fn update<R>(&mut self, f: impl FnOnce(&mut T) -> R) -> R {
        let result = f(&mut self.slot.borrow_mut().value);
        self.save();
        result
    }

    fn save(&mut self) {
        let outcome = {
            let slot = self.slot.borrow();
            write_value(self.store.as_ref(), &self.key, &slot.value)
        };
        let mut slot = self.slot.borrow_mut();
        match outcome {
            Ok(()) => slot.error = None,
            Err(e) => {
                error!(key = %self.key, error = %e, "failed to persist value");
                slot.error = Some(e);
            }
        }
    }
}

impl<T: Clone> Persisted<T> {
    /// A copy of the current in-memory value.
    pub fn get(&self) -> T {
        self.slot.borrow().value.clone()
    }
}

impl<T> Persisted<T> {
    /// Read the current value without copying it.
    pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        f(&self.slot.borrow().value)
    }

    /// The most recent load, write, or external-change failure, if the last
    /// such operation failed.
    pub fn last_error(&self) -> Option<StoreError> {
        self.slot.borrow().error.clone()
    }

    /// The store key this value is bound to.
    pub fn key(&self) -> &str {
        &self.key
    }
}

impl<T> Drop for Persisted<T> {
    fn drop(&mut self) {
        self.store.unsubscribe(self.subscription);
    }
}

impl<T: std::fmt::Debug> std::fmt::Debug for Persisted<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Persisted")
            .field("key", &self.key)
            .field("slot", &self.slot)
            .finish_non_exhaustive()
    }
}

fn external_change_listener<T>(
    key: &str,
    slot: &Rc<RefCell<Slot<T>>>,
) -> Box<dyn FnMut(Option<&str>)>
where
    T: DeserializeOwned + 'static,
{
    let key = key.to_string();
    let slot: Weak<RefCell<Slot<T>>> = Rc::downgrade(slot);
    Box::new(move |raw: Option<&str>| {
        let Some(raw) = raw else {
            debug!(key = %key, "key removed externally, keeping current value");
            return;
        };
        let Some(slot) = slot.upgrade() else {
            return;
        };
        let mut slot = slot.borrow_mut();
        match parse_value::<T>(&key, raw) {
            Ok(value) => {
                debug!(key = %key, "applied external change");
                slot.value = value;
                slot.error = None;
            }
            Err(e) => {
                warn!(key = %key, error = %e, "ignoring unparseable external change");
                slot.error = Some(e);
            }
        }
    })
}
