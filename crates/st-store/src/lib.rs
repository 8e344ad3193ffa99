//! Durable value storage for the stress tracker.
//!
//! A [`DurableStore`] keeps JSON text under string keys and tells other
//! contexts sharing the same storage when a key changes. [`Persisted`] binds
//! one typed value to one key: it loads synchronously, writes on every
//! change, follows external changes, and records failures in an error slot
//! instead of returning them to the caller.

pub mod error;
pub mod memory;
pub mod persisted;
pub mod store;

pub use error::{StoreError, StoreResult};
pub use memory::MemoryStore;
pub use persisted::Persisted;
pub use store::{ChangeListener, DurableStore, SubscriptionId, read_value, write_value};
