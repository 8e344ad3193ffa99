//! Persisted interface language.

use std::rc::Rc;

use st_core::Locale;
use st_store::{DurableStore, Persisted, StoreError};
use tracing::debug;

/// The user's language choice, kept in the store.
#[derive(Debug)]
pub struct LocalePreference {
    locale: Persisted<Locale>,
}

impl LocalePreference {
    /// Load the preference stored under `key`, or use `default`.
    pub fn bind(store: Rc<dyn DurableStore>, key: &str, default: Locale) -> Self {
        Self {
            locale: Persisted::bind(store, key, default),
        }
    }

    /// The current locale.
    pub fn get(&self) -> Locale {
        self.locale.get()
    }

    /// Switch to `locale` and persist it.
    pub fn set(&mut self, locale: Locale) {
        debug!(%locale, "locale changed");
        self.locale.set(locale);
    }

    /// The latest persistence failure, if the last store operation failed.
    pub fn last_error(&self) -> Option<StoreError> {
        self.locale.last_error()
    }
}
