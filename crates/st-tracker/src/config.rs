//! Configuration for a tracking session.

use st_core::{Locale, PanicTable};

use crate::error::TrackerResult;

/// Store key of the character record.
pub const CHARACTER_KEY: &str = "character";

/// Store key of the language preference.
pub const LANGUAGE_PREFERENCE_KEY: &str = "languagePreference";

/// Configuration for a [`StressTracker`](crate::StressTracker).
#[derive(Debug, Clone)]
pub struct TrackerConfig {
    /// RNG seed for reproducible rolls. `None` seeds from the OS.
    pub seed: Option<u64>,
    /// Store key of the character record.
    pub character_key: String,
    /// Store key of the language preference.
    pub locale_key: String,
    /// Locale used when no preference is stored.
    pub default_locale: Locale,
    /// Panic table for panic rolls.
    pub panic_table: PanicTable,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            seed: None,
            character_key: CHARACTER_KEY.to_string(),
            locale_key: LANGUAGE_PREFERENCE_KEY.to_string(),
            default_locale: Locale::default(),
            panic_table: PanicTable::standard(),
        }
    }
}

impl TrackerConfig {
    /// Set the RNG seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Set the store key of the character record.
    pub fn with_character_key(mut self, key: impl Into<String>) -> Self {
        self.character_key = key.into();
        self
    }

    /// Set the store key of the language preference.
    pub fn with_locale_key(mut self, key: impl Into<String>) -> Self {
        self.locale_key = key.into();
        self
    }

    /// Derive the fallback locale from a language tag such as `"fr-CA"`.
    pub fn with_language_tag(mut self, tag: &str) -> Self {
        self.default_locale = Locale::detect(tag);
        self
    }

    /// Use a custom panic table.
    pub fn with_panic_table(mut self, table: PanicTable) -> Self {
        self.panic_table = table;
        self
    }

    /// Use a panic table given as a JSON object keyed `"1"` to `"15"`.
    pub fn with_panic_table_json(self, source: &str) -> TrackerResult<Self> {
        let table = PanicTable::from_json(source)?;
        Ok(self.with_panic_table(table))
    }
}
