//! Interface language preference.

use serde::{Deserialize, Serialize};

/// A supported interface language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    /// English.
    #[default]
    En,
    /// French.
    Fr,
}

impl Locale {
    /// All supported locales.
    pub fn all() -> &'static [Self] {
        &[Self::En, Self::Fr]
    }

    /// The two-letter language code.
    pub fn code(self) -> &'static str {
        match self {
            Self::En => "en",
            Self::Fr => "fr",
        }
    }

    /// Parse an exact two-letter code (`"en"`, `"fr"`).
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "en" => Some(Self::En),
            "fr" => Some(Self::Fr),
            _ => None,
        }
    }

    /// Pick a locale from a language tag such as `"fr-CA"`.
    ///
    /// Only the primary subtag is considered. Unknown or empty tags fall back
    /// to the default locale.
    pub fn detect(tag: &str) -> Self {
        tag.split(['-', '_'])
            .next()
            .map(|primary| primary.trim().to_lowercase())
            .and_then(|primary| Self::from_code(&primary))
            .unwrap_or_default()
    }
}

impl std::fmt::Display for Locale {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}
