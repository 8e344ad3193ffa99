//! The persisted character record.

use serde::{Deserialize, Serialize};

/// A character's name, stress level, and the Nerve of Steel talent.
///
/// This is the exact shape written to the durable store. Records written
/// before the talent existed have no `hasNerveOfSteel` field and load with
/// the talent unset.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Character {
    /// Display name. Any string is accepted, including the empty string.
    pub name: String,
    /// Accumulated stress. Never negative, no upper bound.
    pub stress: u32,
    /// Whether the character has the Nerve of Steel talent (-2 on panic rolls).
    #[serde(default)]
    pub has_nerve_of_steel: bool,
}

impl Character {
    /// Create a character with the given name and no stress.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// The record that replaces this one after a name change: stress is
    /// cleared, the talent carries over.
    pub fn renamed(&self, name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            stress: 0,
            has_nerve_of_steel: self.has_nerve_of_steel,
        }
    }
}

impl std::fmt::Display for Character {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = if self.name.is_empty() {
            "(unnamed)"
        } else {
            &self.name
        };
        write!(f, "{name}: stress {}", self.stress)?;
        if self.has_nerve_of_steel {
            write!(f, " [Nerve of Steel]")?;
        }
        Ok(())
    }
}
