//! Panic effects and the stress-indexed panic table.
//!
//! A panic table maps every roll from 1 to 15 to an effect. Rolls above 15
//! use the last entry. Tables arrive as JSON objects keyed `"1"` through
//! `"15"`, usually from a translated content bundle.

mod standard;

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};

/// Highest index in a panic table. Rolls above it clamp to this entry.
pub const MAX_PANIC_INDEX: u32 = 15;

/// Which actions a panicking character loses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActionLoss {
    /// The next slow action is lost.
    Slow,
    /// All actions are lost.
    All,
}

/// One row of the panic table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PanicEffect {
    /// Short effect title.
    pub name: String,
    /// Narrative description of the effect.
    pub description: String,
    /// Change to the rolling character's own stress.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stress_change: Option<i32>,
    /// Change to the stress of nearby friendly characters.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub other_stress_change: Option<i32>,
    /// Actions the character loses.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub action_loss: Option<ActionLoss>,
    /// Extra rules text.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl PanicEffect {
    /// Create an effect with only a name and description.
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            stress_change: None,
            other_stress_change: None,
            action_loss: None,
            notes: None,
        }
    }

    /// Set the change to the roller's own stress.
    pub fn with_stress_change(mut self, delta: i32) -> Self {
        self.stress_change = Some(delta);
        self
    }

    /// Set the change to nearby friendly characters' stress.
    pub fn with_other_stress_change(mut self, delta: i32) -> Self {
        self.other_stress_change = Some(delta);
        self
    }

    /// Set the action loss.
    pub fn with_action_loss(mut self, loss: ActionLoss) -> Self {
        self.action_loss = Some(loss);
        self
    }

    /// Set the notes.
    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }

    /// The stress change to apply to the roller, if it is present and nonzero.
    pub fn own_stress_delta(&self) -> Option<i32> {
        self.stress_change.filter(|delta| *delta != 0)
    }
}

/// A complete panic table with an effect for every index from 1 to 15.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(
    try_from = "BTreeMap<String, PanicEffect>",
    into = "BTreeMap<String, PanicEffect>"
)]
pub struct PanicTable {
    // effects[i] is the entry for index i + 1
    effects: Vec<PanicEffect>,
}

impl PanicTable {
    /// The standard English panic table.
    pub fn standard() -> Self {
        standard::table()
    }

    /// Build a table from effects listed for indices 1 through 15 in order.
    pub fn from_effects(effects: Vec<PanicEffect>) -> CoreResult<Self> {
        if effects.len() < MAX_PANIC_INDEX as usize {
            return Err(CoreError::MissingTableIndex(effects.len() as u32 + 1));
        }
        if effects.len() > MAX_PANIC_INDEX as usize {
            return Err(CoreError::InvalidTableKey(effects.len().to_string()));
        }
        Ok(Self { effects })
    }

    /// Parse a table from a JSON object keyed `"1"` through `"15"`.
    pub fn from_json(source: &str) -> CoreResult<Self> {
        let raw: BTreeMap<String, PanicEffect> = serde_json::from_str(source)?;
        Self::try_from(raw)
    }

    /// Look up the effect for a final panic roll.
    ///
    /// Rolls above 15 use the entry for 15; a roll of 0 uses the entry for 1.
    pub fn lookup(&self, roll: u32) -> &PanicEffect {
        let index = roll.clamp(1, MAX_PANIC_INDEX);
        &self.effects[index as usize - 1]
    }

    /// Iterate over `(index, effect)` pairs in index order.
    pub fn iter(&self) -> impl Iterator<Item = (u32, &PanicEffect)> {
        self.effects
            .iter()
            .enumerate()
            .map(|(i, effect)| (i as u32 + 1, effect))
    }
}

impl Default for PanicTable {
    fn default() -> Self {
        Self::standard()
    }
}

impl TryFrom<BTreeMap<String, PanicEffect>> for PanicTable {
    type Error = CoreError;

    fn try_from(raw: BTreeMap<String, PanicEffect>) -> CoreResult<Self> {
        let mut by_index: BTreeMap<u32, PanicEffect> = BTreeMap::new();
        for (key, effect) in raw {
            let index = key
                .trim()
                .parse::<u32>()
                .ok()
                .filter(|i| (1..=MAX_PANIC_INDEX).contains(i))
                .ok_or_else(|| CoreError::InvalidTableKey(key.clone()))?;
            by_index.insert(index, effect);
        }

        let mut effects = Vec::with_capacity(MAX_PANIC_INDEX as usize);
        for index in 1..=MAX_PANIC_INDEX {
            let effect = by_index
                .remove(&index)
                .ok_or(CoreError::MissingTableIndex(index))?;
            effects.push(effect);
        }
        Ok(Self { effects })
    }
}

impl From<PanicTable> for BTreeMap<String, PanicEffect> {
    fn from(table: PanicTable) -> Self {
        table
            .effects
            .into_iter()
            .enumerate()
            .map(|(i, effect)| ((i + 1).to_string(), effect))
            .collect()
    }
}
