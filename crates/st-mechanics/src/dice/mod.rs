//! Base and stress dice pools.
//!
//! Every die is a d6. A 6 on any die is a success. A 1 on a stress die
//! triggers panic; a 1 on a base die means nothing.

mod push;

pub use push::{KeptDice, kept_dice, push_roll};

use serde::{Deserialize, Serialize};
use st_core::DieRoller;

/// The face that counts as a success.
pub const SUCCESS_FACE: u32 = 6;

/// The stress die face that triggers panic.
pub const PANIC_FACE: u32 = 1;

/// How many dice of each kind to roll.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiceRollConfig {
    /// Number of base dice.
    pub base_dice: u32,
    /// Number of stress dice.
    pub stress_dice: u32,
}

impl DiceRollConfig {
    /// A pool of `base_dice` base dice and `stress_dice` stress dice.
    pub fn new(base_dice: u32, stress_dice: u32) -> Self {
        Self {
            base_dice,
            stress_dice,
        }
    }
}

/// The faces rolled for a pool and what they mean.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiceRollResult {
    /// Faces of the base dice, in rolling order.
    pub base_dice_results: Vec<u32>,
    /// Faces of the stress dice, in rolling order.
    pub stress_dice_results: Vec<u32>,
    /// Number of dice showing a 6.
    pub successes: u32,
    /// Whether a stress die rolled this time showed a 1.
    pub panic_triggered: bool,
    /// Whether this result came from pushing an earlier roll.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub is_pushed: bool,
}

impl DiceRollResult {
    /// Whether at least one die succeeded.
    pub fn is_success(&self) -> bool {
        self.successes > 0
    }

    /// Total number of dice in the result.
    pub fn dice_count(&self) -> usize {
        self.base_dice_results.len() + self.stress_dice_results.len()
    }
}

impl std::fmt::Display for DiceRollResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let base: Vec<String> = self.base_dice_results.iter().map(u32::to_string).collect();
        let stress: Vec<String> = self
            .stress_dice_results
            .iter()
            .map(u32::to_string)
            .collect();
        write!(
            f,
            "base [{}] stress [{}]: {} success(es)",
            base.join(", "),
            stress.join(", "),
            self.successes
        )?;
        if self.panic_triggered {
            write!(f, ", panic")?;
        }
        if self.is_pushed {
            write!(f, " (pushed)")?;
        }
        Ok(())
    }
}

/// Roll a pool: all base dice first, then all stress dice.
pub fn roll_dice(config: &DiceRollConfig, roller: &mut dyn DieRoller) -> DiceRollResult {
    let base_dice_results: Vec<u32> = (0..config.base_dice).map(|_| roller.d6()).collect();
    let stress_dice_results: Vec<u32> = (0..config.stress_dice).map(|_| roller.d6()).collect();

    let successes = count_successes(&base_dice_results) + count_successes(&stress_dice_results);
    let panic_triggered = stress_dice_results.contains(&PANIC_FACE);

    DiceRollResult {
        base_dice_results,
        stress_dice_results,
        successes,
        panic_triggered,
        is_pushed: false,
    }
}

pub(crate) fn count_successes(faces: &[u32]) -> u32 {
    faces.iter().filter(|&&f| f == SUCCESS_FACE).count() as u32
}
