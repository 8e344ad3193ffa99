//! Pushing a roll.

use serde::{Deserialize, Serialize};
use st_core::DieRoller;

use super::{DiceRollResult, PANIC_FACE, SUCCESS_FACE, count_successes};

/// The successes a push keeps, split by pool.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KeptDice {
    /// Base dice showing a 6.
    pub base_dice: Vec<u32>,
    /// Stress dice showing a 6.
    pub stress_dice: Vec<u32>,
}

impl KeptDice {
    /// Whether nothing would be kept.
    pub fn is_empty(&self) -> bool {
        self.base_dice.is_empty() && self.stress_dice.is_empty()
    }
}

/// The dice a push of `previous` keeps.
pub fn kept_dice(previous: &DiceRollResult) -> KeptDice {
    let sixes = |faces: &[u32]| -> Vec<u32> {
        faces
            .iter()
            .copied()
            .filter(|&f| f == SUCCESS_FACE)
            .collect()
    };
    KeptDice {
        base_dice: sixes(previous.base_dice_results.as_slice()),
        stress_dice: sixes(previous.stress_dice_results.as_slice()),
    }
}

/// Push a roll.
///
/// Dice showing a 6 keep their face and position. Every other die is
/// re-rolled, base dice first and then stress dice, each in position order.
/// One more stress die is then rolled and appended. Only stress dice rolled
/// during the push can trigger panic; a kept 6 never does and an earlier 1
/// has already been replaced. Successes count the whole new set.
///
/// Pushing an already pushed result is allowed here; limiting pushes is the
/// caller's business.
pub fn push_roll(previous: &DiceRollResult, roller: &mut dyn DieRoller) -> DiceRollResult {
    let base_dice_results: Vec<u32> = previous
        .base_dice_results
        .iter()
        .map(|&face| reroll_unless_success(face, roller))
        .collect();

    let mut panic_triggered = false;
    let mut stress_dice_results = Vec::with_capacity(previous.stress_dice_results.len() + 1);
    for &face in &previous.stress_dice_results {
        if face == SUCCESS_FACE {
            stress_dice_results.push(face);
        } else {
            let rerolled = roller.d6();
            panic_triggered |= rerolled == PANIC_FACE;
            stress_dice_results.push(rerolled);
        }
    }
    let extra = roller.d6();
    panic_triggered |= extra == PANIC_FACE;
    stress_dice_results.push(extra);

    let successes = count_successes(&base_dice_results) + count_successes(&stress_dice_results);

    DiceRollResult {
        base_dice_results,
        stress_dice_results,
        successes,
        panic_triggered,
        is_pushed: true,
    }
}

fn reroll_unless_success(face: u32, roller: &mut dyn DieRoller) -> u32 {
    if face == SUCCESS_FACE {
        face
    } else {
        roller.d6()
    }
}
