//! Panic roll resolution.

use st_core::{DieRoller, PanicEffect, PanicTable};

/// Modifier applied to the panic roll of a character with Nerve of Steel.
pub const NERVE_OF_STEEL_MODIFIER: i32 = -2;

/// Everything a panic roll determined.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PanicOutcome {
    /// The d6 face.
    pub die_roll: u32,
    /// Stress at the moment of rolling.
    pub stress_before: u32,
    /// Talent modifier added to the roll.
    pub modifier: i32,
    /// `die_roll + stress_before + modifier`, never below 1.
    pub final_roll: u32,
    /// The table entry for `final_roll`, clamped to the table.
    pub effect: PanicEffect,
    /// New stress for the roller when the effect changes it.
    pub resulting_stress: Option<u32>,
}

impl PanicOutcome {
    /// Stress after the effect is applied.
    pub fn stress_after(&self) -> u32 {
        self.resulting_stress.unwrap_or(self.stress_before)
    }
}

/// Roll a d6, add stress and the talent modifier, and look up the effect.
///
/// Rolls above the table use its last entry. When the effect carries a
/// nonzero stress change, the resulting stress is computed and floored at 0;
/// applying it is up to the caller.
pub fn resolve_panic(
    stress: u32,
    has_nerve_of_steel: bool,
    table: &PanicTable,
    roller: &mut dyn DieRoller,
) -> PanicOutcome {
    let die_roll = roller.d6();
    let modifier = if has_nerve_of_steel {
        NERVE_OF_STEEL_MODIFIER
    } else {
        0
    };
    let raw = i64::from(die_roll) + i64::from(stress) + i64::from(modifier);
    let final_roll = u32::try_from(raw.max(1)).unwrap_or(u32::MAX);
    let effect = table.lookup(final_roll).clone();
    let resulting_stress = effect.own_stress_delta().map(|delta| {
        let after = (i64::from(stress) + i64::from(delta)).max(0);
        u32::try_from(after).unwrap_or(u32::MAX)
    });

    PanicOutcome {
        die_roll,
        stress_before: stress,
        modifier,
        final_roll,
        effect,
        resulting_stress,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use st_core::{ActionLoss, SequenceRoller};

    fn resolve(stress: u32, nerve: bool, face: u32) -> PanicOutcome {
        let mut roller = SequenceRoller::new([face]);
        resolve_panic(stress, nerve, &PanicTable::standard(), &mut roller)
    }

    #[test]
    fn low_roll_keeps_it_together() {
        let outcome = resolve(0, false, 3);
        assert_eq!(outcome.final_roll, 3);
        assert_eq!(outcome.modifier, 0);
        assert_eq!(outcome.effect.name, "KEEPING IT TOGETHER");
        assert_eq!(outcome.resulting_stress, None);
        assert_eq!(outcome.stress_after(), 0);
    }

    #[test]
    fn stress_adds_to_roll() {
        let outcome = resolve(3, false, 4);
        assert_eq!(outcome.die_roll, 4);
        assert_eq!(outcome.final_roll, 7);
        assert_eq!(outcome.effect.name, "NERVOUS TWITCH");
        assert_eq!(outcome.resulting_stress, Some(4));
    }

    #[test]
    fn nerve_of_steel_subtracts_two() {
        let outcome = resolve(3, true, 4);
        assert_eq!(outcome.modifier, -2);
        assert_eq!(outcome.final_roll, 5);
    }

    #[test]
    fn final_roll_never_below_one() {
        let outcome = resolve(0, true, 1);
        assert_eq!(outcome.final_roll, 1);
        assert_eq!(outcome.effect.name, "KEEPING IT TOGETHER");
    }

    #[test]
    fn high_roll_clamps_to_last_entry() {
        let outcome = resolve(12, false, 6);
        assert_eq!(outcome.final_roll, 18);
        assert_eq!(outcome.effect.name, "CATATONIC");
        assert_eq!(outcome.effect.action_loss, Some(ActionLoss::All));
    }

    #[test]
    fn negative_change_reduces_stress() {
        let outcome = resolve(6, false, 5);
        assert_eq!(outcome.final_roll, 11);
        assert_eq!(outcome.effect.name, "SEEK COVER");
        assert_eq!(outcome.resulting_stress, Some(5));
    }

    #[test]
    fn resulting_stress_floors_at_zero() {
        let mut effects: Vec<PanicEffect> = PanicTable::standard()
            .iter()
            .map(|(_, e)| e.clone())
            .collect();
        effects[3] = PanicEffect::new("CALM", "breathe").with_stress_change(-5);
        let table = PanicTable::from_effects(effects).unwrap();
        let mut roller = SequenceRoller::new([4]);
        let outcome = resolve_panic(0, false, &table, &mut roller);
        assert_eq!(outcome.final_roll, 4);
        assert_eq!(outcome.resulting_stress, Some(0));
    }

    #[test]
    fn zero_change_leaves_stress_alone() {
        let mut effects: Vec<PanicEffect> = PanicTable::standard()
            .iter()
            .map(|(_, e)| e.clone())
            .collect();
        effects[1] = PanicEffect::new("STILL", "nothing happens").with_stress_change(0);
        let table = PanicTable::from_effects(effects).unwrap();
        let mut roller = SequenceRoller::new([2]);
        let outcome = resolve_panic(0, false, &table, &mut roller);
        assert_eq!(outcome.resulting_stress, None);
    }
}
