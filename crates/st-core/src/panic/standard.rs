//! The standard English panic table.

use super::{ActionLoss, PanicEffect, PanicTable};

const KEEPING_IT_TOGETHER: &str = "KEEPING IT TOGETHER";
const KEEPING_IT_TOGETHER_TEXT: &str = "You manage to keep your nerves in check. Barely.";
const PANIC_ROLL_NOTE: &str =
    "Every friendly character who witnesses this must make an immediate Panic Roll.";

pub(super) fn table() -> PanicTable {
    let mut effects: Vec<PanicEffect> = (1..=6)
        .map(|_| PanicEffect::new(KEEPING_IT_TOGETHER, KEEPING_IT_TOGETHER_TEXT))
        .collect();

    effects.extend([
        PanicEffect::new(
            "NERVOUS TWITCH",
            "Your stress level, and the stress level of all friendly characters \
             at short range, increases by one.",
        )
        .with_stress_change(1)
        .with_other_stress_change(1),
        PanicEffect::new(
            "TREMBLE",
            "You start to tremble uncontrollably. All skill rolls using Agility \
             suffer a -2 modification until your panic stops.",
        ),
        PanicEffect::new(
            "DROP ITEM",
            "You drop a weapon or other important item of the GM's choosing. \
             Your stress level increases by one.",
        )
        .with_stress_change(1),
        PanicEffect::new(
            "FREEZE",
            "You're frozen by fear for one round, losing your next slow action. \
             Your stress level, and the stress level of all friendly characters \
             at short range, increases by one.",
        )
        .with_stress_change(1)
        .with_other_stress_change(1)
        .with_action_loss(ActionLoss::Slow),
        PanicEffect::new(
            "SEEK COVER",
            "You must use your next action to move away from danger and find a \
             safe spot. Your stress level decreases by one, but the stress level \
             of all friendly characters at short range increases by one.",
        )
        .with_stress_change(-1)
        .with_other_stress_change(1),
        PanicEffect::new(
            "SCREAM",
            "You scream your lungs out for one round, losing your next slow \
             action. Your stress level decreases by one.",
        )
        .with_stress_change(-1)
        .with_action_loss(ActionLoss::Slow)
        .with_notes(PANIC_ROLL_NOTE),
        PanicEffect::new(
            "FLEE",
            "You flee to a safe place and refuse to leave it. You won't attack \
             anyone or attempt anything dangerous. Your stress level decreases \
             by one.",
        )
        .with_stress_change(-1)
        .with_notes(PANIC_ROLL_NOTE),
        PanicEffect::new(
            "FRENZY",
            "You immediately attack the nearest person or creature, friendly or \
             not, and won't stop until you or the target is broken.",
        )
        .with_notes(PANIC_ROLL_NOTE),
        PanicEffect::new(
            "CATATONIC",
            "You collapse to the floor and can't talk or move, staring blankly \
             into oblivion.",
        )
        .with_action_loss(ActionLoss::All),
    ]);

    PanicTable { effects }
}
