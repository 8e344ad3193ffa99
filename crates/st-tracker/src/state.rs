//! The character state engine.
//!
//! Owns the live [`Character`] through a [`Persisted`] binding, so every
//! change is written to the store as it happens. Operations that the log
//! cares about hand back [`ActionEvent`]s rather than logging themselves.

use std::rc::Rc;

use serde::{Deserialize, Serialize};
use st_core::{Character, DieRoller, PanicEffect, PanicTable};
use st_mechanics::resolve_panic;
use st_store::{DurableStore, Persisted, StoreError};
use tracing::debug;

use crate::event::{ActionEvent, ActionType, PanicRollDetails};

/// What a panic roll returns to the player.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PanicRollResult {
    /// The final roll, before clamping to the table.
    pub roll: u32,
    /// The effect that came up.
    pub effect: PanicEffect,
}

/// A panic roll result together with the events it produced.
///
/// `events` always starts with the `panic` event. A second event follows
/// when the effect changed the character's stress.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PanicRoll {
    /// The roll and effect.
    pub result: PanicRollResult,
    /// Events to log, oldest first.
    pub events: Vec<ActionEvent>,
}

/// Persisted character state and the rules that change it.
#[derive(Debug)]
pub struct CharacterState {
    character: Persisted<Character>,
    panic_table: PanicTable,
}

impl CharacterState {
    /// Load the character stored under `key`, or start from a blank one.
    pub fn new(store: Rc<dyn DurableStore>, key: &str, panic_table: PanicTable) -> Self {
        Self {
            character: Persisted::bind(store, key, Character::default()),
            panic_table,
        }
    }

    /// A copy of the current character.
    pub fn character(&self) -> Character {
        self.character.get()
    }

    /// Current stress.
    pub fn stress(&self) -> u32 {
        self.character.with(|c| c.stress)
    }

    /// Current character name.
    pub fn name(&self) -> String {
        self.character.with(|c| c.name.clone())
    }

    /// Whether the character has the Nerve of Steel talent.
    pub fn has_nerve_of_steel(&self) -> bool {
        self.character.with(|c| c.has_nerve_of_steel)
    }

    /// The panic table used for panic rolls.
    pub fn panic_table(&self) -> &PanicTable {
        &self.panic_table
    }

    /// The latest persistence failure, if the last store operation failed.
    pub fn last_error(&self) -> Option<StoreError> {
        self.character.last_error()
    }

    /// Replace the character with a fresh one called `name`.
    ///
    /// Stress goes back to 0; the talent is kept. Any name is accepted,
    /// including the current one and the empty string.
    pub fn update_name(&mut self, name: impl Into<String>) {
        let renamed = self.character.with(|c| c.renamed(name));
        debug!(name = %renamed.name, "renamed character");
        self.character.set(renamed);
    }

    /// Raise stress by one.
    pub fn increment_stress(&mut self) -> ActionEvent {
        let stress = self.character.update(|c| {
            c.stress = c.stress.saturating_add(1);
            c.stress
        });
        debug!(stress, "stress incremented");
        ActionEvent::new(ActionType::Increment, stress)
    }

    /// Lower stress by one, stopping at zero.
    ///
    /// At zero the character is unchanged but the event is still produced.
    pub fn decrement_stress(&mut self) -> ActionEvent {
        let stress = self.character.update(|c| {
            c.stress = c.stress.saturating_sub(1);
            c.stress
        });
        debug!(stress, "stress decremented");
        ActionEvent::new(ActionType::Decrement, stress)
    }

    /// Set stress to zero.
    pub fn reset_stress(&mut self) -> ActionEvent {
        self.apply_stress(0);
        ActionEvent::new(ActionType::Reset, 0)
    }

    /// Set stress directly.
    pub fn apply_stress(&mut self, stress: u32) {
        self.character.update(|c| c.stress = stress);
        debug!(stress, "stress set");
    }

    /// Flip the Nerve of Steel talent and return its new value.
    pub fn toggle_nerve_of_steel(&mut self) -> bool {
        let enabled = self.character.update(|c| {
            c.has_nerve_of_steel = !c.has_nerve_of_steel;
            c.has_nerve_of_steel
        });
        debug!(enabled, "toggled nerve of steel");
        enabled
    }

    /// Roll on the panic table and apply the effect's stress change.
    pub fn panic_roll(&mut self, roller: &mut dyn DieRoller) -> PanicRoll {
        let (stress, nerve) = self
            .character
            .with(|c| (c.stress, c.has_nerve_of_steel));
        let outcome = resolve_panic(stress, nerve, &self.panic_table, roller);
        debug!(
            die_roll = outcome.die_roll,
            final_roll = outcome.final_roll,
            effect = %outcome.effect.name,
            "panic roll"
        );

        let details = PanicRollDetails {
            die_roll: outcome.die_roll,
            stress_before: outcome.stress_before,
            modifier: outcome.modifier,
            final_roll: outcome.final_roll,
            effect_name: outcome.effect.name.clone(),
        };
        let mut events =
            vec![ActionEvent::new(ActionType::Panic, stress).with_panic_details(details)];

        if let (Some(delta), Some(after)) =
            (outcome.effect.own_stress_delta(), outcome.resulting_stress)
        {
            self.apply_stress(after);
            let action = if delta > 0 {
                ActionType::Increment
            } else {
                ActionType::Decrement
            };
            events.push(ActionEvent::new(action, after).caused_by_panic());
        }

        PanicRoll {
            result: PanicRollResult {
                roll: outcome.final_roll,
                effect: outcome.effect,
            },
            events,
        }
    }
}
