//! Stress tracking session.
//!
//! `StressTracker` wires the character state engine to the action log: each
//! event the engine hands back is logged here, and so are dice rolls and
//! pushes, which the engine itself knows nothing about.

use std::rc::Rc;

use rand::SeedableRng;
use rand::rngs::StdRng;
use st_core::{Character, DieRoller, Locale, PanicTable};
use st_mechanics::{DiceRollConfig, DiceRollResult, kept_dice, push_roll, roll_dice};
use st_store::{DurableStore, StoreError};
use tracing::{debug, info};

use crate::clock::{Clock, SystemClock};
use crate::config::TrackerConfig;
use crate::error::{PushBlocked, TrackerError, TrackerResult};
use crate::event::{ActionEvent, ActionType, DiceRollDetails};
use crate::locale::LocalePreference;
use crate::log::ActionLog;
use crate::state::{CharacterState, PanicRollResult};

/// A character's stress, history, and dice, backed by a durable store.
pub struct StressTracker {
    state: CharacterState,
    log: ActionLog,
    locale: LocalePreference,
    roller: Box<dyn DieRoller>,
    last_roll: Option<DiceRollResult>,
}

impl StressTracker {
    /// Open a session on `store`, loading any saved character and locale.
    pub fn new(store: Rc<dyn DurableStore>, config: TrackerConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        let state = CharacterState::new(
            Rc::clone(&store),
            &config.character_key,
            config.panic_table,
        );
        let locale = LocalePreference::bind(store, &config.locale_key, config.default_locale);
        info!(
            character = %state.character(),
            locale = %locale.get(),
            "opened stress tracker"
        );

        Self {
            state,
            log: ActionLog::with_clock(SystemClock),
            locale,
            roller: Box::new(rng),
            last_roll: None,
        }
    }

    /// Replace the clock used to stamp log entries. Existing entries are dropped.
    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.log = ActionLog::with_clock(clock);
        self
    }

    /// Replace the source of die faces.
    pub fn with_roller(mut self, roller: impl DieRoller + 'static) -> Self {
        self.roller = Box::new(roller);
        self
    }

    /// A copy of the current character.
    pub fn character(&self) -> Character {
        self.state.character()
    }

    /// Current stress.
    pub fn stress(&self) -> u32 {
        self.state.stress()
    }

    /// The panic table in use.
    pub fn panic_table(&self) -> &PanicTable {
        self.state.panic_table()
    }

    /// The action log.
    pub fn log(&self) -> &ActionLog {
        &self.log
    }

    /// The latest failure saving or loading the character, if any.
    pub fn store_error(&self) -> Option<StoreError> {
        self.state.last_error()
    }

    /// The most recent dice roll since the last name change.
    pub fn last_roll(&self) -> Option<&DiceRollResult> {
        self.last_roll.as_ref()
    }

    /// Rename the character. Stress resets, the log is cleared and the last
    /// roll can no longer be pushed.
    pub fn update_name(&mut self, name: impl Into<String>) {
        self.state.update_name(name);
        self.log.clear_log();
        self.last_roll = None;
    }

    /// Raise stress by one and return the new value.
    pub fn increment_stress(&mut self) -> u32 {
        let event = self.state.increment_stress();
        self.record(event)
    }

    /// Lower stress by one, not below zero, and return the new value.
    pub fn decrement_stress(&mut self) -> u32 {
        let event = self.state.decrement_stress();
        self.record(event)
    }

    /// Set stress to zero.
    pub fn reset_stress(&mut self) {
        let event = self.state.reset_stress();
        self.record(event);
    }

    /// Flip the Nerve of Steel talent and return its new value.
    pub fn toggle_nerve_of_steel(&mut self) -> bool {
        self.state.toggle_nerve_of_steel()
    }

    /// Make a panic roll and log it along with any stress change.
    pub fn panic_roll(&mut self) -> PanicRollResult {
        let roll = self.state.panic_roll(self.roller.as_mut());
        for event in roll.events {
            self.record(event);
        }
        roll.result
    }

    /// Roll `base_dice` base dice plus one stress die per point of stress.
    pub fn roll_dice(&mut self, base_dice: u32) -> DiceRollResult {
        let config = DiceRollConfig::new(base_dice, self.state.stress());
        let result = roll_dice(&config, self.roller.as_mut());
        debug!(%result, "dice rolled");

        let event = ActionEvent::new(ActionType::DiceRoll, self.state.stress())
            .with_dice_roll_details(DiceRollDetails::from(result.clone()));
        self.record(event);
        self.last_roll = Some(result.clone());
        result
    }

    /// Why the last roll cannot be pushed, or `None` if it can.
    pub fn push_blocked(&self) -> Option<PushBlocked> {
        match &self.last_roll {
            None => Some(PushBlocked::NoRoll),
            Some(roll) if roll.is_pushed => Some(PushBlocked::AlreadyPushed),
            Some(roll) if roll.panic_triggered => Some(PushBlocked::PanicTriggered),
            Some(_) => None,
        }
    }

    /// Whether the last roll can be pushed.
    pub fn can_push(&self) -> bool {
        self.push_blocked().is_none()
    }

    /// Push the last roll.
    ///
    /// A roll can be pushed once, and not if it triggered panic. Pushing
    /// raises stress by one; the pushed roll is logged with that stress and
    /// the 6s it kept.
    pub fn push_roll(&mut self) -> TrackerResult<DiceRollResult> {
        if let Some(reason) = self.push_blocked() {
            return Err(TrackerError::PushUnavailable(reason));
        }
        let Some(previous) = self.last_roll.take() else {
            return Err(TrackerError::PushUnavailable(PushBlocked::NoRoll));
        };

        let kept = kept_dice(&previous);
        let pushed = push_roll(&previous, self.roller.as_mut());
        let stress = self.state.stress().saturating_add(1);
        self.state.apply_stress(stress);
        debug!(result = %pushed, stress, "roll pushed");

        let event = ActionEvent::new(ActionType::PushRoll, stress).with_dice_roll_details(
            DiceRollDetails {
                roll: pushed.clone(),
                kept_dice: Some(kept),
            },
        );
        self.record(event);
        self.last_roll = Some(pushed.clone());
        Ok(pushed)
    }

    /// The current interface language.
    pub fn locale(&self) -> Locale {
        self.locale.get()
    }

    /// Switch the interface language and persist the choice.
    pub fn set_locale(&mut self, locale: Locale) {
        self.locale.set(locale);
    }

    /// The latest failure saving or loading the language preference, if any.
    pub fn locale_error(&self) -> Option<StoreError> {
        self.locale.last_error()
    }

    fn record(&mut self, event: ActionEvent) -> u32 {
        let stress = event.resulting_stress;
        self.log.record(event);
        stress
    }
}
