//! Stress tracking for a single tabletop-game character.
//!
//! [`StressTracker`] is the entry point: it owns the persisted
//! [`CharacterState`], the in-memory [`ActionLog`], the locale preference
//! and the random source, and routes every event the state engine produces
//! into the log. The pieces are public so they can be wired differently.

pub mod clock;
pub mod config;
pub mod error;
pub mod event;
pub mod locale;
pub mod log;
pub mod session;
pub mod state;

pub use clock::{Clock, FixedClock, SystemClock};
pub use config::{CHARACTER_KEY, LANGUAGE_PREFERENCE_KEY, TrackerConfig};
pub use error::{PushBlocked, TrackerError, TrackerResult};
pub use event::{ActionEvent, ActionType, DiceRollDetails, PanicRollDetails};
pub use locale::LocalePreference;
pub use log::{ActionLog, ActionLogEntry};
pub use session::StressTracker;
pub use state::{CharacterState, PanicRoll, PanicRollResult};
