//! Dice and panic resolution for the stress tracker.
//!
//! Everything here is a pure function of its inputs and an injected
//! [`DieRoller`](st_core::DieRoller): rolling a base and stress dice pool,
//! pushing a roll, and resolving a panic roll against a panic table. State
//! and logging live in the tracker crate.

pub mod dice;
pub mod panic;

pub use dice::{DiceRollConfig, DiceRollResult, KeptDice, kept_dice, push_roll, roll_dice};
pub use panic::{PanicOutcome, resolve_panic};
