//! Core types for the stress tracker.
//!
//! Defines the persisted character record, the panic table and its effects,
//! the locale preference, and the injectable die-rolling source shared by
//! the mechanics and tracker crates.

pub mod character;
pub mod error;
pub mod locale;
pub mod panic;
pub mod roller;

pub use character::Character;
pub use error::{CoreError, CoreResult};
pub use locale::Locale;
pub use panic::{ActionLoss, PanicEffect, PanicTable};
pub use roller::{DieRoller, SequenceRoller};
