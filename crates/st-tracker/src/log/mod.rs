//! Session-scoped history of stress actions.

pub mod action_log;
pub mod entry;

pub use action_log::ActionLog;
pub use entry::ActionLogEntry;
