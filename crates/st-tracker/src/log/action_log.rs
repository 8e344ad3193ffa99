//! The in-memory action log.

use tracing::debug;

use super::entry::ActionLogEntry;
use crate::clock::{Clock, SystemClock};
use crate::event::{ActionEvent, ActionType, DiceRollDetails, PanicRollDetails};

/// Append-only record of the actions taken this session.
///
/// Entries are kept in insertion order and read back newest first. Nothing
/// here is persisted.
pub struct ActionLog {
    entries: Vec<ActionLogEntry>,
    clock: Box<dyn Clock>,
}

impl ActionLog {
    /// Create an empty log stamped by the system clock.
    pub fn new() -> Self {
        Self::with_clock(SystemClock)
    }

    /// Create an empty log stamped by `clock`.
    pub fn with_clock(clock: impl Clock + 'static) -> Self {
        Self {
            entries: Vec::new(),
            clock: Box::new(clock),
        }
    }

    /// Append an entry stamped with the current time.
    pub fn log_action(
        &mut self,
        action: ActionType,
        resulting_stress: u32,
        panic_details: Option<PanicRollDetails>,
        from_panic: Option<bool>,
        dice_roll_details: Option<DiceRollDetails>,
    ) {
        let entry = ActionLogEntry {
            timestamp: self.clock.now(),
            action,
            resulting_stress,
            panic_details,
            dice_roll_details,
            from_panic,
        };
        debug!(action = %entry.action, resulting_stress, "logged action");
        self.entries.push(entry);
    }

    /// Append the entry for `event`.
    pub fn record(&mut self, event: ActionEvent) {
        let entry = ActionLogEntry::from_event(event, self.clock.now());
        debug!(action = %entry.action, resulting_stress = entry.resulting_stress, "logged action");
        self.entries.push(entry);
    }

    /// Entries, most recent first.
    pub fn entries(&self) -> impl DoubleEndedIterator<Item = &ActionLogEntry> + ExactSizeIterator {
        self.entries.iter().rev()
    }

    /// Entries in the order they were logged.
    pub fn chronological(&self) -> &[ActionLogEntry] {
        &self.entries
    }

    /// The most recent entry.
    pub fn latest(&self) -> Option<&ActionLogEntry> {
        self.entries.last()
    }

    /// Remove every entry.
    pub fn clear_log(&mut self) {
        debug!(cleared = self.entries.len(), "cleared action log");
        self.entries.clear();
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the log is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for ActionLog {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for ActionLog {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ActionLog")
            .field("entries", &self.entries)
            .finish_non_exhaustive()
    }
}
