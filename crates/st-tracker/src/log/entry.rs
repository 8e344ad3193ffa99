//! Action log entry type.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::event::{ActionEvent, ActionType, DiceRollDetails, PanicRollDetails};

/// One recorded action. Entries never change once appended.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionLogEntry {
    /// When the action happened.
    pub timestamp: DateTime<Utc>,
    /// What happened.
    pub action: ActionType,
    /// Stress after the action.
    pub resulting_stress: u32,
    /// Present for panic rolls.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub panic_details: Option<PanicRollDetails>,
    /// Present for dice rolls and pushes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dice_roll_details: Option<DiceRollDetails>,
    /// Present and `true` for stress changes caused by a panic effect.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from_panic: Option<bool>,
}

impl ActionLogEntry {
    /// Stamp an event with `timestamp`.
    pub fn from_event(event: ActionEvent, timestamp: DateTime<Utc>) -> Self {
        Self {
            timestamp,
            action: event.action,
            resulting_stress: event.resulting_stress,
            panic_details: event.panic_details,
            dice_roll_details: event.dice_roll_details,
            from_panic: event.from_panic.then_some(true),
        }
    }

    /// Whether this entry records a change caused by a panic effect.
    pub fn is_from_panic(&self) -> bool {
        self.from_panic.unwrap_or(false)
    }
}

impl std::fmt::Display for ActionLogEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} {} -> stress {}",
            self.timestamp.format("%H:%M:%S"),
            self.action,
            self.resulting_stress
        )?;
        if let Some(details) = &self.panic_details {
            write!(f, " ({}, roll {})", details.effect_name, details.final_roll)?;
        }
        if let Some(details) = &self.dice_roll_details {
            write!(f, " ({})", details.roll)?;
        }
        if self.is_from_panic() {
            write!(f, " [panic]")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, 14, 15, 9, 26).unwrap()
    }

    #[test]
    fn serializes_iso_timestamp_and_skips_absent_fields() {
        let entry = ActionLogEntry::from_event(ActionEvent::new(ActionType::Increment, 1), at());
        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "timestamp": "2025-03-14T15:09:26Z",
                "action": "increment",
                "resultingStress": 1
            })
        );
    }

    #[test]
    fn panic_caused_flag_is_kept() {
        let event = ActionEvent::new(ActionType::Decrement, 2).caused_by_panic();
        let entry = ActionLogEntry::from_event(event, at());
        assert_eq!(entry.from_panic, Some(true));
        assert!(entry.is_from_panic());
        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(json["fromPanic"], serde_json::json!(true));
    }

    #[test]
    fn panic_details_serialize_camel_case() {
        let event = ActionEvent::new(ActionType::Panic, 3).with_panic_details(PanicRollDetails {
            die_roll: 4,
            stress_before: 3,
            modifier: 0,
            final_roll: 7,
            effect_name: "NERVOUS TWITCH".to_string(),
        });
        let entry = ActionLogEntry::from_event(event, at());
        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(
            json["panicDetails"],
            serde_json::json!({
                "dieRoll": 4,
                "stressBefore": 3,
                "modifier": 0,
                "finalRoll": 7,
                "effectName": "NERVOUS TWITCH"
            })
        );
    }

    #[test]
    fn display() {
        let entry = ActionLogEntry::from_event(ActionEvent::new(ActionType::Reset, 0), at());
        assert_eq!(entry.to_string(), "15:09:26 reset -> stress 0");
    }
}
