//! Actions produced by state changes.
//!
//! State-changing operations return an [`ActionEvent`] instead of writing to
//! the log themselves. Whoever owns both the state and the log forwards the
//! event; see [`StressTracker`](crate::StressTracker).

use serde::{Deserialize, Serialize};
use st_mechanics::{DiceRollResult, KeptDice};

/// The kind of action a log entry records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ActionType {
    /// Stress went up by one.
    Increment,
    /// Stress went down by one, or stayed at zero.
    Decrement,
    /// Stress was set to zero.
    Reset,
    /// A panic roll was made.
    Panic,
    /// A dice pool was rolled.
    DiceRoll,
    /// A dice roll was pushed.
    PushRoll,
}

impl ActionType {
    /// The wire name of the action.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Increment => "increment",
            Self::Decrement => "decrement",
            Self::Reset => "reset",
            Self::Panic => "panic",
            Self::DiceRoll => "diceRoll",
            Self::PushRoll => "pushRoll",
        }
    }
}

impl std::fmt::Display for ActionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How a panic roll was computed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PanicRollDetails {
    /// The d6 face.
    pub die_roll: u32,
    /// Stress when the roll was made.
    pub stress_before: u32,
    /// Talent modifier.
    pub modifier: i32,
    /// Roll used for the table lookup, before clamping to the table.
    pub final_roll: u32,
    /// Name of the effect that came up.
    pub effect_name: String,
}

/// A dice roll as logged, with the dice a push kept.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiceRollDetails {
    /// The roll itself.
    #[serde(flatten)]
    pub roll: DiceRollResult,
    /// The 6s carried over from the pushed roll.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kept_dice: Option<KeptDice>,
}

impl From<DiceRollResult> for DiceRollDetails {
    fn from(roll: DiceRollResult) -> Self {
        Self {
            roll,
            kept_dice: None,
        }
    }
}

/// A state change ready to be logged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionEvent {
    /// What happened.
    pub action: ActionType,
    /// Stress after the action.
    pub resulting_stress: u32,
    /// Set for panic rolls.
    pub panic_details: Option<PanicRollDetails>,
    /// Set for dice rolls and pushes.
    pub dice_roll_details: Option<DiceRollDetails>,
    /// Whether the change was caused by a panic effect.
    pub from_panic: bool,
}

impl ActionEvent {
    /// An event with no details.
    pub fn new(action: ActionType, resulting_stress: u32) -> Self {
        Self {
            action,
            resulting_stress,
            panic_details: None,
            dice_roll_details: None,
            from_panic: false,
        }
    }

    /// Attach panic roll details.
    pub fn with_panic_details(mut self, details: PanicRollDetails) -> Self {
        self.panic_details = Some(details);
        self
    }

    /// Attach dice roll details.
    pub fn with_dice_roll_details(mut self, details: DiceRollDetails) -> Self {
        self.dice_roll_details = Some(details);
        self
    }

    /// Mark the event as caused by a panic effect.
    pub fn caused_by_panic(mut self) -> Self {
        self.from_panic = true;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn action_types_use_wire_names() {
        let names: Vec<String> = [
            ActionType::Increment,
            ActionType::Decrement,
            ActionType::Reset,
            ActionType::Panic,
            ActionType::DiceRoll,
            ActionType::PushRoll,
        ]
        .into_iter()
        .map(|a| serde_json::to_string(&a).unwrap())
        .collect();
        assert_eq!(
            names,
            vec![
                "\"increment\"",
                "\"decrement\"",
                "\"reset\"",
                "\"panic\"",
                "\"diceRoll\"",
                "\"pushRoll\""
            ]
        );
        assert_eq!(ActionType::PushRoll.to_string(), "pushRoll");
    }

    #[test]
    fn dice_details_flatten_the_roll() {
        let details = DiceRollDetails {
            roll: DiceRollResult {
                base_dice_results: vec![6, 2],
                stress_dice_results: vec![3],
                successes: 1,
                panic_triggered: false,
                is_pushed: true,
            },
            kept_dice: Some(KeptDice {
                base_dice: vec![6],
                stress_dice: vec![],
            }),
        };
        let json = serde_json::to_value(&details).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "baseDiceResults": [6, 2],
                "stressDiceResults": [3],
                "successes": 1,
                "panicTriggered": false,
                "isPushed": true,
                "keptDice": {"baseDice": [6], "stressDice": []}
            })
        );
        let back: DiceRollDetails = serde_json::from_value(json).unwrap();
        assert_eq!(back, details);
    }

    #[test]
    fn builder_sets_fields() {
        let event = ActionEvent::new(ActionType::Increment, 3).caused_by_panic();
        assert!(event.from_panic);
        assert!(event.panic_details.is_none());
        assert_eq!(event.resulting_stress, 3);
    }
}
