//! Property tests for the stress tracker.

use std::rc::Rc;

use proptest::prelude::*;
use st_store::MemoryStore;
use st_tracker::{ActionType, StressTracker, TrackerConfig};

#[derive(Debug, Clone, Copy)]
enum Op {
    Increment,
    Decrement,
    Reset,
    Panic,
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        Just(Op::Increment),
        Just(Op::Decrement),
        Just(Op::Reset),
        Just(Op::Panic),
    ]
}

proptest! {
    #[test]
    fn stress_follows_counter_model(ops in prop::collection::vec(op(), 0..60)) {
        let mut tracker = StressTracker::new(
            Rc::new(MemoryStore::new()),
            TrackerConfig::default().with_seed(1),
        );
        let mut model: u32 = 0;
        let mut expected_entries = 0;
        for op in ops {
            match op {
                Op::Increment => {
                    model += 1;
                    tracker.increment_stress();
                    expected_entries += 1;
                }
                Op::Decrement => {
                    model = model.saturating_sub(1);
                    tracker.decrement_stress();
                    expected_entries += 1;
                }
                Op::Reset => {
                    model = 0;
                    tracker.reset_stress();
                    expected_entries += 1;
                }
                Op::Panic => {
                    let before = tracker.log().len();
                    tracker.panic_roll();
                    let added = tracker.log().len() - before;
                    prop_assert!(added == 1 || added == 2);
                    model = tracker.stress();
                    expected_entries += added;
                }
            }
            prop_assert_eq!(tracker.stress(), model);
            prop_assert_eq!(tracker.log().latest().map(|e| e.resulting_stress), Some(model));
        }
        prop_assert_eq!(tracker.log().len(), expected_entries);
    }

    #[test]
    fn panic_roll_matches_formula(stress in 0u32..25, nerve in any::<bool>(), seed in any::<u64>()) {
        let mut tracker = StressTracker::new(
            Rc::new(MemoryStore::new()),
            TrackerConfig::default().with_seed(seed),
        );
        for _ in 0..stress {
            tracker.increment_stress();
        }
        if nerve {
            tracker.toggle_nerve_of_steel();
        }
        let result = tracker.panic_roll();

        let entry = tracker
            .log()
            .entries()
            .find(|e| e.action == ActionType::Panic)
            .cloned()
            .unwrap();
        let details = entry.panic_details.clone().unwrap();
        prop_assert!((1..=6).contains(&details.die_roll));
        prop_assert_eq!(details.stress_before, stress);
        prop_assert_eq!(details.modifier, if nerve { -2 } else { 0 });
        let expected = (i64::from(details.die_roll) + i64::from(stress) + i64::from(details.modifier)).max(1);
        prop_assert_eq!(i64::from(result.roll), expected);
        prop_assert_eq!(&result.effect, tracker.panic_table().lookup(result.roll.min(15)));
        prop_assert_eq!(entry.resulting_stress, stress);

        let expected_after = match result.effect.stress_change.filter(|d| *d != 0) {
            Some(delta) => (i64::from(stress) + i64::from(delta)).max(0),
            None => i64::from(stress),
        };
        prop_assert_eq!(i64::from(tracker.stress()), expected_after);
    }

    #[test]
    fn dice_pools_match_request(base in 0u32..10, stress in 0u32..10, seed in any::<u64>()) {
        let mut tracker = StressTracker::new(
            Rc::new(MemoryStore::new()),
            TrackerConfig::default().with_seed(seed),
        );
        for _ in 0..stress {
            tracker.increment_stress();
        }
        let roll = tracker.roll_dice(base);
        prop_assert_eq!(roll.base_dice_results.len() as u32, base);
        prop_assert_eq!(roll.stress_dice_results.len() as u32, stress);
        let all: Vec<u32> = roll
            .base_dice_results
            .iter()
            .chain(&roll.stress_dice_results)
            .copied()
            .collect();
        prop_assert!(all.iter().all(|f| (1..=6).contains(f)));
        prop_assert_eq!(roll.successes as usize, all.iter().filter(|&&f| f == 6).count());
        prop_assert_eq!(roll.panic_triggered, roll.stress_dice_results.contains(&1));
        prop_assert_eq!(tracker.can_push(), !roll.panic_triggered);
    }
}
