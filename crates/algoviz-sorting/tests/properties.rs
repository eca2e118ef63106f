//! Property tests for the sorting adapters.

use algoviz_model::{SortAlgorithm, StepKind};
use algoviz_sorting::run_sorting;
use proptest::prelude::*;

fn algorithm() -> impl Strategy<Value = SortAlgorithm> {
    prop::sample::select(SortAlgorithm::ALL.to_vec())
}

fn values() -> impl Strategy<Value = Vec<i64>> {
    prop::collection::vec(1i64..=100, 1..40)
}

proptest! {
    #[test]
    fn final_snapshot_is_sorted_input(algorithm in algorithm(), input in values()) {
        let log = run_sorting(algorithm, &input);
        let last = log.last().unwrap();

        let mut expected = input.clone();
        expected.sort_unstable();
        prop_assert_eq!(last.kind, StepKind::Complete);
        prop_assert_eq!(&last.snapshot, &expected);
        prop_assert_eq!(last.sorted.len(), input.len());
    }

    #[test]
    fn indices_stay_in_bounds(algorithm in algorithm(), input in values()) {
        let log = run_sorting(algorithm, &input);
        for step in &log.steps {
            prop_assert_eq!(step.snapshot.len(), input.len());
            for &i in &step.indices {
                prop_assert!(i < input.len());
            }
        }
    }

    #[test]
    fn sorted_positions_only_grow(algorithm in algorithm(), input in values()) {
        let log = run_sorting(algorithm, &input);
        for pair in log.steps.windows(2) {
            prop_assert!(pair[0].sorted.is_subset(&pair[1].sorted));
        }
    }

    #[test]
    fn sorted_positions_hold_final_values(input in values()) {
        // For the in-place adapters a position marked sorted never changes again.
        for algorithm in [SortAlgorithm::Bubble, SortAlgorithm::Selection, SortAlgorithm::Quick] {
            let log = run_sorting(algorithm, &input);
            let last = log.last().unwrap();
            for step in &log.steps {
                for &i in &step.sorted {
                    prop_assert_eq!(step.snapshot[i], last.snapshot[i]);
                }
            }
        }
    }

    #[test]
    fn logs_are_deterministic(algorithm in algorithm(), input in values()) {
        let a = serde_json::to_string(&run_sorting(algorithm, &input)).unwrap();
        let b = serde_json::to_string(&run_sorting(algorithm, &input)).unwrap();
        prop_assert_eq!(a, b);
    }
}
