//! Algoviz Sorting
//!
//! Five sorting adapters. Each takes the caller's sequence by reference, sorts
//! a private copy to completion and returns a [`SortLog`] describing every
//! comparison, movement and milestone along the way.
//!
//! | Algorithm | Extra overlay |
//! |-----------|---------------|
//! | Bubble    | -             |
//! | Selection | -             |
//! | Insertion | -             |
//! | Quick     | pending partition ranges |
//! | Merge     | active merge range with depth |
//!
//! The input is never mutated, so the same sequence can be fed to several
//! adapters in turn.
//!
//! # Example
//!
//! ```rust
//! use algoviz_model::{SortAlgorithm, StepKind};
//! use algoviz_sorting::run_sorting;
//!
//! let log = run_sorting(SortAlgorithm::Bubble, &[3, 1, 2]);
//! let last = log.last().unwrap();
//! assert_eq!(last.kind, StepKind::Complete);
//! assert_eq!(last.snapshot, vec![1, 2, 3]);
//! ```

mod bubble;
mod insertion;
mod merge;
mod quick;
mod recorder;
mod selection;

use algoviz_model::{SortAlgorithm, SortLog};

pub use bubble::bubble_sort;
pub use insertion::insertion_sort;
pub use merge::merge_sort;
pub use quick::quick_sort;
pub use selection::selection_sort;

/// Run `algorithm` over `values` and return its log.
///
/// An empty sequence yields an empty log.
pub fn run_sorting(algorithm: SortAlgorithm, values: &[i64]) -> SortLog {
    let log = match algorithm {
        SortAlgorithm::Bubble => bubble_sort(values),
        SortAlgorithm::Selection => selection_sort(values),
        SortAlgorithm::Insertion => insertion_sort(values),
        SortAlgorithm::Quick => quick_sort(values),
        SortAlgorithm::Merge => merge_sort(values),
    };
    tracing::debug!(
        algorithm = %algorithm,
        len = values.len(),
        steps = log.len(),
        "sorting log generated"
    );
    log
}

#[cfg(test)]
mod tests {
    use super::*;
    use algoviz_model::StepKind;

    #[test]
    fn dispatch_tags_log_with_algorithm() {
        for algorithm in SortAlgorithm::ALL {
            let log = run_sorting(algorithm, &[2, 1]);
            assert_eq!(log.algorithm, algorithm);
            assert_eq!(log.last().unwrap().kind, StepKind::Complete);
        }
    }

    #[test]
    fn input_is_left_untouched() {
        let values = vec![5, 4, 3, 2, 1];
        for algorithm in SortAlgorithm::ALL {
            let _ = run_sorting(algorithm, &values);
        }
        assert_eq!(values, vec![5, 4, 3, 2, 1]);
    }

    #[test]
    fn empty_input_gives_empty_log() {
        for algorithm in SortAlgorithm::ALL {
            assert!(run_sorting(algorithm, &[]).is_empty());
        }
    }
}
