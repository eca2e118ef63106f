//! Bubble sort.

use algoviz_model::{SortAlgorithm, SortLog, StepKind};

use crate::recorder::Recorder;

/// Adjacent compare-and-swap passes. A pass without swaps ends the sort.
pub fn bubble_sort(input: &[i64]) -> SortLog {
    if input.is_empty() {
        return SortLog::empty(SortAlgorithm::Bubble);
    }

    let mut rec = Recorder::new(input);
    let n = rec.len();

    for i in 0..n {
        let mut swapped = false;

        for j in 0..n - i - 1 {
            let (a, b) = (rec.values[j], rec.values[j + 1]);
            rec.record(
                StepKind::Comparison,
                &[j, j + 1],
                &[a, b],
                format!("Comparing {a} and {b}"),
            );

            if a > b {
                rec.values.swap(j, j + 1);
                swapped = true;
                rec.record(
                    StepKind::Swap,
                    &[j, j + 1],
                    &[b, a],
                    format!("Swapping {a} and {b}"),
                );
            }
        }

        let last = n - i - 1;
        rec.mark_sorted(last);
        rec.record(
            StepKind::PassComplete,
            &[last],
            &[],
            format!(
                "Pass {} complete. Element {} is now in its sorted position.",
                i + 1,
                rec.values[last]
            ),
        );

        if !swapped {
            if last > 0 {
                rec.mark_range_sorted(0, last - 1);
            }
            break;
        }
    }

    rec.record_complete(&[], "Array sorting complete");
    rec.finish(SortAlgorithm::Bubble)
}
