//! Selection sort.

use algoviz_model::{SortAlgorithm, SortLog, StepKind};

use crate::recorder::Recorder;

/// Repeatedly select the minimum of the unsorted suffix and move it to the
/// front of that suffix.
pub fn selection_sort(input: &[i64]) -> SortLog {
    if input.is_empty() {
        return SortLog::empty(SortAlgorithm::Selection);
    }

    let mut rec = Recorder::new(input);
    let n = rec.len();

    for i in 0..n - 1 {
        let mut min = i;
        rec.record(
            StepKind::Select,
            &[i, min],
            &[rec.values[i]],
            format!("Looking for minimum element starting from index {i}"),
        );

        for j in i + 1..n {
            let (current_min, candidate) = (rec.values[min], rec.values[j]);
            rec.record(
                StepKind::Comparison,
                &[min, j],
                &[current_min, candidate],
                format!(
                    "Comparing current min {current_min} at index {min} with {candidate} at index {j}"
                ),
            );

            if candidate < current_min {
                let old = min;
                min = j;
                rec.record(
                    StepKind::UpdateMin,
                    &[old, min],
                    &[current_min, candidate],
                    format!("Found new minimum {candidate} at index {min}"),
                );
            }
        }

        if min != i {
            rec.values.swap(i, min);
            let (placed, displaced) = (rec.values[i], rec.values[min]);
            rec.record(
                StepKind::Swap,
                &[i, min],
                &[placed, displaced],
                format!("Placing minimum value {placed} at position {i}"),
            );
        } else {
            let value = rec.values[i];
            rec.record(
                StepKind::InPlace,
                &[i],
                &[value],
                format!("Value {value} already in correct position {i}"),
            );
        }

        rec.mark_sorted(i);
        rec.record(
            StepKind::ElementPlaced,
            &[i],
            &[],
            format!(
                "Element {} is now in its final sorted position {i}",
                rec.values[i]
            ),
        );
    }

    let last = n - 1;
    rec.record_complete(&[last], "Array is sorted");
    rec.finish(SortAlgorithm::Selection)
}
