//! Insertion sort.

use algoviz_model::{SortAlgorithm, SortLog, StepKind};

use crate::recorder::Recorder;

/// Grow a sorted prefix by shifting each new key left into place.
pub fn insertion_sort(input: &[i64]) -> SortLog {
    if input.is_empty() {
        return SortLog::empty(SortAlgorithm::Insertion);
    }

    let mut rec = Recorder::new(input);
    let n = rec.len();

    rec.mark_sorted(0);
    let first = rec.values[0];
    rec.record(
        StepKind::Initialize,
        &[0],
        &[first],
        format!("Starting with first element {first} which is already sorted"),
    );

    for i in 1..n {
        let key = rec.values[i];
        rec.record(
            StepKind::SelectKey,
            &[i],
            &[key],
            format!("Selecting element {key} at position {i} to insert into sorted portion"),
        );

        // Slot the key will land in; everything in slot..i shifts right.
        let mut slot = i;
        while slot > 0 {
            let j = slot - 1;
            let value = rec.values[j];
            rec.record(
                StepKind::Comparison,
                &[j, i],
                &[value, key],
                format!("Comparing {value} with key {key}"),
            );

            if value <= key {
                break;
            }

            rec.values[j + 1] = value;
            rec.record(
                StepKind::Shift,
                &[j, j + 1],
                &[value, value],
                format!("Shifting {value} one position to the right"),
            );
            slot = j;
        }

        rec.values[slot] = key;
        if slot != i {
            rec.record(
                StepKind::Insert,
                &[slot],
                &[key],
                format!("Inserting {key} at position {slot}"),
            );
        } else {
            rec.record(
                StepKind::AlreadySorted,
                &[i],
                &[key],
                format!("{key} is already in the correct sorted position"),
            );
        }

        rec.mark_sorted(i);
        rec.record(
            StepKind::ElementInserted,
            &[0, i],
            &[],
            format!("Elements 0 through {i} are now sorted"),
        );
    }

    rec.record_complete(&[], "Array sorting complete");
    rec.finish(SortAlgorithm::Insertion)
}
