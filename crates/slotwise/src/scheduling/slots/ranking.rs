use std::collections::HashMap;

use chrono::{NaiveDate, NaiveDateTime};

use super::domain::ScoredSlot;

/// Collapse sub-slots sharing a customer-facing arrival window down to the
/// best-scored representative (first seen wins ties), then order the
/// survivors by score descending and booking start ascending.
pub(crate) fn dedupe_and_rank(scored: Vec<ScoredSlot>) -> Vec<ScoredSlot> {
    let mut survivors: Vec<ScoredSlot> = Vec::new();
    let mut index: HashMap<(NaiveDate, NaiveDateTime, NaiveDateTime), usize> = HashMap::new();

    for slot in scored {
        let key = (slot.date, slot.arrival_window_start, slot.arrival_window_end);
        match index.get(&key) {
            Some(&position) => {
                if slot.proximity_score > survivors[position].proximity_score {
                    survivors[position] = slot;
                }
            }
            None => {
                index.insert(key, survivors.len());
                survivors.push(slot);
            }
        }
    }

    survivors.sort_by(|a, b| {
        b.proximity_score
            .cmp(&a.proximity_score)
            .then(a.booking_start.cmp(&b.booking_start))
    });
    survivors
}
