//! Detect overlapping items within a day.
//!
//! Performs pairwise comparison between a day's items to find time overlaps.
//! Adjacent items (where one ends exactly when another starts) are NOT
//! conflicts. Items are compared on their minute-of-day values, so an item
//! that wraps past midnight (end before start) is skipped rather than
//! treated as spanning the whole day.

use serde::Serialize;

use crate::model::{DaySchedule, Itinerary, ScheduleItem};
use crate::time::time_to_minutes;

/// A detected overlap between two items of the same day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemConflict {
    /// The earlier item in day order.
    pub first_id: String,
    pub second_id: String,
    pub overlap_minutes: i64,
}

/// Find all pairwise conflicts among the items of `day`.
///
/// Two items overlap when `a.start < b.end && b.start < a.end`.
/// The overlap duration is `min(a.end, b.end) - max(a.start, b.start)`.
pub fn find_day_conflicts(day: &DaySchedule) -> Vec<ItemConflict> {
    let spans: Vec<(&ScheduleItem, i64, i64)> = day
        .items
        .iter()
        .filter_map(|item| {
            let start = time_to_minutes(&item.start_time).ok()?;
            let end = time_to_minutes(&item.end_time).ok()?;
            (start < end).then_some((item, start, end))
        })
        .collect();

    let mut conflicts = Vec::new();

    for (i, (a, a_start, a_end)) in spans.iter().enumerate() {
        for (b, b_start, b_end) in &spans[i + 1..] {
            if a_start < b_end && b_start < a_end {
                conflicts.push(ItemConflict {
                    first_id: a.id.clone(),
                    second_id: b.id.clone(),
                    overlap_minutes: a_end.min(b_end) - a_start.max(b_start),
                });
            }
        }
    }

    conflicts
}

/// Find conflicts in the day with `day_number`. Unknown days have none.
pub fn find_conflicts(itinerary: &Itinerary, day_number: u32) -> Vec<ItemConflict> {
    itinerary
        .day(day_number)
        .map(find_day_conflicts)
        .unwrap_or_default()
}
