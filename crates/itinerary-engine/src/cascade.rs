//! Time edits with cascading shifts.
//!
//! Editing an item's end time moves everything after it: every later item in
//! the same day, and the first item of the next day in trip order. Editing a
//! start time is absorbed locally by [`crate::adjust`] and does not cascade.
//!
//! Every function here takes the itinerary by reference and returns a new
//! value. Lookup misses (unknown day or item) are no-ops that return an equal
//! copy; malformed or inverted times are errors, raised before the caller can
//! observe any change.

use tracing::{debug, trace};

use crate::adjust::{adjust_item_times_with_options, EngineOptions};
use crate::error::{ItineraryError, Result};
use crate::model::{Itinerary, ScheduleItem};
use crate::time::{is_valid_time, shift_time, time_to_minutes};

// ── update_item_time ────────────────────────────────────────────────────────

/// Update an item's start and/or end time. See
/// [`update_item_time_with_options`].
pub fn update_item_time(
    itinerary: &Itinerary,
    day_number: u32,
    item_id: &str,
    new_start_time: Option<&str>,
    new_end_time: Option<&str>,
) -> Result<Itinerary> {
    update_item_time_with_options(
        itinerary,
        day_number,
        item_id,
        new_start_time,
        new_end_time,
        &EngineOptions::default(),
    )
}

/// Update an item's start and/or end time.
///
/// # Behavior
///
/// - Unknown `day_number` or `item_id`: returns a copy of the input.
/// - `new_start_time`: validated, then passed through
///   [`adjust_item_times_with_options`] with the preceding item's end time.
///   The resulting pair is written onto the item. Nothing else moves.
/// - `new_end_time`: validated and checked against the item's (possibly just
///   updated) start, then written. The difference from the old end is
///   cascaded through [`adjust_subsequent_items`].
///
/// Empty strings count as "not supplied".
///
/// # Errors
///
/// - [`ItineraryError::InvalidTimeFormat`] if a supplied time is not `HH:mm`.
/// - [`ItineraryError::InvalidTimeOrdering`] if the new end is at or before
///   the item's start.
/// - [`ItineraryError::InvalidDuration`] if a start time is supplied and
///   `options` holds a default duration outside `1..=1439`.
///
/// # Examples
///
/// ```
/// use itinerary_engine::{update_item_time, DaySchedule, Itinerary, ScheduleItem};
///
/// let day = DaySchedule::new("d1", "2026-05-01", 1).with_items(vec![
///     ScheduleItem::new("a", "Breakfast", "08:00", "09:00"),
///     ScheduleItem::new("b", "Museum", "09:00", "11:00"),
/// ]);
/// let itinerary = Itinerary { schedules: vec![day], ..Itinerary::default() };
///
/// let updated = update_item_time(&itinerary, 1, "a", None, Some("09:30")).unwrap();
/// assert_eq!(updated.schedules[0].items[1].start_time, "09:30");
/// assert_eq!(updated.schedules[0].items[1].end_time, "11:30");
/// ```
pub fn update_item_time_with_options(
    itinerary: &Itinerary,
    day_number: u32,
    item_id: &str,
    new_start_time: Option<&str>,
    new_end_time: Option<&str>,
    options: &EngineOptions,
) -> Result<Itinerary> {
    let Some(day_index) = itinerary.day_position(day_number) else {
        debug!(day_number, "update_item_time: no such day, leaving itinerary unchanged");
        return Ok(itinerary.clone());
    };
    let Some(item_index) = itinerary.schedules[day_index].item_position(item_id) else {
        debug!(day_number, item_id, "update_item_time: no such item, leaving itinerary unchanged");
        return Ok(itinerary.clone());
    };

    let new_start_time = new_start_time.filter(|t| !t.is_empty());
    let new_end_time = new_end_time.filter(|t| !t.is_empty());

    let mut updated = itinerary.clone();
    let items = &mut updated.schedules[day_index].items;

    if let Some(start) = new_start_time {
        if !is_valid_time(start) {
            return Err(ItineraryError::InvalidTimeFormat(start.to_string()));
        }

        let previous_end = item_index
            .checked_sub(1)
            .map(|previous| items[previous].end_time.clone());
        let range = adjust_item_times_with_options(
            &items[item_index],
            start,
            previous_end.as_deref(),
            options,
        )?;

        debug!(
            day_number,
            item_id,
            start = %range.start_time,
            end = %range.end_time,
            "update_item_time: start adjusted"
        );
        let item = &mut items[item_index];
        item.start_time = range.start_time;
        item.end_time = range.end_time;
    }

    if let Some(end) = new_end_time {
        if !is_valid_time(end) {
            return Err(ItineraryError::InvalidTimeFormat(end.to_string()));
        }

        let item = &mut items[item_index];
        let end_minutes = time_to_minutes(end)?;
        if end_minutes <= time_to_minutes(&item.start_time)? {
            return Err(ItineraryError::InvalidTimeOrdering {
                start: item.start_time.clone(),
                end: end.to_string(),
            });
        }

        let delta = end_minutes - time_to_minutes(&item.end_time)?;
        item.end_time = end.to_string();

        shift_following_items(&mut updated, day_index, item_index, delta)?;
    }

    Ok(updated)
}

// ── adjust_subsequent_items ─────────────────────────────────────────────────

/// Propagate an end-time change of the item at `item_index` in `day_number`.
///
/// With `delta = new_end_time - old_end_time` (minutes, may be negative):
///
/// - every item after `item_index` in the same day has its start and end
///   shifted by `delta`;
/// - the first item of the next day in `schedules` order (the positional
///   successor, not `day_number + 1`) is shifted by `delta`;
/// - nothing else is touched.
///
/// Shifted times wrap across midnight without changing day. A zero delta or
/// an unknown day returns an unchanged copy.
///
/// # Errors
///
/// Returns [`ItineraryError::InvalidTimeFormat`] if either end time, or a
/// stored time that must be shifted, cannot be parsed.
pub fn adjust_subsequent_items(
    itinerary: &Itinerary,
    day_number: u32,
    item_index: usize,
    old_end_time: &str,
    new_end_time: &str,
) -> Result<Itinerary> {
    let delta = time_to_minutes(new_end_time)? - time_to_minutes(old_end_time)?;

    let mut updated = itinerary.clone();
    if let Some(day_index) = itinerary.day_position(day_number) {
        shift_following_items(&mut updated, day_index, item_index, delta)?;
    }
    Ok(updated)
}

// ── Internal helpers ────────────────────────────────────────────────────────

fn shift_following_items(
    itinerary: &mut Itinerary,
    day_index: usize,
    item_index: usize,
    delta: i64,
) -> Result<()> {
    if delta == 0 {
        return Ok(());
    }

    let day = &mut itinerary.schedules[day_index];
    debug!(
        day_number = day.day_number,
        item_index,
        delta,
        "cascading end time change"
    );
    for item in day.items.iter_mut().skip(item_index + 1) {
        shift_item(item, delta)?;
    }

    if let Some(first) = itinerary
        .schedules
        .get_mut(day_index + 1)
        .and_then(|next_day| next_day.items.first_mut())
    {
        shift_item(first, delta)?;
    }

    Ok(())
}

/// Shift both ends of `item` by `delta` minutes. Leaves the item untouched on
/// error.
pub(crate) fn shift_item(item: &mut ScheduleItem, delta: i64) -> Result<()> {
    let start = shift_time(&item.start_time, delta)?;
    let end = shift_time(&item.end_time, delta)?;
    trace!(item_id = %item.id, %start, %end, delta, "shifted item");
    item.start_time = start;
    item.end_time = end;
    Ok(())
}
