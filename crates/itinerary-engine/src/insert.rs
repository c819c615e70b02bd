//! Inserting new items into a day.
//!
//! The inserter never fails. It places the item after an anchor (or at the
//! end of the day), shrinks an overlapping predecessor, and pushes later
//! items of the same day forward when the new item runs into them.

use chrono::Utc;
use tracing::{debug, warn};

use crate::cascade::shift_item;
use crate::model::{DaySchedule, Itinerary, NewScheduleItem, ScheduleItem};
use crate::time::time_to_minutes;

// ── Id generation ───────────────────────────────────────────────────────────

/// Source of the numeric stamp in generated item ids.
///
/// Item ids take the form `{dayId}-item-{stamp}`. Production code uses
/// [`SystemClock`]; tests inject [`SequentialStamps`] or a closure for
/// deterministic ids.
pub trait IdGenerator {
    fn next_stamp(&mut self) -> i64;
}

impl<F> IdGenerator for F
where
    F: FnMut() -> i64,
{
    fn next_stamp(&mut self) -> i64 {
        (*self)()
    }
}

/// Wall-clock milliseconds, bumped when two calls land in the same
/// millisecond so stamps stay unique.
#[derive(Debug, Clone, Default)]
pub struct SystemClock {
    last: i64,
}

impl IdGenerator for SystemClock {
    fn next_stamp(&mut self) -> i64 {
        let now = Utc::now().timestamp_millis();
        self.last = now.max(self.last + 1);
        self.last
    }
}

/// A counter: `start`, `start + 1`, ...
#[derive(Debug, Clone)]
pub struct SequentialStamps {
    next: i64,
}

impl SequentialStamps {
    pub fn starting_at(start: i64) -> Self {
        Self { next: start }
    }
}

impl IdGenerator for SequentialStamps {
    fn next_stamp(&mut self) -> i64 {
        let stamp = self.next;
        self.next += 1;
        stamp
    }
}

// ── insert_schedule_item ────────────────────────────────────────────────────

/// Insert `new_item` into the day with `day_number`.
///
/// # Behavior
///
/// - Unknown `day_number`: returns a copy of the input.
/// - The item gets id `{day.id}-item-{stamp}` and status `pending`.
/// - Position: right after `insert_after_item_id` when it names an item of
///   the day, otherwise at the end of the day.
/// - If the predecessor ends after the new item starts, the predecessor's end
///   is cut back to the new start. The new item is never shrunk.
/// - If the new item ends after the item currently at the insertion position
///   starts, that item and every later item of the same day move forward by
///   the overlap. Other days are not touched.
///
/// Items whose stored times cannot be parsed are left as they are.
///
/// # Examples
///
/// ```
/// use itinerary_engine::{
///     insert_schedule_item, DaySchedule, Itinerary, NewScheduleItem, ScheduleItem,
///     SequentialStamps,
/// };
///
/// let day = DaySchedule::new("d1", "2026-05-01", 1).with_items(vec![
///     ScheduleItem::new("a", "Breakfast", "08:00", "09:00"),
///     ScheduleItem::new("b", "Museum", "09:00", "11:00"),
/// ]);
/// let itinerary = Itinerary { schedules: vec![day], ..Itinerary::default() };
/// let mut ids = SequentialStamps::starting_at(1);
///
/// let coffee = NewScheduleItem::new("Coffee", "09:00", "09:30");
/// let updated = insert_schedule_item(&itinerary, 1, coffee, Some("a"), &mut ids);
///
/// let items = &updated.schedules[0].items;
/// assert_eq!(items[1].id, "d1-item-1");
/// assert_eq!(items[2].start_time, "09:30");
/// ```
pub fn insert_schedule_item<G>(
    itinerary: &Itinerary,
    day_number: u32,
    new_item: NewScheduleItem,
    insert_after_item_id: Option<&str>,
    ids: &mut G,
) -> Itinerary
where
    G: IdGenerator + ?Sized,
{
    let Some(day_index) = itinerary.day_position(day_number) else {
        debug!(day_number, "insert_schedule_item: no such day, leaving itinerary unchanged");
        return itinerary.clone();
    };

    let mut updated = itinerary.clone();
    let day = &mut updated.schedules[day_index];

    let item = new_item.into_item(format!("{}-item-{}", day.id, ids.next_stamp()));
    let index = insertion_index(day, insert_after_item_id);
    debug!(day_number, item_id = %item.id, index, "inserting schedule item");

    make_room(&mut day.items, index, &item);
    day.items.insert(index, item);

    updated
}

// ── Internal helpers ────────────────────────────────────────────────────────

fn insertion_index(day: &DaySchedule, insert_after_item_id: Option<&str>) -> usize {
    insert_after_item_id
        .filter(|id| !id.is_empty())
        .and_then(|id| day.item_position(id))
        .map_or(day.items.len(), |anchor| anchor + 1)
}

/// Resolve overlaps around `index` before `new_item` is spliced in there.
fn make_room(items: &mut [ScheduleItem], index: usize, new_item: &ScheduleItem) {
    if let (Ok(new_start), Some(previous)) = (
        time_to_minutes(&new_item.start_time),
        index.checked_sub(1).and_then(|i| items.get_mut(i)),
    ) {
        if time_to_minutes(&previous.end_time).is_ok_and(|end| new_start < end) {
            debug!(item_id = %previous.id, end = %new_item.start_time, "clamping predecessor end");
            previous.end_time = new_item.start_time.clone();
        }
    }

    let Ok(new_end) = time_to_minutes(&new_item.end_time) else {
        return;
    };
    let Some(Ok(next_start)) = items.get(index).map(|next| time_to_minutes(&next.start_time))
    else {
        return;
    };
    if new_end <= next_start {
        return;
    }

    let overlap = new_end - next_start;
    debug!(index, overlap, "pushing following items forward");
    for item in &mut items[index..] {
        if let Err(err) = shift_item(item, overlap) {
            warn!(item_id = %item.id, %err, "left item with unparsable time in place");
        }
    }
}
