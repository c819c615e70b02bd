//! Start-time adjustment for a single schedule item.
//!
//! When a user proposes a new start time, [`adjust_item_times`] returns a
//! start/end pair that neither inverts the item nor overlaps the preceding
//! item. The result is a plain pair; callers write it back onto the item.

use serde::{Deserialize, Serialize};

use crate::error::{ItineraryError, Result};
use crate::model::ScheduleItem;
use crate::time::{minutes_to_time, time_to_minutes, MINUTES_PER_DAY};

/// Duration given to an item whose proposed start lands at or after its end.
pub const DEFAULT_ITEM_DURATION_MINUTES: i64 = 60;

/// Longest accepted `default_duration_minutes`.
pub const MAX_ITEM_DURATION_MINUTES: i64 = MINUTES_PER_DAY - 1;

/// Tunables for the time engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EngineOptions {
    /// Length an item is extended to when a start edit would make it empty.
    pub default_duration_minutes: i64,
}

impl EngineOptions {
    /// Check that the default duration is positive and shorter than a day.
    ///
    /// # Errors
    ///
    /// Returns [`ItineraryError::InvalidDuration`] unless
    /// `default_duration_minutes` is in `1..=1439`.
    pub fn validate(&self) -> Result<()> {
        if (1..=MAX_ITEM_DURATION_MINUTES).contains(&self.default_duration_minutes) {
            Ok(())
        } else {
            Err(ItineraryError::InvalidDuration(self.default_duration_minutes))
        }
    }
}

impl Default for EngineOptions {
    fn default() -> Self {
        Self {
            default_duration_minutes: DEFAULT_ITEM_DURATION_MINUTES,
        }
    }
}

/// A start/end pair in `HH:mm` form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeRange {
    pub start_time: String,
    pub end_time: String,
}

/// Compute a conflict-free start/end pair for `item` given a proposed start.
///
/// Uses the default one-hour extension. See
/// [`adjust_item_times_with_options`].
pub fn adjust_item_times(
    item: &ScheduleItem,
    new_start_time: &str,
    previous_item_end_time: Option<&str>,
) -> Result<TimeRange> {
    adjust_item_times_with_options(
        item,
        new_start_time,
        previous_item_end_time,
        &EngineOptions::default(),
    )
}

/// Compute a conflict-free start/end pair for `item` given a proposed start.
///
/// Rules, first match wins:
///
/// 1. Proposed start at or after the current end: keep the start and extend
///    the end to `start + default_duration_minutes`.
/// 2. Proposed start before `previous_item_end_time`: snap the start to the
///    previous end and keep the current end.
/// 3. Otherwise accept the proposed start and keep the current end.
///
/// # Errors
///
/// Returns [`ItineraryError::InvalidTimeFormat`] when one of the times cannot
/// be parsed at all. Callers are expected to validate `new_start_time` with
/// [`crate::time::is_valid_time`] first. Returns
/// [`ItineraryError::InvalidDuration`] when `options` fails
/// [`EngineOptions::validate`].
///
/// # Examples
///
/// ```
/// use itinerary_engine::{adjust_item_times, ScheduleItem};
///
/// let item = ScheduleItem::new("a", "Museum", "09:00", "10:00");
/// let range = adjust_item_times(&item, "10:30", None).unwrap();
/// assert_eq!(range.start_time, "10:30");
/// assert_eq!(range.end_time, "11:30");
/// ```
pub fn adjust_item_times_with_options(
    item: &ScheduleItem,
    new_start_time: &str,
    previous_item_end_time: Option<&str>,
    options: &EngineOptions,
) -> Result<TimeRange> {
    options.validate()?;
    let new_start = time_to_minutes(new_start_time)?;
    let current_end = time_to_minutes(&item.end_time)?;

    if new_start >= current_end {
        return Ok(TimeRange {
            start_time: new_start_time.to_string(),
            end_time: minutes_to_time(new_start + options.default_duration_minutes),
        });
    }

    if let Some(previous_end_time) = previous_item_end_time {
        if new_start < time_to_minutes(previous_end_time)? {
            return Ok(TimeRange {
                start_time: previous_end_time.to_string(),
                end_time: item.end_time.clone(),
            });
        }
    }

    Ok(TimeRange {
        start_time: new_start_time.to_string(),
        end_time: item.end_time.clone(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(start: &str, end: &str) -> ScheduleItem {
        ScheduleItem::new("item", "Item", start, end)
    }

    #[test]
    fn test_start_after_end_extends_by_one_hour() {
        let range = adjust_item_times(&item("09:00", "10:00"), "10:30", None).unwrap();
        assert_eq!(range.start_time, "10:30");
        assert_eq!(range.end_time, "11:30");
    }

    #[test]
    fn test_start_equal_to_end_extends() {
        let range = adjust_item_times(&item("09:00", "10:00"), "10:00", Some("08:00")).unwrap();
        assert_eq!(range.start_time, "10:00");
        assert_eq!(range.end_time, "11:00");
    }

    #[test]
    fn test_overlap_with_previous_clamps_to_previous_end() {
        let range = adjust_item_times(&item("09:30", "11:00"), "08:30", Some("09:00")).unwrap();
        assert_eq!(range.start_time, "09:00");
        assert_eq!(range.end_time, "11:00");
    }

    #[test]
    fn test_start_at_previous_end_is_accepted() {
        let range = adjust_item_times(&item("09:30", "11:00"), "09:00", Some("09:00")).unwrap();
        assert_eq!(range.start_time, "09:00");
        assert_eq!(range.end_time, "11:00");
    }

    #[test]
    fn test_free_start_is_accepted_unchanged() {
        let range = adjust_item_times(&item("09:30", "11:00"), "10:15", None).unwrap();
        assert_eq!(range.start_time, "10:15");
        assert_eq!(range.end_time, "11:00");
    }

    #[test]
    fn test_extension_wraps_past_midnight() {
        let range = adjust_item_times(&item("22:00", "23:00"), "23:30", None).unwrap();
        assert_eq!(range.end_time, "00:30");
    }

    #[test]
    fn test_custom_default_duration() {
        let options = EngineOptions {
            default_duration_minutes: 15,
        };
        let range =
            adjust_item_times_with_options(&item("09:00", "10:00"), "10:30", None, &options)
                .unwrap();
        assert_eq!(range.end_time, "10:45");
    }

    #[test]
    fn test_out_of_range_duration_is_rejected() {
        for minutes in [0, -30, MAX_ITEM_DURATION_MINUTES + 1, i64::MAX] {
            let options = EngineOptions {
                default_duration_minutes: minutes,
            };
            let result =
                adjust_item_times_with_options(&item("09:00", "10:00"), "10:30", None, &options);
            assert_eq!(result, Err(ItineraryError::InvalidDuration(minutes)));
        }
    }

    #[test]
    fn test_longest_duration_is_accepted() {
        let options = EngineOptions {
            default_duration_minutes: MAX_ITEM_DURATION_MINUTES,
        };
        let range =
            adjust_item_times_with_options(&item("09:00", "10:00"), "10:30", None, &options)
                .unwrap();
        assert_eq!(range.end_time, "10:29");
    }

    #[test]
    fn test_unparsable_stored_end_is_an_error() {
        let result = adjust_item_times(&item("09:00", "soon"), "09:30", None);
        assert!(result.is_err());
        let err = result.unwrap_err().to_string();
        assert!(err.contains("Invalid time format"), "got: {err}");
    }
}
