//! Trip list metadata: date-derived status and current-trip selection.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{ItineraryError, Result};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TripStatus {
    #[default]
    Upcoming,
    Ongoing,
    Completed,
}

/// Summary entry in the trip list.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TripMeta {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub subtitle: String,
    #[serde(default)]
    pub thumbnail: String,
    pub start_date: String,
    pub end_date: String,
    #[serde(default)]
    pub countries: Vec<String>,
    #[serde(default)]
    pub status: TripStatus,
}

impl TripMeta {
    /// Status of this trip as seen on `today`.
    pub fn status_on(&self, today: NaiveDate) -> Result<TripStatus> {
        trip_status(&self.start_date, &self.end_date, today)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TripsData {
    pub trips: Vec<TripMeta>,
    pub default_trip_id: String,
}

impl TripsData {
    /// The trips with `status` recomputed for `today`.
    ///
    /// # Errors
    ///
    /// Returns [`ItineraryError::InvalidDate`] for the first trip whose dates
    /// are not `YYYY-MM-DD`.
    pub fn with_status(&self, today: NaiveDate) -> Result<Vec<TripMeta>> {
        self.trips
            .iter()
            .map(|trip| {
                Ok(TripMeta {
                    status: trip.status_on(today)?,
                    ..trip.clone()
                })
            })
            .collect()
    }

    /// Pick the current trip: `saved` when it names a known trip, otherwise
    /// the default trip.
    pub fn resolve_current<'a>(&'a self, saved: Option<&'a str>) -> &'a str {
        saved
            .filter(|id| self.trips.iter().any(|trip| trip.id == *id))
            .unwrap_or(self.default_trip_id.as_str())
    }
}

/// Classify a trip relative to `today`.
///
/// Before the start date the trip is upcoming, after the end date it is
/// completed, and on any day from start to end inclusive it is ongoing.
///
/// # Errors
///
/// Returns [`ItineraryError::InvalidDate`] if either date is not `YYYY-MM-DD`.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use itinerary_engine::trip::{trip_status, TripStatus};
///
/// let today = NaiveDate::from_ymd_opt(2026, 5, 3).unwrap();
/// assert_eq!(trip_status("2026-05-01", "2026-05-08", today).unwrap(), TripStatus::Ongoing);
/// ```
pub fn trip_status(start_date: &str, end_date: &str, today: NaiveDate) -> Result<TripStatus> {
    let start = parse_date(start_date)?;
    let end = parse_date(end_date)?;

    Ok(if today < start {
        TripStatus::Upcoming
    } else if today > end {
        TripStatus::Completed
    } else {
        TripStatus::Ongoing
    })
}

fn parse_date(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .map_err(|_| ItineraryError::InvalidDate(s.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn trips() -> TripsData {
        TripsData {
            trips: vec![
                TripMeta {
                    id: "italy-2026".to_string(),
                    title: "Italy".to_string(),
                    start_date: "2026-05-01".to_string(),
                    end_date: "2026-05-08".to_string(),
                    ..TripMeta::default()
                },
                TripMeta {
                    id: "japan-2025".to_string(),
                    title: "Japan".to_string(),
                    start_date: "2025-10-01".to_string(),
                    end_date: "2025-10-10".to_string(),
                    ..TripMeta::default()
                },
            ],
            default_trip_id: "italy-2026".to_string(),
        }
    }

    #[test]
    fn test_status_before_during_after() {
        assert_eq!(
            trip_status("2026-05-01", "2026-05-08", date(2026, 4, 30)).unwrap(),
            TripStatus::Upcoming
        );
        assert_eq!(
            trip_status("2026-05-01", "2026-05-08", date(2026, 5, 4)).unwrap(),
            TripStatus::Ongoing
        );
        assert_eq!(
            trip_status("2026-05-01", "2026-05-08", date(2026, 5, 9)).unwrap(),
            TripStatus::Completed
        );
    }

    #[test]
    fn test_start_and_end_days_are_ongoing() {
        assert_eq!(
            trip_status("2026-05-01", "2026-05-08", date(2026, 5, 1)).unwrap(),
            TripStatus::Ongoing
        );
        assert_eq!(
            trip_status("2026-05-01", "2026-05-08", date(2026, 5, 8)).unwrap(),
            TripStatus::Ongoing
        );
    }

    #[test]
    fn test_invalid_date_returns_error() {
        let err = trip_status("May 1", "2026-05-08", date(2026, 5, 1)).unwrap_err();
        assert_eq!(err, ItineraryError::InvalidDate("May 1".to_string()));
    }

    #[test]
    fn test_with_status_recomputes_every_trip() {
        let statuses: Vec<TripStatus> = trips()
            .with_status(date(2026, 5, 2))
            .unwrap()
            .into_iter()
            .map(|trip| trip.status)
            .collect();
        assert_eq!(statuses, vec![TripStatus::Ongoing, TripStatus::Completed]);
    }

    #[test]
    fn test_resolve_current_prefers_known_saved_trip() {
        let data = trips();
        assert_eq!(data.resolve_current(Some("japan-2025")), "japan-2025");
        assert_eq!(data.resolve_current(Some("mars-2099")), "italy-2026");
        assert_eq!(data.resolve_current(None), "italy-2026");
    }
}
