//! Itinerary data model.
//!
//! These types mirror the JSON documents the trip application stores per
//! trip, so every struct serializes with camelCase field names. Detail blocks
//! (recommendations, alternatives, optional tours, shopping) are opaque to the
//! engine and are carried through every operation unchanged.
//!
//! Keys the model does not name are kept in each struct's `extra` map, so a
//! document written back out still carries them.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// Keys a stored document carries that the model does not name.
pub type ExtraFields = Map<String, Value>;

// ── Itinerary ───────────────────────────────────────────────────────────────

/// A full multi-day trip schedule.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Itinerary {
    pub trip_info: TripInfo,
    /// Days in trip order. `day_number` values are unique.
    pub schedules: Vec<DaySchedule>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub special_features: Option<Vec<SpecialFeature>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub food_highlights: Option<FoodHighlights>,
    #[serde(flatten)]
    pub extra: ExtraFields,
}

impl Itinerary {
    /// Position of the day with exactly this `day_number` in `schedules`.
    pub fn day_position(&self, day_number: u32) -> Option<usize> {
        self.schedules
            .iter()
            .position(|day| day.day_number == day_number)
    }

    pub fn day(&self, day_number: u32) -> Option<&DaySchedule> {
        self.schedules.iter().find(|day| day.day_number == day_number)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TripInfo {
    pub id: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<String>,
    pub start_date: String,
    pub end_date: String,
    #[serde(default)]
    pub timezone: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub airline: Option<Airline>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub accommodation: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub highlights: Option<Vec<String>>,
    #[serde(flatten)]
    pub extra: ExtraFields,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Airline {
    pub name: String,
    pub mileage: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SpecialFeature {
    pub title: String,
    pub description: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FoodHighlights {
    pub desserts: Vec<String>,
    pub main_dishes: Vec<String>,
    pub drinks: Vec<String>,
}

// ── DaySchedule ─────────────────────────────────────────────────────────────

/// One calendar day of the trip.
///
/// Item order is the source of truth; items are never re-sorted by time.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DaySchedule {
    pub id: String,
    pub date: String,
    /// 1-based, unique within an itinerary.
    pub day_number: u32,
    #[serde(default)]
    pub day_of_week: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub cities: Vec<String>,
    pub items: Vec<ScheduleItem>,
    #[serde(default)]
    pub meals: DayMeals,
    #[serde(flatten)]
    pub extra: ExtraFields,
}

impl DaySchedule {
    pub fn new(id: impl Into<String>, date: impl Into<String>, day_number: u32) -> Self {
        Self {
            id: id.into(),
            date: date.into(),
            day_number,
            ..Self::default()
        }
    }

    pub fn with_items(mut self, items: Vec<ScheduleItem>) -> Self {
        self.items = items;
        self
    }

    pub fn item_position(&self, item_id: &str) -> Option<usize> {
        self.items.iter().position(|item| item.id == item_id)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DayMeals {
    pub breakfast: Meal,
    pub lunch: Meal,
    pub dinner: Meal,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Meal {
    #[serde(rename = "type")]
    pub meal_type: String,
    /// `None` when the key is absent, `Some(None)` for an explicit `null`.
    #[serde(
        default,
        deserialize_with = "present",
        skip_serializing_if = "Option::is_none"
    )]
    pub description: Option<Option<String>>,
}

/// Marks a key as present, so `null` deserializes to `Some(None)`.
fn present<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    T::deserialize(deserializer).map(Some)
}

// ── ScheduleItem ────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemType {
    Meeting,
    Transport,
    Attraction,
    Meal,
    Free,
    Transfer,
    #[default]
    Activity,
    Arrival,
}

impl ItemType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Meeting => "meeting",
            Self::Transport => "transport",
            Self::Attraction => "attraction",
            Self::Meal => "meal",
            Self::Free => "free",
            Self::Transfer => "transfer",
            Self::Activity => "activity",
            Self::Arrival => "arrival",
        }
    }
}

impl fmt::Display for ItemType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ItemType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "meeting" => Ok(Self::Meeting),
            "transport" => Ok(Self::Transport),
            "attraction" => Ok(Self::Attraction),
            "meal" => Ok(Self::Meal),
            "free" => Ok(Self::Free),
            "transfer" => Ok(Self::Transfer),
            "activity" => Ok(Self::Activity),
            "arrival" => Ok(Self::Arrival),
            other => Err(format!("unknown item type: {other}")),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransportType {
    Flight,
    Bus,
    Train,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemStatus {
    #[default]
    Pending,
    InProgress,
    Completed,
}

/// One timed activity within a day.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleItem {
    /// Unique within its day.
    pub id: String,
    /// Wall-clock `HH:mm`.
    pub start_time: String,
    /// Wall-clock `HH:mm`.
    pub end_time: String,
    pub title: String,
    #[serde(rename = "type")]
    pub item_type: ItemType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transport_type: Option<TransportType>,
    pub place_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    pub notes: Option<String>,
    #[serde(default)]
    pub status: ItemStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recommendations: Option<Vec<FreeTimeRecommendation>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alternatives: Option<Vec<AttractionAlternative>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub optional_tour: Option<OptionalTour>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shopping: Option<ShoppingInfo>,
    #[serde(flatten)]
    pub extra: ExtraFields,
}

impl ScheduleItem {
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        start_time: impl Into<String>,
        end_time: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            start_time: start_time.into(),
            end_time: end_time.into(),
            ..Self::default()
        }
    }
}

/// Insertion payload: every [`ScheduleItem`] field except `id` and `status`,
/// which the inserter assigns.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewScheduleItem {
    pub start_time: String,
    pub end_time: String,
    pub title: String,
    #[serde(rename = "type")]
    pub item_type: ItemType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transport_type: Option<TransportType>,
    #[serde(default)]
    pub place_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recommendations: Option<Vec<FreeTimeRecommendation>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alternatives: Option<Vec<AttractionAlternative>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub optional_tour: Option<OptionalTour>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shopping: Option<ShoppingInfo>,
}

impl NewScheduleItem {
    pub fn new(
        title: impl Into<String>,
        start_time: impl Into<String>,
        end_time: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            start_time: start_time.into(),
            end_time: end_time.into(),
            ..Self::default()
        }
    }

    /// Materialize the payload as a pending item with the given id.
    pub fn into_item(self, id: String) -> ScheduleItem {
        ScheduleItem {
            id,
            start_time: self.start_time,
            end_time: self.end_time,
            title: self.title,
            item_type: self.item_type,
            transport_type: self.transport_type,
            place_id: self.place_id,
            location: self.location,
            notes: self.notes,
            status: ItemStatus::Pending,
            recommendations: self.recommendations,
            alternatives: self.alternatives,
            optional_tour: self.optional_tour,
            shopping: self.shopping,
            extra: ExtraFields::new(),
        }
    }
}

// ── Detail blocks ───────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FreeTimeRecommendation {
    pub title: String,
    pub description: String,
    pub location: String,
    pub duration: String,
    pub cost: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AttractionAlternative {
    pub title: String,
    pub description: String,
    pub reason: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OptionalTour {
    pub id: String,
    pub title: String,
    pub description: String,
    pub cost: String,
    pub duration: String,
    /// Where non-participants wait.
    pub waiting_place: String,
    pub waiting_activity: String,
    pub is_guide_accompanied: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShoppingInfo {
    pub id: String,
    pub item: String,
    pub location: String,
    pub duration: String,
    pub refund_policy: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_item_deserializes_from_camel_case_json() {
        let json = r#"{
            "id": "day1-item-1",
            "startTime": "09:00",
            "endTime": "10:30",
            "title": "Colosseum",
            "type": "attraction",
            "placeId": "colosseum",
            "notes": null,
            "status": "in_progress",
            "optionalTour": {
                "id": "t1",
                "title": "Underground",
                "description": "Hypogeum tour",
                "cost": "EUR 24",
                "duration": "1h",
                "waitingPlace": "Arch of Constantine",
                "waitingActivity": "Free time",
                "isGuideAccompanied": true
            }
        }"#;

        let item: ScheduleItem = serde_json::from_str(json).unwrap();
        assert_eq!(item.start_time, "09:00");
        assert_eq!(item.item_type, ItemType::Attraction);
        assert_eq!(item.status, ItemStatus::InProgress);
        assert_eq!(item.place_id.as_deref(), Some("colosseum"));
        assert!(item.optional_tour.unwrap().is_guide_accompanied);
    }

    #[test]
    fn test_item_serializes_nullable_fields_and_skips_absent_blocks() {
        let item = ScheduleItem::new("a", "Walk", "09:00", "10:00");
        let value = serde_json::to_value(&item).unwrap();

        assert_eq!(value["startTime"], "09:00");
        assert_eq!(value["type"], "activity");
        assert_eq!(value["status"], "pending");
        assert!(value["placeId"].is_null());
        assert!(value.get("shopping").is_none());
    }

    #[test]
    fn test_item_type_from_str() {
        assert_eq!("Transfer".parse::<ItemType>().unwrap(), ItemType::Transfer);
        assert!("teleport".parse::<ItemType>().is_err());
    }

    #[test]
    fn test_into_item_marks_pending() {
        let item = NewScheduleItem::new("Lunch", "12:00", "13:00").into_item("x".to_string());
        assert_eq!(item.id, "x");
        assert_eq!(item.status, ItemStatus::Pending);
        assert_eq!(item.title, "Lunch");
    }

    #[test]
    fn test_meal_description_keeps_null_apart_from_missing() {
        let json = r#"{
            "breakfast": { "type": "hotel", "description": null },
            "lunch": { "type": "local", "description": "Carbonara" },
            "dinner": { "type": "free" }
        }"#;

        let meals: DayMeals = serde_json::from_str(json).unwrap();
        assert_eq!(meals.breakfast.description, Some(None));
        assert_eq!(meals.lunch.description, Some(Some("Carbonara".to_string())));
        assert_eq!(meals.dinner.description, None);

        let out = serde_json::to_value(&meals).unwrap();
        let original: Value = serde_json::from_str(json).unwrap();
        assert_eq!(out, original);
    }

    #[test]
    fn test_unknown_keys_survive_round_trip() {
        let json = r#"{
            "tripInfo": {
                "id": "rome",
                "title": "Rome",
                "startDate": "2026-05-01",
                "endDate": "2026-05-02",
                "timezone": "Europe/Rome",
                "coverImage": "rome.jpg"
            },
            "schedules": [{
                "id": "d1",
                "date": "2026-05-01",
                "dayNumber": 1,
                "dayOfWeek": "Fri",
                "title": "Arrival",
                "cities": ["Rome"],
                "weather": { "high": 24 },
                "items": [{
                    "id": "a",
                    "startTime": "09:00",
                    "endTime": "10:00",
                    "title": "Walk",
                    "type": "activity",
                    "placeId": null,
                    "notes": null,
                    "status": "pending",
                    "bookingRef": "X1"
                }],
                "meals": {
                    "breakfast": { "type": "hotel" },
                    "lunch": { "type": "free" },
                    "dinner": { "type": "free" }
                }
            }],
            "version": 3
        }"#;

        let itinerary: Itinerary = serde_json::from_str(json).unwrap();
        assert_eq!(itinerary.extra["version"], 3);
        assert_eq!(itinerary.trip_info.extra["coverImage"], "rome.jpg");
        assert_eq!(itinerary.schedules[0].extra["weather"]["high"], 24);
        assert_eq!(itinerary.schedules[0].items[0].extra["bookingRef"], "X1");
        assert_eq!(itinerary.schedules[0].items[0].item_type, ItemType::Activity);

        let out = serde_json::to_value(&itinerary).unwrap();
        let original: Value = serde_json::from_str(json).unwrap();
        assert_eq!(out, original);
    }

    #[test]
    fn test_day_lookup_is_exact_match() {
        let itinerary = Itinerary {
            schedules: vec![
                DaySchedule::new("d1", "2026-05-01", 1),
                DaySchedule::new("d3", "2026-05-03", 3),
            ],
            ..Itinerary::default()
        };
        assert_eq!(itinerary.day_position(3), Some(1));
        assert!(itinerary.day(2).is_none());
    }
}
