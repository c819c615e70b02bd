//! # itinerary-engine
//!
//! Deterministic schedule time reconciliation for trip itineraries.
//!
//! The engine edits a schedule item's start or end time, propagates the
//! resulting shift through the rest of the day and into the first item of the
//! next day, and inserts new items while resolving overlaps with their
//! neighbours. Every operation takes an itinerary by reference and returns a
//! new value; nothing here performs I/O.
//!
//! ## Modules
//!
//! - [`time`] — `"HH:mm"` ↔ minute-of-day codec and validation
//! - [`adjust`] — Conflict-free start/end pair for a proposed start time
//! - [`cascade`] — Item time updates and shift propagation
//! - [`insert`] — Item insertion with neighbour overlap resolution
//! - [`conflict`] — Detect overlapping items within a day
//! - [`trip`] — Trip list status and current-trip selection
//! - [`model`] — Itinerary, day and item types
//! - [`error`] — Error types

pub mod adjust;
pub mod cascade;
pub mod conflict;
pub mod error;
pub mod insert;
pub mod model;
pub mod time;
pub mod trip;

pub use adjust::{adjust_item_times, adjust_item_times_with_options, EngineOptions, TimeRange};
pub use cascade::{adjust_subsequent_items, update_item_time, update_item_time_with_options};
pub use conflict::{find_conflicts, find_day_conflicts, ItemConflict};
pub use error::ItineraryError;
pub use insert::{insert_schedule_item, IdGenerator, SequentialStamps, SystemClock};
pub use model::{
    DaySchedule, ExtraFields, ItemStatus, ItemType, Itinerary, NewScheduleItem, ScheduleItem, TransportType,
    TripInfo,
};
pub use time::{is_valid_time, minutes_to_time, time_to_minutes};
pub use trip::{trip_status, TripMeta, TripStatus, TripsData};
