//! Domain types for the transit planner.
//!
//! This module contains the value types shared by the timetable, the
//! planning engine and its callers. All types enforce their invariants at
//! construction time, so code that receives these types can trust their
//! validity.

mod error;
mod ids;
mod itinerary;
mod time;

pub use error::DomainError;
pub use ids::{RouteId, StopId, StopPosition, TripId};
pub use itinerary::{Itinerary, ItineraryStep, Ride, Visit};
pub use time::{MINUTES_PER_DAY, Minutes, TimeFormatError, to_clock, to_minutes};
