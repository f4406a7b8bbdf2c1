//! Itinerary types.
//!
//! An `Itinerary` is the planner's answer for one source/target pair: the
//! rides taken in order, each expanded to every stop the vehicle serves
//! between boarding and alighting.

use serde::Serialize;

use super::{DomainError, Minutes, StopId, TripId};

/// One stop served during a ride, with the trip's recorded time there.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Visit {
    pub stop: StopId,
    pub stop_name: String,
    pub time: Minutes,
}

impl Visit {
    pub fn new(stop: StopId, stop_name: impl Into<String>, time: Minutes) -> Self {
        Self {
            stop,
            stop_name: stop_name.into(),
            time,
        }
    }
}

/// A single boarding: one trip from a boarding stop to an alighting stop.
///
/// # Invariants
///
/// - At least two visits (board and alight)
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Ride {
    trip: TripId,
    trip_name: String,
    visits: Vec<Visit>,
}

impl Ride {
    /// Construct a ride from the visits between boarding and alighting, inclusive.
    ///
    /// # Errors
    ///
    /// Returns `Err` if fewer than two visits are given.
    pub fn new(
        trip: TripId,
        trip_name: impl Into<String>,
        visits: Vec<Visit>,
    ) -> Result<Self, DomainError> {
        if visits.len() < 2 {
            return Err(DomainError::RideTooShort(trip));
        }
        Ok(Self {
            trip,
            trip_name: trip_name.into(),
            visits,
        })
    }

    pub fn trip(&self) -> TripId {
        self.trip
    }

    pub fn trip_name(&self) -> &str {
        &self.trip_name
    }

    /// All visits, boarding stop first.
    pub fn visits(&self) -> &[Visit] {
        &self.visits
    }

    pub fn board(&self) -> &Visit {
        &self.visits[0]
    }

    pub fn alight(&self) -> &Visit {
        &self.visits[self.visits.len() - 1]
    }

    /// Minutes spent on board, or `None` if the recorded times go backwards.
    pub fn duration(&self) -> Option<u32> {
        self.alight().time.minutes_since(self.board().time)
    }
}

/// A flattened itinerary record: one stop visit tagged with its trip.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ItineraryStep {
    pub trip: TripId,
    pub trip_name: String,
    pub stop: StopId,
    pub stop_name: String,
    pub time: Minutes,
}

/// A complete itinerary from source to target.
///
/// # Invariants
///
/// - Consecutive rides connect (alighting stop of one = boarding stop of next)
///
/// An empty itinerary is valid and means the source already is the target.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Itinerary {
    rides: Vec<Ride>,
}

impl Itinerary {
    /// Constructs an itinerary from rides in travel order.
    ///
    /// # Errors
    ///
    /// Returns `Err` if consecutive rides don't meet at the same stop.
    pub fn new(rides: Vec<Ride>) -> Result<Self, DomainError> {
        for pair in rides.windows(2) {
            let end = pair[0].alight().stop;
            let start = pair[1].board().stop;
            if end != start {
                return Err(DomainError::RidesNotConnected(end, start));
            }
        }
        Ok(Self { rides })
    }

    pub fn rides(&self) -> &[Ride] {
        &self.rides
    }

    pub fn is_empty(&self) -> bool {
        self.rides.is_empty()
    }

    /// Number of changes between vehicles.
    pub fn transfer_count(&self) -> usize {
        self.rides.len().saturating_sub(1)
    }

    /// Boarding time of the first ride.
    pub fn departure(&self) -> Option<Minutes> {
        self.rides.first().map(|r| r.board().time)
    }

    /// Alighting time of the last ride.
    pub fn arrival(&self) -> Option<Minutes> {
        self.rides.last().map(|r| r.alight().time)
    }

    /// Flattens the rides into the ordered per-stop record sequence.
    ///
    /// Transfer stops appear twice: once as the alighting visit of one ride
    /// and once as the boarding visit of the next.
    pub fn steps(&self) -> Vec<ItineraryStep> {
        self.rides
            .iter()
            .flat_map(|ride| {
                ride.visits.iter().map(move |visit| ItineraryStep {
                    trip: ride.trip,
                    trip_name: ride.trip_name.clone(),
                    stop: visit.stop,
                    stop_name: visit.stop_name.clone(),
                    time: visit.time,
                })
            })
            .collect()
    }
}
