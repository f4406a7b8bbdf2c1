//! Per-run label state.
//!
//! Each planning run owns a fresh `Labels` table: the best known arrival
//! at every stop and the boarding that achieved it. Nothing here is shared
//! between runs or threads.

use crate::domain::{Minutes, StopId, StopPosition, TripId};

/// How the current best arrival at a stop was achieved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Predecessor {
    /// Trip ridden to reach the stop.
    pub trip: TripId,
    /// Stop where that trip was boarded.
    pub from: StopId,
    /// Recorded time at the boarding stop.
    pub board_time: Minutes,
    /// Recorded time at the stop this label belongs to.
    pub arrival_time: Minutes,
    /// Position of the boarding stop within the trip.
    pub board_position: StopPosition,
    /// Position of the alighting stop within the trip.
    pub alight_position: StopPosition,
}

/// Earliest-arrival and predecessor tables for one planning run.
///
/// # Invariants
///
/// - The source's arrival is the requested departure and it has no predecessor
/// - A stop has a predecessor iff its arrival was improved at least once
/// - Arrivals only ever decrease
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Labels {
    source: StopId,
    departure: Minutes,
    earliest_arrival: Vec<Option<Minutes>>,
    predecessor: Vec<Option<Predecessor>>,
    rounds_run: usize,
}

impl Labels {
    /// Seed labels: the source at `departure`, every other stop unreached.
    pub(crate) fn init(num_stops: usize, source: StopId, departure: Minutes) -> Self {
        let mut earliest_arrival = vec![None; num_stops];
        if let Some(slot) = earliest_arrival.get_mut(source.index()) {
            *slot = Some(departure);
        }

        Self {
            source,
            departure,
            earliest_arrival,
            predecessor: vec![None; num_stops],
            rounds_run: 0,
        }
    }

    pub fn source(&self) -> StopId {
        self.source
    }

    pub fn departure(&self) -> Minutes {
        self.departure
    }

    pub fn num_stops(&self) -> usize {
        self.earliest_arrival.len()
    }

    /// Earliest known arrival at `stop`; `None` means unreached.
    pub fn earliest_arrival(&self, stop: StopId) -> Option<Minutes> {
        self.earliest_arrival.get(stop.index()).copied().flatten()
    }

    pub fn predecessor(&self, stop: StopId) -> Option<&Predecessor> {
        self.predecessor.get(stop.index()).and_then(Option::as_ref)
    }

    pub fn is_reached(&self, stop: StopId) -> bool {
        self.earliest_arrival(stop).is_some()
    }

    /// Whole earliest-arrival table, indexed by stop.
    pub fn earliest_arrivals(&self) -> &[Option<Minutes>] {
        &self.earliest_arrival
    }

    /// Whole predecessor table, indexed by stop.
    pub fn predecessors(&self) -> &[Option<Predecessor>] {
        &self.predecessor
    }

    /// Number of relaxation rounds performed.
    pub fn rounds_run(&self) -> usize {
        self.rounds_run
    }

    /// Number of stops with a known arrival, the source included.
    pub fn reached_count(&self) -> usize {
        self.earliest_arrival.iter().filter(|a| a.is_some()).count()
    }

    /// Earliest time a traveller can board at `stop`.
    ///
    /// The source is compared against the requested departure; every
    /// other stop against its own arrival label. The engine reads this once
    /// per frontier stop at the start of each round.
    pub(crate) fn boarding_floor(&self, stop: StopId) -> Option<Minutes> {
        if stop == self.source {
            Some(self.departure)
        } else {
            self.earliest_arrival(stop)
        }
    }

    /// Record `via` as the way to reach its alighting stop if it arrives
    /// strictly earlier than the current label. Ties keep the existing label.
    ///
    /// Returns whether the label improved.
    pub(crate) fn improve(&mut self, stop: StopId, via: Predecessor) -> bool {
        let Some(current) = self.earliest_arrival.get_mut(stop.index()) else {
            return false;
        };
        if current.is_some_and(|best| via.arrival_time >= best) {
            return false;
        }

        debug_assert!(
            via.arrival_time > via.board_time,
            "{:?} must arrive after boarding at {:?}",
            via.trip,
            via.from
        );

        *current = Some(via.arrival_time);
        self.predecessor[stop.index()] = Some(via);
        true
    }

    pub(crate) fn set_rounds_run(&mut self, rounds: usize) {
        self.rounds_run = rounds;
    }
}
