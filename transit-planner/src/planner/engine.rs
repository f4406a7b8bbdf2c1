//! Round-based earliest-arrival search.
//!
//! Each round allows one more vehicle boarding. Only stops whose label
//! improved in the previous round are rescanned, so the work per round is
//! bounded by the routes reachable from that frontier, and the number of
//! rounds bounds the number of boardings in any journey found.

use tracing::{debug, trace};

use super::config::PlannerConfig;
use super::error::{PlanError, StopRole};
use super::labels::{Labels, Predecessor};
use super::reconstruct::reconstruct;
use crate::domain::{Itinerary, Minutes, RouteId, StopId, StopPosition};
use crate::timetable::{Boarding, Timetable};

/// A single planning query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlanRequest {
    pub source: StopId,
    pub target: StopId,
    pub departure: Minutes,
}

impl PlanRequest {
    pub fn new(source: StopId, target: StopId, departure: Minutes) -> Self {
        Self {
            source,
            target,
            departure,
        }
    }

    /// Check both ends of the query exist in `timetable`.
    pub fn validate(&self, timetable: &Timetable) -> Result<(), PlanError> {
        if !timetable.contains_stop(self.source) {
            return Err(PlanError::InvalidStop {
                role: StopRole::Source,
                stop: self.source,
            });
        }
        if !timetable.contains_stop(self.target) {
            return Err(PlanError::InvalidStop {
                role: StopRole::Target,
                stop: self.target,
            });
        }
        Ok(())
    }
}

/// Deduplicated worklist of stops improved during a round.
struct Frontier {
    stops: Vec<StopId>,
    marked: Vec<bool>,
}

impl Frontier {
    fn new(num_stops: usize) -> Self {
        Self {
            stops: Vec::new(),
            marked: vec![false; num_stops],
        }
    }

    fn insert(&mut self, stop: StopId) {
        let Some(flag) = self.marked.get_mut(stop.index()) else {
            return;
        };
        if !*flag {
            *flag = true;
            self.stops.push(stop);
        }
    }

    fn is_empty(&self) -> bool {
        self.stops.is_empty()
    }

    fn len(&self) -> usize {
        self.stops.len()
    }

    /// Hands out the collected stops in insertion order and resets the set.
    fn drain(&mut self) -> Vec<StopId> {
        for stop in &self.stops {
            self.marked[stop.index()] = false;
        }
        std::mem::take(&mut self.stops)
    }
}

/// Earliest-arrival planner over a shared, immutable timetable.
///
/// The engine holds only shared references, so one timetable can serve
/// any number of concurrent engines; each `plan` call owns its labels.
pub struct RaptorEngine<'a> {
    timetable: &'a Timetable,
    config: &'a PlannerConfig,
}

impl<'a> RaptorEngine<'a> {
    pub fn new(timetable: &'a Timetable, config: &'a PlannerConfig) -> Self {
        Self { timetable, config }
    }

    pub fn timetable(&self) -> &'a Timetable {
        self.timetable
    }

    /// Compute earliest arrivals from the request's source.
    ///
    /// An unreached target is not an error: its label is simply `None`.
    pub fn plan(&self, request: &PlanRequest) -> Result<Labels, PlanError> {
        self.plan_with(request, |_, _| {})
    }

    /// Like [`plan`](Self::plan), calling `on_round` with the round index
    /// and the labels after each round.
    pub fn plan_with<F>(&self, request: &PlanRequest, mut on_round: F) -> Result<Labels, PlanError>
    where
        F: FnMut(usize, &Labels),
    {
        request.validate(self.timetable)?;

        let num_stops = self.timetable.num_stops();
        let mut labels = Labels::init(num_stops, request.source, request.departure);
        let mut frontier = vec![request.source];
        let mut next = Frontier::new(num_stops);

        for round in 0..self.config.max_rounds {
            // Floors are fixed when the round starts. A stop improved earlier
            // in this round must wait for the next round to be boarded from,
            // or one round could chain two boardings.
            let floors: Vec<Option<Minutes>> = frontier
                .iter()
                .map(|&stop| labels.boarding_floor(stop))
                .collect();

            for (&stop, floor) in frontier.iter().zip(floors) {
                let Some(floor) = floor else {
                    continue;
                };
                for (route, boardings) in self.timetable.serving(stop) {
                    self.scan_route(stop, floor, route, boardings, &mut labels, &mut next);
                }
            }

            labels.set_rounds_run(round + 1);
            debug!(
                round,
                scanned = frontier.len(),
                improved = next.len(),
                "round complete"
            );
            on_round(round, &labels);

            if next.is_empty() {
                break;
            }
            frontier = next.drain();
        }

        debug!(
            source = %request.source,
            target = %request.target,
            departure = %request.departure,
            rounds = labels.rounds_run(),
            reached = labels.reached_count(),
            target_arrival = ?labels.earliest_arrival(request.target),
            "plan complete"
        );

        Ok(labels)
    }

    /// Plan and reconstruct the itinerary to the target.
    ///
    /// # Errors
    ///
    /// Returns `PlanError::Unreachable` if no journey within the round
    /// bound reaches the target.
    pub fn journey(&self, request: &PlanRequest) -> Result<Itinerary, PlanError> {
        let labels = self.plan(request)?;
        if !labels.is_reached(request.target) {
            return Err(PlanError::Unreachable {
                target: request.target,
            });
        }
        reconstruct(&labels, request.source, request.target, self.timetable)
    }

    /// Relax every trip of `route` boardable at `stop` no earlier than `floor`.
    fn scan_route(
        &self,
        stop: StopId,
        floor: Minutes,
        route: RouteId,
        boardings: &[Boarding],
        labels: &mut Labels,
        next: &mut Frontier,
    ) {
        let start = boardings.partition_point(|b| b.time < floor);

        for boarding in &boardings[start..] {
            let Some(trip) = self.timetable.trip(boarding.trip) else {
                continue;
            };
            let Some(rest) = trip.stop_times().get(boarding.position.0 + 1..) else {
                continue;
            };

            if let Some(following) = rest.first() {
                if following.time <= boarding.time {
                    trace!(
                        trip = trip.name(),
                        route = %route,
                        stop = %stop,
                        board = %boarding.time,
                        next = %following.time,
                        "skipping non-monotonic boarding"
                    );
                    continue;
                }
            }

            for (offset, st) in rest.iter().enumerate() {
                if st.time <= boarding.time {
                    continue;
                }
                let via = Predecessor {
                    trip: boarding.trip,
                    from: stop,
                    board_time: boarding.time,
                    arrival_time: st.time,
                    board_position: boarding.position,
                    alight_position: StopPosition(boarding.position.0 + 1 + offset),
                };
                if labels.improve(st.stop, via) {
                    next.insert(st.stop);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn frontier_deduplicates_in_insertion_order() {
        let mut f = Frontier::new(5);
        f.insert(StopId(3));
        f.insert(StopId(1));
        f.insert(StopId(3));
        f.insert(StopId(9)); // out of range
        assert_eq!(f.len(), 2);

        let drained = f.drain();
        assert_eq!(drained, vec![StopId(3), StopId(1)]);
        assert!(f.is_empty());

        // Marks are reset after draining
        f.insert(StopId(3));
        assert_eq!(f.len(), 1);
    }

    #[test]
    fn request_validation() {
        let mut b = Timetable::builder();
        b.intern_stop("X");
        b.intern_stop("Y");
        let tt = b.build();
        let at = Minutes::from_hm(8, 0);

        assert!(PlanRequest::new(StopId(0), StopId(1), at).validate(&tt).is_ok());

        let err = PlanRequest::new(StopId(2), StopId(1), at)
            .validate(&tt)
            .unwrap_err();
        assert_eq!(
            err,
            PlanError::InvalidStop {
                role: StopRole::Source,
                stop: StopId(2)
            }
        );

        let err = PlanRequest::new(StopId(0), StopId(5), at)
            .validate(&tt)
            .unwrap_err();
        assert_eq!(
            err,
            PlanError::InvalidStop {
                role: StopRole::Target,
                stop: StopId(5)
            }
        );
    }
}
