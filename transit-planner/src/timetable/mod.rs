//! Read-only timetable tables consumed by the planner.
//!
//! A `Timetable` is produced once by [`TimetableBuilder`] and never mutated
//! afterwards, so any number of planning runs may share it without locking.
//! Every table is a `Vec` indexed by the dense [`StopId`], [`RouteId`] and
//! [`TripId`] values handed out by the builder.

mod builder;
mod error;

pub use builder::TimetableBuilder;
pub use error::TimetableError;

use std::collections::HashMap;

use crate::domain::{Minutes, RouteId, StopId, StopPosition, TripId};

/// A trip's recorded time at one stop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StopTime {
    pub stop: StopId,
    pub time: Minutes,
}

impl StopTime {
    pub fn new(stop: StopId, time: Minutes) -> Self {
        Self { stop, time }
    }
}

/// One scheduled vehicle run.
///
/// Stop times are stored in the route's canonical forward order. They are
/// not guaranteed to be increasing in time; the planner skips segments that
/// go backwards.
#[derive(Debug, Clone)]
pub struct Trip {
    name: String,
    route: RouteId,
    stop_times: Vec<StopTime>,
}

impl Trip {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn route(&self) -> RouteId {
        self.route
    }

    pub fn stop_times(&self) -> &[StopTime] {
        &self.stop_times
    }
}

/// A family of trips sharing one canonical forward stop order.
#[derive(Debug, Clone)]
pub struct Route {
    name: String,
    stops: Vec<StopId>,
    trips: Vec<TripId>,
}

impl Route {
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Stops served by any trip of this route, in forward order of first appearance.
    pub fn stops(&self) -> &[StopId] {
        &self.stops
    }

    /// Trips on this route, in the order they were added.
    pub fn trips(&self) -> &[TripId] {
        &self.trips
    }
}

/// A place where a trip can be boarded: the trip, the position of the
/// boarding stop within it, and the recorded time there.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Boarding {
    pub trip: TripId,
    pub position: StopPosition,
    pub time: Minutes,
}

/// All boardings of one route at one stop, sorted by `(time, trip, position)`.
#[derive(Debug, Clone)]
struct ServingRoute {
    route: RouteId,
    boardings: Vec<Boarding>,
}

/// Immutable timetable: stops, routes, trips and the derived stop→routes index.
#[derive(Debug, Clone)]
pub struct Timetable {
    stop_names: Vec<String>,
    stop_lookup: HashMap<String, StopId>,
    routes: Vec<Route>,
    trips: Vec<Trip>,
    /// Indexed by stop; routes in order of first appearance at that stop.
    serving: Vec<Vec<ServingRoute>>,
}

impl Timetable {
    /// Returns a builder for assembling a timetable.
    pub fn builder() -> TimetableBuilder {
        TimetableBuilder::new()
    }

    pub fn num_stops(&self) -> usize {
        self.stop_names.len()
    }

    pub fn num_routes(&self) -> usize {
        self.routes.len()
    }

    pub fn num_trips(&self) -> usize {
        self.trips.len()
    }

    /// Check whether a stop id belongs to this timetable.
    pub fn contains_stop(&self, stop: StopId) -> bool {
        stop.index() < self.stop_names.len()
    }

    /// Look up a stop's name by id.
    pub fn stop_name(&self, stop: StopId) -> Option<&str> {
        self.stop_names.get(stop.index()).map(String::as_str)
    }

    /// Find a stop by name.
    ///
    /// Tries an exact match first, then a trimmed case-insensitive one.
    pub fn find_stop(&self, name: &str) -> Option<StopId> {
        if let Some(id) = self.stop_lookup.get(name) {
            return Some(*id);
        }
        let wanted = name.trim();
        self.stop_names
            .iter()
            .position(|candidate| candidate.trim().eq_ignore_ascii_case(wanted))
            .map(StopId::from_index)
    }

    /// All stop names, sorted alphabetically.
    pub fn stop_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.stop_names.iter().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn route(&self, route: RouteId) -> Option<&Route> {
        self.routes.get(route.index())
    }

    pub fn trip(&self, trip: TripId) -> Option<&Trip> {
        self.trips.get(trip.index())
    }

    /// Look up a trip's name by id.
    pub fn trip_name(&self, trip: TripId) -> Option<&str> {
        self.trip(trip).map(Trip::name)
    }

    /// Look up a route's name by id.
    pub fn route_name(&self, route: RouteId) -> Option<&str> {
        self.route(route).map(Route::name)
    }

    /// Routes with at least one trip visiting `stop`.
    pub fn routes_at(&self, stop: StopId) -> impl Iterator<Item = RouteId> + '_ {
        self.serving_at(stop).iter().map(|s| s.route)
    }

    /// Trips belonging to a route; empty for unknown routes.
    pub fn trips_of(&self, route: RouteId) -> &[TripId] {
        self.route(route).map(Route::trips).unwrap_or(&[])
    }

    /// Boardings of `route` at `stop`, earliest first.
    pub fn boardings(&self, stop: StopId, route: RouteId) -> &[Boarding] {
        self.serving_at(stop)
            .iter()
            .find(|s| s.route == route)
            .map(|s| s.boardings.as_slice())
            .unwrap_or(&[])
    }

    /// Every route serving `stop` together with its boardings there.
    ///
    /// This is the planner's hot-path lookup: one slice index, no hashing.
    pub fn serving(&self, stop: StopId) -> impl Iterator<Item = (RouteId, &[Boarding])> + '_ {
        self.serving_at(stop)
            .iter()
            .map(|s| (s.route, s.boardings.as_slice()))
    }

    fn serving_at(&self, stop: StopId) -> &[ServingRoute] {
        self.serving
            .get(stop.index())
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn t(s: &str) -> Minutes {
        Minutes::parse_hhmm(s).unwrap()
    }

    /// Two routes sharing stop Y.
    fn sample() -> Timetable {
        let mut b = Timetable::builder();
        let x = b.intern_stop("X");
        let y = b.intern_stop("Y");
        let z = b.intern_stop("Z");
        let r1 = b.intern_route("R1");
        let r2 = b.intern_route("R2");

        b.add_trip("late", r1, vec![StopTime::new(x, t("09:00")), StopTime::new(y, t("09:10"))])
            .unwrap();
        b.add_trip("early", r1, vec![StopTime::new(x, t("08:00")), StopTime::new(y, t("08:10"))])
            .unwrap();
        b.add_trip("onward", r2, vec![StopTime::new(y, t("08:20")), StopTime::new(z, t("08:40"))])
            .unwrap();
        b.build()
    }

    #[test]
    fn counts() {
        let tt = sample();
        assert_eq!(tt.num_stops(), 3);
        assert_eq!(tt.num_routes(), 2);
        assert_eq!(tt.num_trips(), 3);
    }

    #[test]
    fn stop_lookup() {
        let tt = sample();
        assert_eq!(tt.find_stop("Y"), Some(StopId(1)));
        assert_eq!(tt.find_stop(" y "), Some(StopId(1)));
        assert_eq!(tt.find_stop("Nowhere"), None);
        assert_eq!(tt.stop_name(StopId(2)), Some("Z"));
        assert_eq!(tt.stop_name(StopId(3)), None);
        assert!(tt.contains_stop(StopId(2)));
        assert!(!tt.contains_stop(StopId(3)));
    }

    #[test]
    fn routes_at_shared_stop() {
        let tt = sample();
        let routes: Vec<RouteId> = tt.routes_at(StopId(1)).collect();
        assert_eq!(routes, vec![RouteId(0), RouteId(1)]);

        let routes: Vec<RouteId> = tt.routes_at(StopId(0)).collect();
        assert_eq!(routes, vec![RouteId(0)]);

        assert_eq!(tt.routes_at(StopId(99)).count(), 0);
    }

    #[test]
    fn boardings_sorted_by_time() {
        let tt = sample();
        let boardings = tt.boardings(StopId(0), RouteId(0));
        let names: Vec<&str> = boardings
            .iter()
            .map(|b| tt.trip_name(b.trip).unwrap())
            .collect();
        assert_eq!(names, vec!["early", "late"]);
        assert!(boardings.windows(2).all(|w| w[0].time <= w[1].time));

        assert!(tt.boardings(StopId(0), RouteId(1)).is_empty());
    }

    #[test]
    fn trips_of_route() {
        let tt = sample();
        assert_eq!(tt.trips_of(RouteId(0)), &[TripId(0), TripId(1)]);
        assert_eq!(tt.trips_of(RouteId(1)), &[TripId(2)]);
        assert!(tt.trips_of(RouteId(7)).is_empty());
    }

    #[test]
    fn trip_stop_times() {
        let tt = sample();
        let trip = tt.trip(TripId(2)).unwrap();
        assert_eq!(trip.route(), RouteId(1));
        assert_eq!(tt.route_name(trip.route()), Some("R2"));
        let stops: Vec<StopId> = trip.stop_times().iter().map(|st| st.stop).collect();
        assert_eq!(stops, vec![StopId(1), StopId(2)]);
        assert_eq!(trip.stop_times()[0].time, t("08:20"));
    }

    #[test]
    fn sorted_stop_names() {
        let mut b = Timetable::builder();
        b.intern_stop("Observatory");
        b.intern_stop("Adderley");
        b.intern_stop("Mowbray");
        let tt = b.build();
        assert_eq!(tt.stop_names(), vec!["Adderley", "Mowbray", "Observatory"]);
    }
}
