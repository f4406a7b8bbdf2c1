//! Timetable assembly.
//!
//! Stop ids are handed out by the builder in first-seen order, so there is
//! no shared counter: each builder owns its own id space and `build()`
//! freezes it into an immutable [`Timetable`].

use std::collections::HashMap;

use tracing::debug;

use super::{Boarding, Route, ServingRoute, StopTime, Timetable, TimetableError, Trip};
use crate::domain::{Minutes, RouteId, StopId, StopPosition, TripId};

/// Incrementally collects stops, routes and trips.
///
/// # Examples
///
/// ```
/// use transit_planner::timetable::Timetable;
///
/// let mut builder = Timetable::builder();
/// let x = builder.intern_stop("X");
/// let y = builder.intern_stop("Y");
/// let route = builder.intern_route("R1");
/// builder
///     .add_trip_clock("T1", route, &[(x, "08:00"), (y, "08:10")])
///     .unwrap();
///
/// let timetable = builder.build();
/// assert_eq!(timetable.num_stops(), 2);
/// assert_eq!(timetable.routes_at(x).count(), 1);
/// ```
#[derive(Debug, Default)]
pub struct TimetableBuilder {
    stop_names: Vec<String>,
    stop_lookup: HashMap<String, StopId>,
    route_names: Vec<String>,
    route_lookup: HashMap<String, RouteId>,
    trips: Vec<Trip>,
    trip_lookup: HashMap<String, TripId>,
}

impl TimetableBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the id for a stop name, assigning the next free id on first sight.
    pub fn intern_stop(&mut self, name: &str) -> StopId {
        if let Some(id) = self.stop_lookup.get(name) {
            return *id;
        }
        let id = StopId::from_index(self.stop_names.len());
        self.stop_names.push(name.to_string());
        self.stop_lookup.insert(name.to_string(), id);
        id
    }

    /// Returns the id for a route name, registering it on first sight.
    pub fn intern_route(&mut self, name: &str) -> RouteId {
        if let Some(id) = self.route_lookup.get(name) {
            return *id;
        }
        let id = RouteId::from_index(self.route_names.len());
        self.route_names.push(name.to_string());
        self.route_lookup.insert(name.to_string(), id);
        id
    }

    /// Number of stops interned so far.
    pub fn num_stops(&self) -> usize {
        self.stop_names.len()
    }

    /// Add a trip whose stop times are already in canonical forward order.
    ///
    /// # Errors
    ///
    /// Returns `Err` if:
    /// - The route or any stop was not interned by this builder
    /// - The trip has no stop times
    /// - A trip with the same name already exists
    pub fn add_trip(
        &mut self,
        name: impl Into<String>,
        route: RouteId,
        stop_times: Vec<StopTime>,
    ) -> Result<TripId, TimetableError> {
        let name = name.into();

        if route.index() >= self.route_names.len() {
            return Err(TimetableError::UnknownRoute(route));
        }
        if stop_times.is_empty() {
            return Err(TimetableError::EmptyTrip(name));
        }
        if let Some(st) = stop_times
            .iter()
            .find(|st| st.stop.index() >= self.stop_names.len())
        {
            return Err(TimetableError::UnknownStop(st.stop));
        }
        if self.trip_lookup.contains_key(&name) {
            return Err(TimetableError::DuplicateTrip(name));
        }

        let id = TripId::from_index(self.trips.len());
        self.trip_lookup.insert(name.clone(), id);
        self.trips.push(Trip {
            name,
            route,
            stop_times,
        });
        Ok(id)
    }

    /// Add a trip from `(stop, "HH:MM")` pairs.
    pub fn add_trip_clock(
        &mut self,
        name: impl Into<String>,
        route: RouteId,
        times: &[(StopId, &str)],
    ) -> Result<TripId, TimetableError> {
        let stop_times = times
            .iter()
            .map(|(stop, text)| -> Result<StopTime, TimetableError> {
                Ok(StopTime::new(*stop, Minutes::parse_hhmm(text)?))
            })
            .collect::<Result<Vec<_>, _>>()?;
        self.add_trip(name, route, stop_times)
    }

    /// Freeze the collected data and derive the lookup indices.
    pub fn build(self) -> Timetable {
        let mut routes: Vec<Route> = self
            .route_names
            .into_iter()
            .map(|name| Route {
                name,
                stops: Vec::new(),
                trips: Vec::new(),
            })
            .collect();

        let mut serving: Vec<Vec<ServingRoute>> = vec![Vec::new(); self.stop_names.len()];

        for (idx, trip) in self.trips.iter().enumerate() {
            let trip_id = TripId::from_index(idx);
            let route = &mut routes[trip.route.index()];
            route.trips.push(trip_id);

            for (pos, st) in trip.stop_times.iter().enumerate() {
                if !route.stops.contains(&st.stop) {
                    route.stops.push(st.stop);
                }

                let at_stop = &mut serving[st.stop.index()];
                let slot = match at_stop.iter().position(|s| s.route == trip.route) {
                    Some(slot) => slot,
                    None => {
                        at_stop.push(ServingRoute {
                            route: trip.route,
                            boardings: Vec::new(),
                        });
                        at_stop.len() - 1
                    }
                };
                at_stop[slot].boardings.push(Boarding {
                    trip: trip_id,
                    position: StopPosition(pos),
                    time: st.time,
                });
            }
        }

        // Stable enumeration order for the planner: earliest boarding first,
        // ties broken by trip id, then by position within the trip.
        for entry in serving.iter_mut().flatten() {
            entry
                .boardings
                .sort_by_key(|b| (b.time, b.trip, b.position));
        }

        debug!(
            stops = self.stop_names.len(),
            routes = routes.len(),
            trips = self.trips.len(),
            "timetable built"
        );

        Timetable {
            stop_names: self.stop_names,
            stop_lookup: self.stop_lookup,
            routes,
            trips: self.trips,
            serving,
        }
    }
}
