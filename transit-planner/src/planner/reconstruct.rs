//! Itinerary reconstruction from predecessor labels.

use tracing::trace;

use super::error::{PlanError, StopRole};
use super::labels::Labels;
use crate::domain::{Itinerary, Ride, StopId, Visit};
use crate::timetable::Timetable;

/// Walk the predecessor chain from `target` back to `source` and expand
/// each boarding into every stop served between boarding and alighting.
///
/// The target must have been reached: check [`Labels::is_reached`] first,
/// or use [`RaptorEngine::journey`](super::RaptorEngine::journey), which
/// does both steps. A target equal to the source yields an empty itinerary.
///
/// Visits are the trip's recorded stop times between boarding and
/// alighting, copied as they are. A stop the engine could not alight at
/// because its time is not after boarding still appears, so a trip with
/// out-of-order data gives an itinerary whose times go backwards there.
///
/// # Errors
///
/// - `InvalidStop` if either stop is not in the timetable
/// - `Unreachable` if the target has no arrival label
/// - `BrokenChain` if the labels don't match the timetable
pub fn reconstruct(
    labels: &Labels,
    source: StopId,
    target: StopId,
    timetable: &Timetable,
) -> Result<Itinerary, PlanError> {
    if !timetable.contains_stop(source) {
        return Err(PlanError::InvalidStop {
            role: StopRole::Source,
            stop: source,
        });
    }
    if !timetable.contains_stop(target) {
        return Err(PlanError::InvalidStop {
            role: StopRole::Target,
            stop: target,
        });
    }
    if !labels.is_reached(target) {
        return Err(PlanError::Unreachable { target });
    }

    let mut rides = Vec::new();
    let mut current = target;

    while current != source {
        // Arrivals strictly decrease along a valid chain, so it can't be
        // longer than the number of stops.
        if rides.len() >= timetable.num_stops() {
            return Err(PlanError::BrokenChain { stop: current });
        }

        let broken = || PlanError::BrokenChain { stop: current };
        let step = labels.predecessor(current).ok_or_else(broken)?;
        let trip = timetable.trip(step.trip).ok_or_else(broken)?;
        let stop_times = trip
            .stop_times()
            .get(step.board_position.0..=step.alight_position.0)
            .ok_or_else(broken)?;

        let boards_at_from = stop_times.first().is_some_and(|st| st.stop == step.from);
        let alights_here = stop_times.last().is_some_and(|st| st.stop == current);
        if !boards_at_from || !alights_here {
            return Err(broken());
        }

        let visits = stop_times
            .iter()
            .map(|st| -> Result<Visit, PlanError> {
                let name = timetable.stop_name(st.stop).ok_or_else(broken)?;
                Ok(Visit::new(st.stop, name, st.time))
            })
            .collect::<Result<Vec<_>, _>>()?;

        trace!(
            trip = trip.name(),
            from = %step.from,
            to = %current,
            stops = visits.len(),
            "expanded ride"
        );

        rides.push(Ride::new(step.trip, trip.name(), visits)?);
        current = step.from;
    }

    rides.reverse();
    Ok(Itinerary::new(rides)?)
}
