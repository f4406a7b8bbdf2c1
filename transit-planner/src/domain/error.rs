//! Domain error types.
//!
//! These errors represent validation failures when assembling itinerary
//! values. They are distinct from planning and I/O errors.

use super::{StopId, TripId};

/// Domain-level errors for validation and data consistency.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DomainError {
    /// A ride must board at one stop and alight at a later one
    #[error("ride on trip {0} must visit at least two stops")]
    RideTooShort(TripId),

    /// Consecutive rides must meet at the same stop
    #[error("ride ending at stop {0} does not connect to ride starting at stop {1}")]
    RidesNotConnected(StopId, StopId),
}
