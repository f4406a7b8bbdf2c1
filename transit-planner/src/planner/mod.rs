//! Earliest-arrival journey planner.
//!
//! This module implements the round-based planning algorithm that answers:
//! "leaving this stop at this time, when is the earliest I can be at every
//! other stop, and which boardings get me to my destination that soon?"
//!
//! Each round allows one more vehicle boarding; the configured round bound
//! caps the number of boardings in any journey found.

mod config;
mod engine;
mod error;
mod labels;
mod reconstruct;


pub use config::{DEFAULT_MAX_ROUNDS, PlannerConfig};
pub use engine::{PlanRequest, RaptorEngine};
pub use error::{PlanError, StopRole};
pub use labels::{Labels, Predecessor};
pub use reconstruct::reconstruct;
