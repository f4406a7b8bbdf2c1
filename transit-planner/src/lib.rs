//! Earliest-arrival transit journey planner.
//!
//! Loads a timetable of trips, then answers: "leaving this stop at this
//! time, what is the earliest I can reach that stop, and on which trips?"

pub mod domain;
pub mod ingest;
pub mod planner;
pub mod timetable;
