//! Dense integer identifiers.
//!
//! Stops, routes and trips are numbered `0..n` in the order the timetable
//! builder first saw them, so every per-entity table in the planner is a
//! plain `Vec` indexed by these ids.

use std::fmt;

use serde::Serialize;

macro_rules! dense_id {
    ($(#[$meta:meta])* $name:ident, $prefix:literal) => {
        $(#[$meta])*
        #[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
        #[serde(transparent)]
        pub struct $name(pub u32);

        impl $name {
            /// Returns the id as a table index.
            pub fn index(self) -> usize {
                self.0 as usize
            }

            /// Builds an id from a table index.
            ///
            /// # Panics
            ///
            /// Panics if `index` does not fit in a `u32`.
            pub fn from_index(index: usize) -> Self {
                Self(u32::try_from(index).expect(concat!(stringify!($name), " overflow")))
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, concat!($prefix, "{}"), self.0)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

dense_id!(
    /// Identifier of a stop, unique per distinct stop name.
    ///
    /// # Examples
    ///
    /// ```
    /// use transit_planner::domain::StopId;
    ///
    /// let stop = StopId(3);
    /// assert_eq!(stop.index(), 3);
    /// assert_eq!(format!("{stop:?}"), "S3");
    /// ```
    StopId,
    "S"
);

dense_id!(
    /// Identifier of a route: a family of trips sharing one forward stop order.
    RouteId,
    "R"
);

dense_id!(
    /// Identifier of a single scheduled vehicle run.
    TripId,
    "T"
);

/// Position of a stop time within a trip's ordered sequence.
///
/// Used instead of `StopId` to disambiguate trips that visit the same stop
/// more than once (loop services).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct StopPosition(pub usize);

impl fmt::Display for StopPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn index_roundtrip() {
        assert_eq!(StopId::from_index(7), StopId(7));
        assert_eq!(RouteId(2).index(), 2);
        assert_eq!(TripId::from_index(0).index(), 0);
    }

    #[test]
    fn debug_uses_prefix() {
        assert_eq!(format!("{:?}", StopId(1)), "S1");
        assert_eq!(format!("{:?}", RouteId(4)), "R4");
        assert_eq!(format!("{:?}", TripId(9)), "T9");
    }

    #[test]
    fn display_is_bare_number() {
        assert_eq!(StopId(12).to_string(), "12");
        assert_eq!(StopPosition(3).to_string(), "3");
    }

    #[test]
    fn ids_serialize_as_numbers() {
        assert_eq!(serde_json::to_string(&TripId(5)).unwrap(), "5");
        assert_eq!(serde_json::to_string(&StopPosition(2)).unwrap(), "2");
    }
}
