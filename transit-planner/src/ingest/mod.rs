//! Loading timetables from wide CSV files.
//!
//! Each row is one trip. The columns `trip_id`, `day_type`, `direction`
//! and `route` describe the trip; every other column is a stop, and its
//! cell holds the `HH:MM` time the trip serves that stop (empty when the
//! trip does not stop there).
//!
//! ```text
//! trip_id,day_type,direction,route,Alpha,Beta,Gamma
//! 101,Weekday,outbound,R1,08:00,08:10,08:20
//! 102,Weekday,inbound,R1,09:20,09:10,09:00
//! ```
//!
//! Inbound rows list times against the same column order as outbound
//! ones, so they are reversed on load: every trip is stored in the order
//! it actually runs.

mod error;

pub use error::LoadError;

use std::fs::File;
use std::io::Read;
use std::path::Path;

use csv::StringRecord;
use tracing::{debug, info, warn};

use crate::domain::to_minutes;
use crate::timetable::{StopTime, Timetable, TimetableBuilder};

const TRIP_ID: &str = "trip_id";
const DAY_TYPE: &str = "day_type";
const DIRECTION: &str = "direction";
const ROUTE: &str = "route";

/// Counts gathered while loading, for logging and diagnostics.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadReport {
    /// Data rows read, skipped ones included
    pub rows: usize,
    pub stops: usize,
    pub routes: usize,
    pub trips: usize,
    /// Cells whose text was not a valid `HH:MM` time
    pub skipped_cells: usize,
    /// Rows with no trip id or no usable times
    pub skipped_rows: usize,
}

/// Load a timetable from the CSV file at `path`.
pub fn load_csv(path: impl AsRef<Path>) -> Result<(Timetable, LoadReport), LoadError> {
    let path = path.as_ref();
    info!(path = %path.display(), "loading timetable");
    let file = File::open(path)?;
    load_from_reader(file)
}

/// Load a timetable from any CSV source.
///
/// # Errors
///
/// Fails on unreadable input, a missing descriptive column, or two rows
/// naming the same trip on the same day type. Unparseable time cells are
/// logged and skipped instead.
pub fn load_from_reader<R: Read>(reader: R) -> Result<(Timetable, LoadReport), LoadError> {
    let mut rdr = csv::ReaderBuilder::new().flexible(true).from_reader(reader);
    let headers = rdr.headers()?.clone();
    let columns = Columns::locate(&headers)?;

    let mut builder = Timetable::builder();
    let mut report = LoadReport::default();

    for record in rdr.records() {
        let record = record?;
        report.rows += 1;
        load_row(&record, &headers, &columns, &mut builder, &mut report)?;
    }

    let timetable = builder.build();
    report.stops = timetable.num_stops();
    report.routes = timetable.num_routes();
    report.trips = timetable.num_trips();

    info!(
        stops = report.stops,
        routes = report.routes,
        trips = report.trips,
        skipped_cells = report.skipped_cells,
        skipped_rows = report.skipped_rows,
        "timetable loaded"
    );

    Ok((timetable, report))
}

/// Indices of the descriptive columns; every other column is a stop.
struct Columns {
    trip_id: usize,
    day_type: usize,
    direction: usize,
    route: usize,
}

impl Columns {
    fn locate(headers: &StringRecord) -> Result<Self, LoadError> {
        let find = |name: &'static str| {
            headers
                .iter()
                .position(|h| h.trim() == name)
                .ok_or(LoadError::MissingColumn(name))
        };

        Ok(Self {
            trip_id: find(TRIP_ID)?,
            day_type: find(DAY_TYPE)?,
            direction: find(DIRECTION)?,
            route: find(ROUTE)?,
        })
    }

    fn is_stop(&self, index: usize) -> bool {
        ![self.trip_id, self.day_type, self.direction, self.route].contains(&index)
    }
}

fn load_row(
    record: &StringRecord,
    headers: &StringRecord,
    columns: &Columns,
    builder: &mut TimetableBuilder,
    report: &mut LoadReport,
) -> Result<(), LoadError> {
    let field = |index: usize| record.get(index).unwrap_or("").trim();

    let base_id = field(columns.trip_id);
    if base_id.is_empty() {
        warn!(row = report.rows, "skipping row without a trip id");
        report.skipped_rows += 1;
        return Ok(());
    }
    let name = trip_name(base_id, field(columns.day_type));

    let mut stop_times = Vec::new();
    for (index, header) in headers.iter().enumerate() {
        if !columns.is_stop(index) {
            continue;
        }
        let cell = field(index);
        if cell.is_empty() {
            continue;
        }

        let stop = builder.intern_stop(header.trim());
        match to_minutes(cell) {
            Ok(time) => stop_times.push(StopTime::new(stop, time)),
            Err(err) => {
                warn!(trip = %name, stop = header.trim(), cell, %err, "skipping unparseable time");
                report.skipped_cells += 1;
            }
        }
    }

    if stop_times.is_empty() {
        warn!(trip = %name, "skipping trip with no usable times");
        report.skipped_rows += 1;
        return Ok(());
    }

    if field(columns.direction).eq_ignore_ascii_case("inbound") {
        stop_times.reverse();
    }

    let route = builder.intern_route(field(columns.route));
    debug!(trip = %name, stops = stop_times.len(), "loaded trip");
    builder.add_trip(name, route, stop_times)?;
    Ok(())
}

/// Trip ids repeat across day types, so the day type is folded in:
/// `101` running on "Saturday and Sunday" becomes `101_SATURDAY_AND_SUNDAY`.
fn trip_name(base_id: &str, day_type: &str) -> String {
    let day_type = day_type
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("_")
        .to_uppercase();
    format!("{base_id}_{day_type}")
}
