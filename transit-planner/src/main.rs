use std::path::PathBuf;
use std::process::ExitCode;

use chrono::Local;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use transit_planner::domain::{Itinerary, Minutes};
use transit_planner::ingest::{LoadError, load_csv};
use transit_planner::planner::{PlanError, PlanRequest, PlannerConfig, RaptorEngine};
use transit_planner::timetable::Timetable;

/// Plan the earliest-arriving journey through a CSV timetable.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Cli {
    /// Timetable CSV, one trip per row
    timetable: PathBuf,

    /// Stop to leave from
    #[arg(long, required_unless_present = "list_stops")]
    from: Option<String>,

    /// Stop to reach
    #[arg(long, required_unless_present = "list_stops")]
    to: Option<String>,

    /// Earliest departure, as HH:MM; defaults to the current local time
    #[arg(long)]
    depart: Option<Minutes>,

    /// Maximum number of vehicle boardings
    #[arg(long, env = "TRANSIT_MAX_ROUNDS")]
    max_rounds: Option<usize>,

    /// Planner settings as JSON; --max-rounds takes precedence
    #[arg(long, env = "TRANSIT_CONFIG")]
    config: Option<PathBuf>,

    /// Print the itinerary as JSON
    #[arg(long)]
    json: bool,

    /// Print every stop name and exit
    #[arg(long)]
    list_stops: bool,
}

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error(transparent)]
    Load(#[from] LoadError),

    #[error(transparent)]
    Plan(#[from] PlanError),

    #[error("unknown stop {0:?}; use --list-stops to see available names")]
    UnknownStop(String),

    #[error("missing argument {0}")]
    MissingArgument(&'static str),

    #[error("cannot read config: {0}")]
    ConfigIo(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

fn main() -> ExitCode {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    match run(Cli::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), CliError> {
    let (timetable, _report) = load_csv(&cli.timetable)?;

    if cli.list_stops {
        for name in timetable.stop_names() {
            println!("{name}");
        }
        return Ok(());
    }

    let config = planner_config(&cli)?;
    let source = lookup(&timetable, cli.from.as_deref(), "--from")?;
    let target = lookup(&timetable, cli.to.as_deref(), "--to")?;
    let departure = cli
        .depart
        .unwrap_or_else(|| Minutes::from_naive_time(Local::now().time()));

    let engine = RaptorEngine::new(&timetable, &config);
    let itinerary = engine.journey(&PlanRequest::new(source, target, departure))?;

    if cli.json {
        let out = serde_json::json!({
            "departure": departure,
            "arrival": itinerary.arrival(),
            "transfers": itinerary.transfer_count(),
            "steps": itinerary.steps(),
        });
        println!("{}", serde_json::to_string_pretty(&out)?);
    } else {
        print_itinerary(&timetable, &itinerary, departure);
    }
    Ok(())
}

fn planner_config(cli: &Cli) -> Result<PlannerConfig, CliError> {
    let mut config = match &cli.config {
        Some(path) => PlannerConfig::from_json(&std::fs::read_to_string(path)?)?,
        None => PlannerConfig::default(),
    };
    if let Some(max_rounds) = cli.max_rounds {
        config.max_rounds = max_rounds;
    }
    Ok(config)
}

fn lookup(
    timetable: &Timetable,
    name: Option<&str>,
    flag: &'static str,
) -> Result<transit_planner::domain::StopId, CliError> {
    let name = name.ok_or(CliError::MissingArgument(flag))?;
    timetable
        .find_stop(name)
        .ok_or_else(|| CliError::UnknownStop(name.to_string()))
}

fn print_itinerary(timetable: &Timetable, itinerary: &Itinerary, departure: Minutes) {
    if itinerary.is_empty() {
        println!("Already there at {departure}.");
        return;
    }

    for ride in itinerary.rides() {
        let board = ride.board();
        let alight = ride.alight();
        let route = timetable
            .trip(ride.trip())
            .and_then(|trip| timetable.route_name(trip.route()))
            .unwrap_or("?");
        println!(
            "{}  board {} (route {route}) at {}",
            board.time,
            ride.trip_name(),
            board.stop_name
        );
        for visit in &ride.visits()[1..ride.visits().len() - 1] {
            println!("{}    {}", visit.time, visit.stop_name);
        }
        println!("{}  alight at {}", alight.time, alight.stop_name);
    }

    if let Some(arrival) = itinerary.arrival() {
        println!(
            "Arrive {arrival} with {} transfer(s).",
            itinerary.transfer_count()
        );
    }
}
