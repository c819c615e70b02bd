//! `itinerary` — edit trip itinerary schedules from the command line.
//!
//! Reads an itinerary JSON document (from `--input` or stdin), applies one
//! engine operation, and writes the resulting document to `--output` or
//! stdout. Logs go to stderr; set `RUST_LOG=debug` to see lookup misses and
//! cascade deltas.

use std::fs;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{bail, Context, Result};
use chrono::{Local, NaiveDate};
use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use itinerary_engine::adjust::{DEFAULT_ITEM_DURATION_MINUTES, MAX_ITEM_DURATION_MINUTES};
use itinerary_engine::time::{is_valid_time, time_to_minutes};
use itinerary_engine::{
    find_conflicts, insert_schedule_item, update_item_time_with_options, EngineOptions, ItemType,
    Itinerary, NewScheduleItem, SystemClock, TripsData,
};

#[derive(Parser)]
#[command(
    name = "itinerary",
    version,
    about = "Edit trip itinerary schedules with cascading time adjustment"
)]
struct Cli {
    /// Input JSON file (reads stdin when omitted or "-")
    #[arg(short, long, global = true)]
    input: Option<PathBuf>,

    /// Output file (writes stdout when omitted)
    #[arg(short, long, global = true)]
    output: Option<PathBuf>,

    /// Emit compact JSON instead of pretty-printed
    #[arg(long, global = true)]
    compact: bool,

    /// Minutes an item is extended to when a start edit would empty it (1-1439)
    #[arg(
        long,
        global = true,
        default_value_t = DEFAULT_ITEM_DURATION_MINUTES,
        value_parser = clap::value_parser!(i64).range(1..=MAX_ITEM_DURATION_MINUTES)
    )]
    default_duration: i64,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Change an item's start and/or end time, cascading end-time changes
    Update {
        /// Day number (1-based)
        #[arg(long)]
        day: u32,
        /// Item id
        #[arg(long)]
        item: String,
        /// New start time (HH:mm)
        #[arg(long)]
        start: Option<String>,
        /// New end time (HH:mm)
        #[arg(long)]
        end: Option<String>,
    },
    /// Insert a new item, resolving overlaps with its neighbours
    Insert {
        /// Day number (1-based)
        #[arg(long)]
        day: u32,
        /// Insert after this item id (end of day when omitted or unknown)
        #[arg(long)]
        after: Option<String>,
        #[arg(long)]
        start: String,
        #[arg(long)]
        end: String,
        #[arg(long)]
        title: String,
        /// meeting, transport, attraction, meal, free, transfer, activity, arrival
        #[arg(long = "type", default_value = "activity")]
        item_type: ItemType,
        #[arg(long)]
        place: Option<String>,
        #[arg(long)]
        location: Option<String>,
        #[arg(long)]
        notes: Option<String>,
    },
    /// List overlapping items in a day
    Conflicts {
        #[arg(long)]
        day: u32,
    },
    /// Check that a time is valid HH:mm
    CheckTime { time: String },
    /// Show trip statuses from a trips list document
    Trips {
        /// Reference date (YYYY-MM-DD), defaults to today
        #[arg(long)]
        today: Option<NaiveDate>,
        /// Previously selected trip id
        #[arg(long)]
        saved: Option<String>,
    },
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct TripsReport {
    current_trip_id: String,
    trips: Vec<itinerary_engine::TripMeta>,
}

fn main() -> ExitCode {
    init_logging();

    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn init_logging() {
    FmtSubscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .with_target(true)
        .init();
}

fn run(cli: Cli) -> Result<()> {
    let options = EngineOptions {
        default_duration_minutes: cli.default_duration,
    };

    match cli.command {
        Commands::Update {
            day,
            item,
            start,
            end,
        } => {
            let itinerary = load_itinerary(cli.input.as_deref())?;
            let updated = update_item_time_with_options(
                &itinerary,
                day,
                &item,
                start.as_deref(),
                end.as_deref(),
                &options,
            )
            .with_context(|| format!("failed to update item {item} on day {day}"))?;

            if updated == itinerary {
                warn!(day, item = %item, "no change applied; check the day and item id");
            } else {
                info!(day, item = %item, "item time updated");
            }
            write_json(&updated, cli.output.as_deref(), cli.compact)
        }
        Commands::Insert {
            day,
            after,
            start,
            end,
            title,
            item_type,
            place,
            location,
            notes,
        } => {
            let itinerary = load_itinerary(cli.input.as_deref())?;
            let new_item = NewScheduleItem {
                item_type,
                place_id: place,
                location,
                notes,
                ..NewScheduleItem::new(title, start, end)
            };
            let updated = insert_schedule_item(
                &itinerary,
                day,
                new_item,
                after.as_deref(),
                &mut SystemClock::default(),
            );
            if updated == itinerary {
                warn!(day, "day not found; itinerary left unchanged");
            }

            write_json(&updated, cli.output.as_deref(), cli.compact)
        }
        Commands::Conflicts { day } => {
            let itinerary = load_itinerary(cli.input.as_deref())?;
            let conflicts = find_conflicts(&itinerary, day);
            write_json(&conflicts, cli.output.as_deref(), cli.compact)
        }
        Commands::CheckTime { time } => {
            if !is_valid_time(&time) {
                bail!("invalid time {time:?}: expected HH:mm (00:00 to 23:59)");
            }
            println!("{time} is valid ({} minutes after midnight)", time_to_minutes(&time)?);
            Ok(())
        }
        Commands::Trips { today, saved } => {
            let input = read_input(cli.input.as_deref())?;
            let data: TripsData =
                serde_json::from_str(&input).context("failed to parse trips document")?;
            let today = today.unwrap_or_else(|| Local::now().date_naive());

            let report = TripsReport {
                current_trip_id: data.resolve_current(saved.as_deref()).to_string(),
                trips: data.with_status(today)?,
            };
            write_json(&report, cli.output.as_deref(), cli.compact)
        }
    }
}

// ── I/O helpers ─────────────────────────────────────────────────────────────

fn read_input(path: Option<&Path>) -> Result<String> {
    match path {
        Some(p) if p != Path::new("-") => {
            fs::read_to_string(p).with_context(|| format!("failed to read {}", p.display()))
        }
        _ => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("failed to read stdin")?;
            Ok(buf)
        }
    }
}

fn load_itinerary(path: Option<&Path>) -> Result<Itinerary> {
    let input = read_input(path)?;
    serde_json::from_str(&input).context("failed to parse itinerary document")
}

fn write_json<T: Serialize>(value: &T, path: Option<&Path>, compact: bool) -> Result<()> {
    let mut text = if compact {
        serde_json::to_string(value)?
    } else {
        serde_json::to_string_pretty(value)?
    };
    text.push('\n');

    match path {
        Some(p) => fs::write(p, text).with_context(|| format!("failed to write {}", p.display())),
        None => {
            io::stdout()
                .write_all(text.as_bytes())
                .context("failed to write stdout")
        }
    }
}
