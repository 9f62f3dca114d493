//! `slots` CLI — print open meeting slots for a list of existing appointments.
//!
//! ## Usage
//!
//! ```sh
//! # Full grid for one day (payload from stdin)
//! curl -s localhost:3000/api/appointments | slots grid --date 2021-03-03
//!
//! # Tweak the meeting shape
//! slots grid -i appointments.json --date 2021-03-03 --duration 90 --interval 15 --hours 08:00-18:00
//!
//! # A week, in a given timezone, text output, open slots only
//! slots grid -i appointments.json --from-date 2021-03-01 --to-date 2021-03-08 \
//!   --timezone Europe/Berlin --format text --only-available
//!
//! # First open slot in a range
//! slots next -i appointments.json --from-date 2021-03-01 --to-date 2021-03-08
//!
//! # Settings from a TOML file (flags still override it)
//! slots grid -c schedule.toml -i appointments.json --date 2021-03-03
//! ```

mod config;
mod output;

use std::io::{self, Read};
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use chrono::{Duration, NaiveDate};
use chrono_tz::Tz;
use clap::{Args, Parser, Subcommand};
use slot_engine::{AvailabilityRequest, DayWindow, DstPolicy};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::FileConfig;
use crate::output::Format;

#[derive(Parser)]
#[command(
    name = "slots",
    version,
    about = "Compute bookable meeting slots around existing appointments"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Log debug output to stderr (RUST_LOG overrides)
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the full slot grid, available and busy
    Grid {
        #[command(flatten)]
        schedule: ScheduleArgs,
        /// Leave busy slots out of the output
        #[arg(long)]
        only_available: bool,
    },
    /// Print the first available slot in the range
    Next {
        #[command(flatten)]
        schedule: ScheduleArgs,
    },
}

#[derive(Args)]
struct ScheduleArgs {
    /// Appointment payload (reads from stdin if omitted)
    #[arg(short, long)]
    input: Option<PathBuf>,
    /// Output file (writes to stdout if omitted)
    #[arg(short, long)]
    output: Option<PathBuf>,
    /// TOML schedule file
    #[arg(short, long)]
    config: Option<PathBuf>,
    /// Single day to compute (YYYY-MM-DD)
    #[arg(long, conflicts_with_all = ["from_date", "to_date"])]
    date: Option<NaiveDate>,
    /// First day of the range (YYYY-MM-DD)
    #[arg(long)]
    from_date: Option<NaiveDate>,
    /// Day after the last day of the range (exclusive, defaults to from-date + 1)
    #[arg(long, requires = "from_date")]
    to_date: Option<NaiveDate>,
    /// Meeting duration in minutes
    #[arg(long)]
    duration: Option<u32>,
    /// Minutes between candidate start times
    #[arg(long)]
    interval: Option<u32>,
    /// Working hours, e.g. 09:00-17:00
    #[arg(long)]
    hours: Option<String>,
    /// Apply --hours to every day instead of Monday-Friday
    #[arg(long, requires = "hours")]
    all_days: bool,
    /// IANA timezone for days and working hours
    #[arg(long)]
    timezone: Option<String>,
    /// How to place working hours that fall in a DST gap (skip, shift-forward)
    #[arg(long)]
    dst_policy: Option<DstPolicy>,
    /// Output format
    #[arg(long, value_enum, default_value = "json")]
    format: Format,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logger(cli.verbose);

    match cli.command {
        Commands::Grid {
            schedule,
            only_available,
        } => {
            let request = build_request(&schedule)?;
            let result = slot_engine::compute_availability(&request)
                .context("Failed to compute availability")?;
            tracing::info!(
                days = result.day_count(),
                available = result.available_slots().count(),
                "computed slot grid"
            );
            let rendered = output::render(&result, schedule.format, only_available)?;
            write_output(schedule.output.as_ref(), &rendered)?;
        }
        Commands::Next { schedule } => {
            let request = build_request(&schedule)?;
            let result = slot_engine::compute_availability(&request)
                .context("Failed to compute availability")?;
            let Some(slot) = result.first_available() else {
                bail!(
                    "No available slot between {} and {}",
                    request.range_start,
                    request.range_end
                );
            };
            let rendered = output::render_one(&result, slot, schedule.format)?;
            write_output(schedule.output.as_ref(), &rendered)?;
        }
    }

    Ok(())
}

fn init_logger(verbose: bool) {
    let default = if verbose {
        "slot_engine=debug,slots=debug,info"
    } else {
        "slot_engine=info,slots=info"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(io::stderr)
                .with_target(false)
                .compact(),
        )
        .init();
}

/// Merge flags over the config file over built-in defaults, then read the
/// appointment payload.
fn build_request(args: &ScheduleArgs) -> Result<AvailabilityRequest> {
    let file = match &args.config {
        Some(path) => FileConfig::load(path)?,
        None => FileConfig::default(),
    };

    let (range_start, range_end) = date_range(args)?;
    let duration = args
        .duration
        .or(file.duration)
        .unwrap_or(config::DEFAULT_DURATION);
    let interval = args
        .interval
        .or(file.interval)
        .unwrap_or(config::DEFAULT_INTERVAL);

    let day_window = match &args.hours {
        Some(raw) => {
            let hours = config::parse_hours(raw)?;
            let base = file.day_window()?.unwrap_or_default();
            if args.all_days {
                base.with_all_days(hours)
            } else {
                base.with_weekdays(hours)
            }
        }
        None => match file.day_window()? {
            Some(window) => window,
            None => DayWindow::new().with_weekdays(config::parse_hours(config::DEFAULT_HOURS)?),
        },
    };

    let timezone: Tz = match args.timezone.as_deref().or(file.timezone.as_deref()) {
        Some(name) => name
            .parse()
            .map_err(|_| slot_engine::SlotError::InvalidTimezone(name.to_string()))?,
        None => Tz::UTC,
    };
    let dst_policy = args.dst_policy.or(file.dst_policy).unwrap_or_default();

    let payload = read_input(args.input.as_ref())?;
    let appointments =
        slot_engine::parse_payload(&payload).context("Failed to decode appointment payload")?;
    let busy = slot_engine::busy_intervals(&appointments)
        .context("Failed to read appointment times")?;

    tracing::debug!(
        %range_start, %range_end, duration, interval, %timezone, busy = busy.len(),
        "built availability request"
    );

    let request = AvailabilityRequest::new(range_start, range_end, duration, interval, day_window)?
        .with_busy(busy)?
        .with_timezone(timezone)
        .with_dst_policy(dst_policy);
    Ok(request)
}

fn date_range(args: &ScheduleArgs) -> Result<(NaiveDate, NaiveDate)> {
    let start = match (args.date, args.from_date) {
        (Some(date), _) | (None, Some(date)) => date,
        (None, None) => bail!("One of --date or --from-date is required"),
    };
    let end = match args.to_date {
        Some(end) => end,
        None => start
            .checked_add_signed(Duration::days(1))
            .context("Date out of range")?,
    };
    Ok((start, end))
}

fn read_input(path: Option<&PathBuf>) -> Result<String> {
    match path {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read file: {}", path.display())),
        None => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read from stdin")?;
            Ok(buf)
        }
    }
}

fn write_output(path: Option<&PathBuf>, content: &str) -> Result<()> {
    match path {
        Some(path) => {
            std::fs::write(path, content)
                .with_context(|| format!("Failed to write file: {}", path.display()))?;
        }
        None => {
            print!("{}", content);
        }
    }
    Ok(())
}
