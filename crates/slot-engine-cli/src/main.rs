//! `slots` CLI — build slot grids, list a specialist's availability, and match
//! client selections against many specialists from the command line.
//!
//! ## Usage
//!
//! ```sh
//! # Universal 60-minute grid for a week
//! slots grid --from 2026-01-19 --days 7
//!
//! # Upcoming 30-minute grid in a zone, skipping slots that already started
//! slots --slot-minutes 30 grid --tz Europe/Moscow --days 3
//!
//! # One specialist's availability (per day) between two dates
//! slots schedule -i specialist.json --from 2026-01-19 --to 2026-01-25
//!
//! # Match a client request against every specialist it lists
//! slots match -i request.json -o matches.json
//!
//! # Policy from a JSON file, with debug logging
//! RUST_LOG=slot_engine=debug slots --policy policy.json match -i request.json
//! ```

use std::collections::BTreeMap;
use std::io::{self, Read};

use anyhow::{Context, Result};
use chrono::{DateTime, FixedOffset, NaiveDate, Utc};
use chrono_tz::Tz;
use clap::{ArgAction, Args, Parser, Subcommand};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

use slot_engine::localize::{selection_keys, slot_start_in, upcoming_grid, DstPolicy};
use slot_engine::records::{parse_timezone, SpecialistProfile, SpecialistRecord};
use slot_engine::report::MatchReport;
use slot_engine::{
    generate_domain_slots, match_specialists, AvailabilityGenerator, DomainTimePolicy,
    PolicyConfig, SlotMatcher,
};

#[derive(Parser)]
#[command(
    name = "slots",
    version,
    about = "Availability slot generation and matching"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    #[command(flatten)]
    policy: PolicyArgs,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,
}

/// Domain time grid settings. Flags override values loaded with `--policy`.
#[derive(Args)]
struct PolicyArgs {
    /// JSON file with `slot_duration_minutes`, `day_start`, `day_end`
    #[arg(long, global = true)]
    policy: Option<String>,

    /// Slot length in minutes
    #[arg(long, global = true)]
    slot_minutes: Option<i64>,

    /// First slot start of each day, HH:MM
    #[arg(long, global = true)]
    day_start: Option<String>,

    /// Day boundary, HH:MM; 00:00 means the end of the day
    #[arg(long, global = true)]
    day_end: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the universal slot set as JSON
    Grid {
        /// First day of the grid (YYYY-MM-DD)
        #[arg(long, conflicts_with = "tz", required_unless_present = "tz")]
        from: Option<NaiveDate>,
        /// Start from the current time in this IANA zone instead of --from
        #[arg(long)]
        tz: Option<String>,
        /// Number of days
        #[arg(long, default_value_t = 7)]
        days: u32,
        /// Output file (writes to stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
    },
    /// Print one specialist's availability per day as JSON
    Schedule {
        /// Specialist JSON file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// First day (YYYY-MM-DD)
        #[arg(long)]
        from: NaiveDate,
        /// Last day, inclusive (YYYY-MM-DD)
        #[arg(long)]
        to: NaiveDate,
        /// Output file (writes to stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
    },
    /// Match a client's selected slots against every listed specialist
    Match {
        /// Request JSON file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// Output file (writes to stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
    },
}

/// Body of `slots match`.
#[derive(Deserialize)]
struct MatchRequest {
    date_from: NaiveDate,
    #[serde(default = "default_days_ahead")]
    days_ahead: u32,
    /// Chosen slot starts as RFC 3339 timestamps.
    selected: Vec<DateTime<FixedOffset>>,
    /// Client zone; also used for specialists without their own zone.
    #[serde(default)]
    timezone: Option<String>,
    specialists: Vec<serde_json::Value>,
}

fn default_days_ahead() -> u32 {
    7
}

#[derive(Serialize)]
struct MatchResponse {
    matches: Vec<SpecialistReport>,
    /// Specialists whose configuration could not be loaded.
    skipped: Vec<String>,
}

#[derive(Serialize)]
struct SpecialistReport {
    id: String,
    timezone: String,
    /// Matched slot starts in the client's zone.
    client_starts: Vec<String>,
    #[serde(flatten)]
    report: MatchReport,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let policy = load_policy(&cli.policy)?;
    debug!(?policy, "domain time policy");

    match cli.command {
        Commands::Grid {
            from,
            tz,
            days,
            output,
        } => {
            let json = match (from, tz) {
                (_, Some(tz)) => {
                    let tz = parse_timezone(&tz)?;
                    let now = Utc::now().with_timezone(&tz);
                    let grid: BTreeMap<NaiveDate, Vec<String>> = upcoming_grid(&policy, now, days)
                        .into_iter()
                        .map(|(day, starts)| {
                            (day, starts.iter().map(DateTime::to_rfc3339).collect())
                        })
                        .collect();
                    serde_json::to_string_pretty(&grid)?
                }
                (Some(from), None) => {
                    serde_json::to_string_pretty(&generate_domain_slots(&policy, from, days))?
                }
                (None, None) => anyhow::bail!("grid needs either --from or --tz"),
            };
            write_output(output.as_deref(), &json)?;
        }
        Commands::Schedule {
            input,
            from,
            to,
            output,
        } => {
            let raw = read_input(input.as_deref())?;
            let record: SpecialistRecord =
                serde_json::from_str(&raw).context("Failed to parse specialist JSON")?;
            let profile = record
                .to_profile()
                .with_context(|| format!("Invalid configuration for specialist '{}'", record.id))?;
            let availability = AvailabilityGenerator::new(&policy, &profile.schedule)
                .generate(from, to)
                .context("Failed to generate availability")?;
            info!(
                specialist = %profile.id,
                slots = availability.slot_count(),
                "generated schedule"
            );
            write_output(output.as_deref(), &serde_json::to_string_pretty(&availability)?)?;
        }
        Commands::Match { input, output } => {
            let raw = read_input(input.as_deref())?;
            let request: MatchRequest =
                serde_json::from_str(&raw).context("Failed to parse match request JSON")?;
            let response = run_match(&policy, request)?;
            write_output(output.as_deref(), &serde_json::to_string_pretty(&response)?)?;
        }
    }

    Ok(())
}

fn init_tracing(verbose: u8) {
    let filter = match verbose {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

fn load_policy(args: &PolicyArgs) -> Result<DomainTimePolicy> {
    let mut config = match args.policy.as_deref() {
        Some(path) => {
            let raw = read_input(Some(path))?;
            serde_json::from_str::<PolicyConfig>(&raw)
                .with_context(|| format!("Failed to parse policy file: {}", path))?
        }
        None => PolicyConfig::default(),
    };
    if let Some(minutes) = args.slot_minutes {
        config.slot_duration_minutes = minutes;
    }
    if let Some(start) = &args.day_start {
        config.day_start = start.clone();
    }
    if let Some(end) = &args.day_end {
        config.day_end = end.clone();
    }
    DomainTimePolicy::try_from(config).context("Invalid domain time policy")
}

/// Bulk filter-and-match over every specialist in the request.
///
/// Selections are absolute instants, so they are keyed per specialist zone;
/// specialists sharing a zone share one matcher.
fn run_match(policy: &DomainTimePolicy, request: MatchRequest) -> Result<MatchResponse> {
    anyhow::ensure!(!request.selected.is_empty(), "Match request selects no slots");
    let client_tz = match request.timezone.as_deref() {
        Some(name) => parse_timezone(name)?,
        None => Tz::UTC,
    };
    let universal = generate_domain_slots(policy, request.date_from, request.days_ahead);

    let mut skipped = Vec::new();
    let mut by_zone: BTreeMap<&'static str, (Tz, Vec<(usize, SpecialistProfile)>)> =
        BTreeMap::new();
    for (index, value) in request.specialists.into_iter().enumerate() {
        let label = value
            .get("id")
            .and_then(serde_json::Value::as_str)
            .map_or_else(|| format!("#{}", index), str::to_string);
        match load_specialist(value) {
            Ok(profile) => {
                let tz = profile.timezone.unwrap_or(client_tz);
                by_zone
                    .entry(tz.name())
                    .or_insert_with(|| (tz, Vec::new()))
                    .1
                    .push((index, profile));
            }
            Err(err) => {
                warn!(specialist = %label, error = %format!("{:#}", err), "skipping specialist");
                skipped.push(label);
            }
        }
    }

    let mut matches = Vec::new();
    for (tz, profiles) in by_zone.values() {
        let matcher = SlotMatcher::new(selection_keys(&request.selected, *tz))
            .context("Match request selects no slots")?;
        let found = match_specialists(
            &universal,
            profiles.iter().map(|(index, p)| ((*index, p), &p.schedule)),
            &matcher,
        );
        for m in found {
            let (index, profile) = m.id;
            let client_starts = m
                .result
                .matched_slots
                .iter()
                .filter_map(|slot| slot_start_in(slot, *tz, client_tz, DstPolicy::Skip))
                .map(|start| start.to_rfc3339())
                .collect();
            matches.push((
                index,
                SpecialistReport {
                    id: profile.id.clone(),
                    timezone: tz.name().to_string(),
                    client_starts,
                    report: MatchReport::from(&m.result),
                },
            ));
        }
    }
    matches.sort_by_key(|(index, _)| *index);

    info!(
        matched = matches.len(),
        skipped = skipped.len(),
        "bulk match finished"
    );
    Ok(MatchResponse {
        matches: matches.into_iter().map(|(_, report)| report).collect(),
        skipped,
    })
}

fn load_specialist(value: serde_json::Value) -> Result<SpecialistProfile> {
    let record: SpecialistRecord =
        serde_json::from_value(value).context("Malformed specialist record")?;
    record
        .to_profile()
        .with_context(|| format!("Invalid configuration for specialist '{}'", record.id))
}

fn read_input(path: Option<&str>) -> Result<String> {
    match path {
        Some(path) => {
            std::fs::read_to_string(path).with_context(|| format!("Failed to read file: {}", path))
        }
        None => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read from stdin")?;
            Ok(buf)
        }
    }
}

fn write_output(path: Option<&str>, content: &str) -> Result<()> {
    match path {
        Some(path) => {
            std::fs::write(path, content)
                .with_context(|| format!("Failed to write file: {}", path))?;
        }
        None => {
            println!("{}", content);
        }
    }
    Ok(())
}
