use std::path::PathBuf;

use anyhow::{Context, Result, anyhow, bail};
use chrono::{DateTime, FixedOffset, NaiveDate, Utc};
use clap::{Args, Parser, Subcommand};
use miqat_config::{Settings, parse_utc_offset_minutes};
use miqat_geo::{
    DEFAULT_ALIGNMENT_TOLERANCE_DEG, GeoCoordinates, angular_difference, is_aligned, qibla,
    relative_bearing,
};
use miqat_prayer::{
    CalculationConfig, CalculationMethod, IshaRule, Prayer, PrayerTimeCalculator, PrayerTimes,
    current_prayer, next_prayer_across, time_remaining,
};
use miqat_time::Rounding;
use serde::Serialize;
use tracing::debug;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

#[derive(Parser)]
#[command(name = "miqat", about = "Prayer times and Qibla direction", version)]
struct Cli {
    /// Settings file (default: search for miqat.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Prayer times for one or more days
    Times {
        #[command(flatten)]
        location: LocationArgs,
        #[command(flatten)]
        calc: CalcArgs,
        /// Calendar date (YYYY-MM-DD, default: today at the location)
        #[arg(long)]
        date: Option<NaiveDate>,
        /// Number of consecutive days
        #[arg(long, default_value = "1")]
        days: u32,
        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Current and next prayer
    Next {
        #[command(flatten)]
        location: LocationArgs,
        #[command(flatten)]
        calc: CalcArgs,
        /// Reference instant (RFC 3339, default: now)
        #[arg(long)]
        now: Option<DateTime<FixedOffset>>,
    },
    /// Qibla bearing and distance
    Qibla {
        #[command(flatten)]
        location: LocationArgs,
        /// Device heading in degrees from true North
        #[arg(long, allow_negative_numbers = true)]
        heading: Option<f64>,
        /// Print JSON
        #[arg(long)]
        json: bool,
    },
    /// List calculation methods
    Methods,
}

#[derive(Args)]
struct LocationArgs {
    /// Latitude in degrees, north positive
    #[arg(long, allow_negative_numbers = true, requires = "lon")]
    lat: Option<f64>,
    /// Longitude in degrees, east positive
    #[arg(long, allow_negative_numbers = true, requires = "lat")]
    lon: Option<f64>,
    /// Display offset from UTC in minutes (e.g. 180, -240)
    #[arg(long, allow_negative_numbers = true)]
    utc_offset: Option<i32>,
}

#[derive(Args)]
struct CalcArgs {
    /// Calculation method (MuslimWorldLeague, Egyptian, Karachi, UmmAlQura, Dubai, NorthAmerica)
    #[arg(long)]
    method: Option<String>,
    /// Asr madhab (Shafi or Hanafi)
    #[arg(long)]
    madhab: Option<String>,
    /// High-latitude rule (MiddleOfTheNight, SeventhOfTheNight, TwilightAngle, none)
    #[arg(long)]
    high_lat_rule: Option<String>,
    /// Rounding (nearest, up, none)
    #[arg(long)]
    rounding: Option<String>,
}

/// Location and display offset after merging flags over settings.
struct Observer {
    coords: GeoCoordinates,
    offset: FixedOffset,
}

/// Directives used when `RUST_LOG` is unset or invalid.
const DEFAULT_LOG_FILTER: &str = "warn";

fn log_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER))
}

fn init_logging() {
    FmtSubscriber::builder()
        .with_env_filter(log_filter())
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();
}

fn load_settings(path: Option<&PathBuf>) -> Result<Settings> {
    match path {
        Some(p) => Settings::from_file(p).with_context(|| format!("loading {}", p.display())),
        None => Settings::load_or_default().context("loading settings"),
    }
}

fn resolve_observer(settings: &Settings, args: &LocationArgs) -> Result<Observer> {
    let coords = match (args.lat, args.lon) {
        (Some(lat), Some(lon)) => GeoCoordinates::try_new(lat, lon)?,
        _ => settings.coordinates()?.ok_or_else(|| {
            anyhow!("no location: pass --lat/--lon or set [location] in miqat.toml")
        })?,
    };
    let offset = match args.utc_offset {
        Some(minutes) => parse_utc_offset_minutes(minutes)?,
        None => settings.utc_offset()?,
    };
    Ok(Observer { coords, offset })
}

fn resolve_config(settings: &Settings, args: &CalcArgs) -> Result<CalculationConfig> {
    let mut prayer = settings.prayer.clone();
    if let Some(m) = &args.method {
        prayer.method.clone_from(m);
    }
    if let Some(m) = &args.madhab {
        prayer.madhab.clone_from(m);
    }
    if let Some(r) = &args.high_lat_rule {
        prayer.high_latitude_rule.clone_from(r);
    }
    if let Some(r) = &args.rounding {
        prayer.rounding.clone_from(r);
    }
    let config = prayer.calculation_config()?;
    debug!(?config, "resolved calculation config");
    Ok(config)
}

fn local_today(offset: FixedOffset) -> NaiveDate {
    Utc::now().with_timezone(&offset).date_naive()
}

fn format_offset(offset: FixedOffset) -> String {
    let secs = offset.local_minus_utc();
    let sign = if secs < 0 { '-' } else { '+' };
    let mins = secs.abs() / 60;
    format!("UTC{sign}{:02}:{:02}", mins / 60, mins % 60)
}

fn method_label(config: &CalculationConfig) -> String {
    config
        .parameters
        .method
        .map_or_else(|| "custom".to_string(), |m| m.key().to_string())
}

#[derive(Serialize)]
struct LocalDay {
    date: NaiveDate,
    fajr: DateTime<FixedOffset>,
    sunrise: DateTime<FixedOffset>,
    dhuhr: DateTime<FixedOffset>,
    asr: DateTime<FixedOffset>,
    maghrib: DateTime<FixedOffset>,
    isha: DateTime<FixedOffset>,
}

impl LocalDay {
    fn new(times: &PrayerTimes, offset: FixedOffset) -> Self {
        let local = |p: Prayer| times.time(p).with_timezone(&offset);
        Self {
            date: times.date,
            fajr: local(Prayer::Fajr),
            sunrise: local(Prayer::Sunrise),
            dhuhr: local(Prayer::Dhuhr),
            asr: local(Prayer::Asr),
            maghrib: local(Prayer::Maghrib),
            isha: local(Prayer::Isha),
        }
    }
}

fn print_day(times: &PrayerTimes, offset: FixedOffset) {
    println!("{}", times.date.format("%A, %b %-d, %Y"));
    for (prayer, t) in times.with_offset(offset) {
        let marker = match t.date_naive().cmp(&times.date) {
            std::cmp::Ordering::Greater => " (+1d)",
            std::cmp::Ordering::Less => " (-1d)",
            std::cmp::Ordering::Equal => "",
        };
        println!("  {:<8} {}{marker}", capitalize(prayer.name()), t.format("%H:%M"));
    }
}

fn capitalize(name: &str) -> String {
    let mut chars = name.chars();
    chars
        .next()
        .map(|c| c.to_ascii_uppercase().to_string() + chars.as_str())
        .unwrap_or_default()
}

fn run_times(
    settings: &Settings,
    location: &LocationArgs,
    calc: &CalcArgs,
    date: Option<NaiveDate>,
    days: u32,
    json: bool,
) -> Result<()> {
    if days == 0 {
        bail!("--days must be at least 1");
    }
    let observer = resolve_observer(settings, location)?;
    let config = resolve_config(settings, calc)?;
    let start = date.unwrap_or_else(|| local_today(observer.offset));

    let schedule = PrayerTimeCalculator::new(config).compute_days(&observer.coords, start, days)?;

    if json {
        let local: Vec<_> = schedule
            .iter()
            .map(|t| LocalDay::new(t, observer.offset))
            .collect();
        println!("{}", serde_json::to_string_pretty(&local)?);
        return Ok(());
    }

    println!(
        "{} ({}, {}, {})",
        observer.coords,
        method_label(&config),
        config.madhab.key(),
        format_offset(observer.offset)
    );
    for times in &schedule {
        print_day(times, observer.offset);
    }
    Ok(())
}

fn run_next(
    settings: &Settings,
    location: &LocationArgs,
    calc: &CalcArgs,
    now: Option<DateTime<FixedOffset>>,
) -> Result<()> {
    let observer = resolve_observer(settings, location)?;
    let config = resolve_config(settings, calc)?;
    let now = now.map_or_else(Utc::now, |t| t.with_timezone(&Utc));

    let today = now.with_timezone(&observer.offset).date_naive();
    let tomorrow = today
        .succ_opt()
        .ok_or_else(|| anyhow!("no calendar day after {today}"))?;
    let calc = PrayerTimeCalculator::new(config);
    let today_times = calc.compute(&observer.coords, today)?;
    let tomorrow_times = calc.compute(&observer.coords, tomorrow)?;

    match current_prayer(&today_times, now) {
        Some(p) => println!("Current: {}", capitalize(p.name())),
        None => println!("Current: none"),
    }
    let next = next_prayer_across(&today_times, &tomorrow_times, now);
    println!(
        "Next:    {} at {} (in {})",
        capitalize(next.prayer.name()),
        next.time.with_timezone(&observer.offset).format("%H:%M"),
        time_remaining(next.time, now)
    );
    Ok(())
}

#[derive(Serialize)]
struct QiblaReport {
    bearing_degrees: f64,
    distance_km: f64,
    distance_miles: f64,
    compass_point: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    relative_bearing: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    aligned: Option<bool>,
}

fn run_qibla(
    settings: &Settings,
    location: &LocationArgs,
    heading: Option<f64>,
    json: bool,
) -> Result<()> {
    let observer = resolve_observer(settings, location)?;
    let q = qibla(&observer.coords)?;

    let report = QiblaReport {
        bearing_degrees: q.bearing_degrees,
        distance_km: q.distance_km,
        distance_miles: q.distance_miles(),
        compass_point: q.compass_point().to_string(),
        relative_bearing: heading.map(|h| relative_bearing(q.bearing_degrees, h)),
        aligned: heading
            .map(|h| is_aligned(q.bearing_degrees, h, DEFAULT_ALIGNMENT_TOLERANCE_DEG)),
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!("From     {}", observer.coords);
    println!(
        "Qibla    {:.2}° ({}) from true North",
        report.bearing_degrees, report.compass_point
    );
    println!(
        "Distance {:.0} km ({:.0} mi)",
        report.distance_km, report.distance_miles
    );
    if let Some(h) = heading {
        let off = angular_difference(q.bearing_degrees, h);
        let status = if report.aligned == Some(true) { "facing Qibla" } else { "turn" };
        println!(
            "Heading  {h:.1}°: rotate {:.1}° clockwise ({status}, {off:.1}° off)",
            report.relative_bearing.unwrap_or_default()
        );
    }
    Ok(())
}

fn run_methods() {
    println!("{:<18} {:>6}  {:<16} offsets", "method", "fajr", "isha");
    for method in CalculationMethod::all() {
        let p = method.parameters();
        let isha = match p.isha {
            IshaRule::Angle(a) => format!("{a}°"),
            IshaRule::Interval(m) => format!("{m} min after maghrib"),
        };
        let adj = p.method_adjustments;
        let offsets = Prayer::all()
            .iter()
            .filter(|&&pr| adj.minutes(pr) != 0)
            .map(|&pr| format!("{} {:+}", pr.name(), adj.minutes(pr)))
            .collect::<Vec<_>>()
            .join(", ");
        println!(
            "{:<18} {:>5}°  {:<16} {}",
            method.key(),
            p.fajr_angle,
            isha,
            if offsets.is_empty() { "-" } else { &offsets }
        );
    }
    let rounding: Vec<_> = Rounding::all().iter().map(|r| r.key()).collect();
    println!("\nrounding modes: {}", rounding.join(", "));
}

fn main() -> Result<()> {
    init_logging();
    let cli = Cli::parse();

    if let Commands::Methods = cli.command {
        run_methods();
        return Ok(());
    }

    let settings = load_settings(cli.config.as_ref())?;

    match &cli.command {
        Commands::Times {
            location,
            calc,
            date,
            days,
            json,
        } => run_times(&settings, location, calc, *date, *days, *json),
        Commands::Next {
            location,
            calc,
            now,
        } => run_next(&settings, location, calc, *now),
        Commands::Qibla {
            location,
            heading,
            json,
        } => run_qibla(&settings, location, *heading, *json),
        Commands::Methods => Ok(()),
    }
}
