//! cadence: Calendar cadence analysis
//!
//! Main entry point for the cadence binary.
//!
//! Usage:
//!   cadence              - Analyze cached events (ingest on first run)
//!   cadence --refresh    - Refetch events from the calendar service
//!   cadence --help       - Show help

mod report;

use cadence_analysis::{daily_durations, rolling_mean, HourFrequencyTable, DEFAULT_ROLLING_WINDOW};
use cadence_calendar::{ingest, CalendarClient, TimeWindow};
use cadence_core::{CanonicalEvent, Config, EventStore, StoreError};
use cadence_taxonomy::Taxonomy;
use chrono::{NaiveDate, Utc};
use tracing_subscriber::EnvFilter;

/// First day of the ingestion window when nothing else is configured
fn default_history_start() -> NaiveDate {
    NaiveDate::from_ymd_opt(2018, 1, 1).unwrap()
}

/// Default cache file path
const DEFAULT_CACHE_PATH: &str = "events.csv";

/// Run mode
enum RunMode {
    /// Analyze (ingesting first if needed)
    Run,
    /// Show help
    Help,
    /// Show version
    Version,
}

/// Parsed command line options
struct Options {
    mode: RunMode,
    /// Refetch from the remote service even when a cache exists
    refresh: bool,
    /// Category to chart the daily trend for
    category: Option<String>,
    /// Rolling mean window in days
    window: usize,
    /// Override for the start of the analysis window
    since: Option<NaiveDate>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let options = parse_args()?;

    match options.mode {
        RunMode::Help => {
            print_help();
            return Ok(());
        }
        RunMode::Version => {
            println!("cadence {}", env!("CARGO_PKG_VERSION"));
            return Ok(());
        }
        RunMode::Run => {}
    }

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("info".parse()?))
        .init();

    // Load .env file
    dotenvy::dotenv().ok();

    let config = Config::load().map_err(|e| anyhow::anyhow!("Config error: {}", e))?;

    let cache_path =
        std::env::var("CADENCE_CACHE").unwrap_or_else(|_| DEFAULT_CACHE_PATH.to_string());
    let store = EventStore::new(cache_path);

    let since = options
        .since
        .or(config.history_start)
        .unwrap_or_else(default_history_start);

    let events = load_or_ingest(&store, &config, options.refresh, since).await?;
    tracing::info!("Analyzing {} events", events.len());

    // One categorization pass over one mutable taxonomy
    let mut taxonomy = Taxonomy::from_config(&config.categories);
    let categorized = taxonomy.categorize(&events);

    let table = HourFrequencyTable::build(&taxonomy.category_names(), &categorized);
    println!("{}", report::render_frequency_table(&table));

    // Daily trend for one category: the requested one, or the busiest
    let trend_category = options
        .category
        .or_else(|| report::busiest_category(&table).map(|c| c.to_string()));

    if let Some(category) = trend_category {
        let today = Utc::now().date_naive();
        let series = daily_durations(&categorized, &category, since, today);
        let smoothed = rolling_mean(&series, options.window);
        println!(
            "{}",
            report::render_series_tail(&category, &smoothed, options.window)
        );
    }

    Ok(())
}

/// Load the cache, ingesting from the remote service when it is missing
/// or a refresh was requested.
async fn load_or_ingest(
    store: &EventStore,
    config: &Config,
    refresh: bool,
    since: NaiveDate,
) -> anyhow::Result<Vec<CanonicalEvent>> {
    if !refresh {
        match store.load() {
            Ok(events) => {
                tracing::info!("Loaded {} events from cache", events.len());
                return Ok(events);
            }
            Err(StoreError::NotFound(_)) => {
                tracing::info!("No event cache found, fetching from calendar service");
            }
            Err(StoreError::Corrupt(detail)) => {
                anyhow::bail!(
                    "Event cache is corrupt ({}). Re-run with --refresh to refetch it.",
                    detail
                );
            }
            Err(e) => return Err(e.into()),
        }
    }

    let access_token = std::env::var("CALENDAR_ACCESS_TOKEN").map_err(|_| {
        anyhow::anyhow!("CALENDAR_ACCESS_TOKEN not set; cannot reach the calendar service")
    })?;
    let client = CalendarClient::new(access_token)
        .map_err(|e| anyhow::anyhow!("Failed to create calendar client: {}", e))?;

    let window = TimeWindow::new(
        since.and_hms_opt(0, 0, 0).unwrap().and_utc(),
        Utc::now(),
    );

    let report = ingest(&client, config.calendar_id.as_deref(), window)
        .await
        .map_err(|e| anyhow::anyhow!("Ingestion failed: {}", e))?;
    if report.skipped > 0 {
        tracing::warn!("{} records were skipped as malformed", report.skipped);
    }

    store.save(&report.events)?;
    Ok(report.events)
}

/// Parse command line arguments
fn parse_args() -> anyhow::Result<Options> {
    let args: Vec<String> = std::env::args().collect();

    let mut options = Options {
        mode: RunMode::Run,
        refresh: false,
        category: None,
        window: DEFAULT_ROLLING_WINDOW,
        since: None,
    };

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--help" | "-h" => options.mode = RunMode::Help,
            "--version" | "-v" => options.mode = RunMode::Version,
            "--refresh" | "-r" => options.refresh = true,
            "--category" | "-c" => {
                i += 1;
                let value = args
                    .get(i)
                    .ok_or_else(|| anyhow::anyhow!("--category needs a value"))?;
                options.category = Some(value.clone());
            }
            "--window" | "-w" => {
                i += 1;
                let value = args
                    .get(i)
                    .ok_or_else(|| anyhow::anyhow!("--window needs a value"))?;
                options.window = value
                    .parse()
                    .map_err(|_| anyhow::anyhow!("--window needs a number of days"))?;
            }
            "--since" => {
                i += 1;
                let value = args
                    .get(i)
                    .ok_or_else(|| anyhow::anyhow!("--since needs a date"))?;
                let date = NaiveDate::parse_from_str(value, "%Y-%m-%d")
                    .map_err(|_| anyhow::anyhow!("--since needs a YYYY-MM-DD date"))?;
                options.since = Some(date);
            }
            other => anyhow::bail!("Unknown argument: {}", other),
        }
        i += 1;
    }

    Ok(options)
}

/// Print help message
fn print_help() {
    println!("cadence - Calendar cadence analysis");
    println!();
    println!("Usage:");
    println!("  cadence                    Analyze cached events (ingest on first run)");
    println!("  cadence --refresh          Refetch events from the calendar service");
    println!("  cadence --category <name>  Category for the daily trend report");
    println!("  cadence --window <days>    Rolling mean window (default: 14)");
    println!("  cadence --since <date>     Analysis window start (YYYY-MM-DD)");
    println!("  cadence --help             Show this help message");
    println!("  cadence --version          Show version");
    println!();
    println!("Environment Variables:");
    println!("  CALENDAR_ACCESS_TOKEN  Access token for the calendar service (required to ingest)");
    println!("  CADENCE_CONFIG         Config file path (default: cadence.toml)");
    println!("  CADENCE_CACHE          Event cache path (default: events.csv)");
    println!("  CADENCE_CALENDAR_ID    Calendar to ingest from (default: primary)");
}
