//! aurum — command-line front end for the gold-savings benefit calculator.
//!
//! Quotes a contribution against the tiered benefit table, prints the table,
//! and runs the submission check. Amount limits and the gold rate come from
//! flags or from the local store.

mod config;

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use aurum_benefit::BenefitEngine;
use aurum_core::constants::{BASE_BENEFIT_PERCENT, BENEFIT_RANGES, MAX_DAY};
use aurum_core::traits::BenefitCalculator;
use aurum_core::types::{AmountLimits, CalculationInput, CalculationMode, Source};
use aurum_core::validation::validate_submission;
use aurum_store::{CachedRate, StorePaths};
use chrono::{DateTime, Utc};
use clap::{Args, Parser, Subcommand};
use tracing::{debug, info, warn};

use crate::config::CliConfig;

/// Aurum benefit calculator.
#[derive(Parser)]
#[command(name = "aurum", version, about = "Gold-savings benefit calculator")]
struct Cli {
    /// Directory holding stored limits and the cached gold rate
    /// (default: $AURUM_DATA_DIR or the platform data dir).
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error). Defaults to $AURUM_LOG or "info".
    #[arg(long, global = true)]
    log_level: Option<String>,

    /// Log output format ("text" or "json").
    #[arg(long, global = true, default_value = "text")]
    log_format: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute the benefit and payout for a contribution.
    Quote(QuoteArgs),
    /// Print the benefit table.
    Ranges,
    /// Check whether an amount may be submitted.
    Validate(ValidateArgs),
}

/// Gold rate and limits, each falling back to the local store.
#[derive(Args)]
struct MarketArgs {
    /// Gold rate in currency per gram.
    #[arg(long)]
    rate: Option<f64>,

    /// Minimum contribution amount.
    #[arg(long, requires = "max")]
    min: Option<f64>,

    /// Maximum contribution amount.
    #[arg(long, requires = "min")]
    max: Option<f64>,

    /// Persist the supplied rate and limits to the local store.
    #[arg(long)]
    save: bool,
}

#[derive(Args)]
struct QuoteArgs {
    /// Contribution amount in currency units.
    #[arg(long, conflicts_with = "weight")]
    amount: Option<f64>,

    /// Contribution weight in grams.
    #[arg(long)]
    weight: Option<f64>,

    /// Benefit percentage (defaults to the first tier).
    #[arg(long, conflicts_with = "day")]
    percent: Option<f64>,

    /// Day position on the 1-330 scale; selects the tier's percentage.
    #[arg(long)]
    day: Option<i64>,

    /// Calculation mode ("today" or "total").
    #[arg(long, default_value_t = CalculationMode::Today)]
    mode: CalculationMode,

    #[command(flatten)]
    market: MarketArgs,
}

#[derive(Args)]
struct ValidateArgs {
    /// Amount to submit.
    #[arg(long)]
    amount: f64,

    #[command(flatten)]
    market: MarketArgs,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = CliConfig::from_env()?;
    if let Some(dir) = cli.data_dir {
        config.data_dir = dir;
    }
    if let Some(level) = cli.log_level {
        config.log_level = level;
    }

    init_logging(&config.log_level, &cli.log_format);
    debug!(data_dir = %config.data_dir.display(), "configuration loaded");

    match cli.command {
        Commands::Quote(args) => quote(&config, args),
        Commands::Ranges => ranges(),
        Commands::Validate(args) => validate(&config, args),
    }
}

/// Print the benefit payout for one contribution as JSON.
fn quote(config: &CliConfig, args: QuoteArgs) -> Result<()> {
    let (gold_rate, limits) = resolve_market(config, &args.market)?;

    let source = match (args.amount, args.weight) {
        (Some(amount), _) => Some(Source::Amount(amount)),
        (None, Some(weight)) => Some(Source::Weight(weight)),
        (None, None) => bail!("pass --amount or --weight"),
    };

    let engine = BenefitEngine::new();
    let benefit_percent = match (args.percent, args.day) {
        (Some(percent), _) => percent,
        (None, Some(day)) => engine.select_range_for_day(day).percentage,
        (None, None) => BASE_BENEFIT_PERCENT,
    };

    let input = CalculationInput {
        source,
        gold_rate,
        limits,
        benefit_percent,
        mode: args.mode,
    };
    let output = engine.calculate(&input);
    info!(
        mode = %args.mode,
        benefit_percent,
        entered_amount = output.entered_amount,
        benefit_amount = output.benefit_amount,
        "quote computed"
    );

    let json = serde_json::to_string_pretty(&output).context("Failed to encode quote")?;
    println!("{json}");
    Ok(())
}

/// Print the benefit table.
fn ranges() -> Result<()> {
    println!("{:<12} {:>8}", "days", "benefit");
    for (i, range) in BENEFIT_RANGES.iter().enumerate() {
        // The last row also owns day 330.
        let last_day = if i == BENEFIT_RANGES.len() - 1 {
            MAX_DAY
        } else {
            range.max - 1
        };
        println!(
            "{:<12} {:>7.2}%",
            format!("{}-{}", range.min, last_day),
            range.percentage
        );
    }
    Ok(())
}

/// Run the submission check for `args.amount`.
fn validate(config: &CliConfig, args: ValidateArgs) -> Result<()> {
    let (gold_rate, limits) = resolve_market(config, &args.market)?;
    validate_submission(args.amount, &limits, gold_rate)?;
    println!("ok: {} may be submitted", args.amount);
    Ok(())
}

/// Gold rate and limits from flags, else from the store.
fn resolve_market(config: &CliConfig, market: &MarketArgs) -> Result<(f64, AmountLimits)> {
    let paths = config.store_paths();

    let limits = match (market.min, market.max) {
        (Some(min), Some(max)) => AmountLimits::new(min, max)?,
        _ => paths
            .limits_store()
            .load()
            .context("Failed to read stored limits")?
            .context("No amount limits: pass --min and --max or save them first")?,
    };

    let gold_rate = match market.rate {
        Some(rate) => rate,
        None => {
            let cached = paths
                .rate_cache()
                .load()
                .context("Failed to read cached gold rate")?
                .context("No gold rate: pass --rate or save one first")?;
            let now = Utc::now();
            if cached.is_stale(now, config.rate_max_age()) {
                warn!(
                    age_secs = cached.age(now).num_seconds(),
                    "cached gold rate is stale"
                );
            }
            cached.rate
        }
    };

    if market.save {
        let saved_limits = market.min.map(|_| limits);
        save_market(&paths, saved_limits.as_ref(), market.rate, Utc::now())?;
        info!(data_dir = %config.data_dir.display(), "market inputs saved");
    }

    Ok((gold_rate, limits))
}

/// Persist supplied limits and rate. The rate is checked before anything is
/// written, so a rejected call leaves the store untouched.
fn save_market(
    paths: &StorePaths,
    limits: Option<&AmountLimits>,
    rate: Option<f64>,
    now: DateTime<Utc>,
) -> Result<()> {
    if let Some(rate) = rate {
        if !rate.is_finite() || rate <= 0.0 {
            bail!("refusing to cache a non-positive gold rate: {rate}");
        }
    }
    if let Some(limits) = limits {
        paths
            .limits_store()
            .save(limits)
            .context("Failed to save limits")?;
    }
    if let Some(rate) = rate {
        paths
            .rate_cache()
            .save(&CachedRate::new(rate, now))
            .context("Failed to save gold rate")?;
    }
    Ok(())
}

/// Initialize the tracing subscriber on stderr with the given level and format.
fn init_logging(level_str: &str, format: &str) {
    use tracing_subscriber::filter::EnvFilter;
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level_str));

    if format == "json" {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(true)
                    .with_level(true)
                    .with_writer(std::io::stderr),
            )
            .init();
    }
}
