//! keyspread CLI entry point

use anyhow::{Context, Result};
use keyspread::config::cli::Cli;
use keyspread::config::{toml, validator, Config, Mode};
use keyspread::output;
use keyspread::run::build_report;
use tracing::debug;
use tracing_subscriber::filter::{EnvFilter, LevelFilter};

fn main() -> Result<()> {
    let cli = Cli::parse_args();
    init_logging(cli.debug)?;
    cli.validate()?;

    // TOML file (if any) with CLI overrides
    let config = toml::load_config(&cli)?;
    validator::validate_config(&config)
        .context("Configuration validation failed")?;
    debug!(?config, "effective configuration");

    if cli.dry_run {
        print_configuration(&config);
        println!();
        println!("Dry run mode - configuration validated successfully");
        return Ok(());
    }

    let report = build_report(&config)?;
    output::emit(&report, &config.output)
}

/// Install the stderr log subscriber
///
/// `RUST_LOG` wins when set; otherwise `--debug` selects debug level and the
/// default is warnings only.
fn init_logging(debug: bool) -> Result<()> {
    let default_level = if debug { LevelFilter::DEBUG } else { LevelFilter::WARN };
    let filter = EnvFilter::builder()
        .with_default_directive(default_level.into())
        .from_env()
        .context("Invalid RUST_LOG filter")?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .compact()
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to install log subscriber: {}", e))
}

/// Print the effective configuration for --dry-run
fn print_configuration(config: &Config) {
    println!("Configuration:");
    println!("  Mode: {}", config.mode);

    match config.mode {
        Mode::Distribution => {
            let dist = &config.distribution;
            match config.run.records {
                Some(ref path) => println!("  Records: {}", path.display()),
                None => {
                    println!("  Seed: {}", dist.seed);
                    println!("  Shape: {}", dist.shape);
                    println!("  Size: {}", dist.size);
                    println!("  Generator: {}", dist.generator);
                    println!("  Regions: {}", dist.regions);
                }
            }
            println!("  Key: {}", dist.key);
            if config.run.sweep {
                println!("  Buckets: sweep 2-8");
            } else {
                println!("  Buckets: {}", dist.bucket_count);
            }
            println!(
                "  Skew thresholds: low <= {}, medium <= {}",
                dist.thresholds.low, dist.thresholds.medium
            );
            if config.run.regenerate > 1 {
                println!("  Seeds: {} successive", config.run.regenerate);
            }
        }
        Mode::Rollout => {
            let r = &config.rollout;
            println!("  Stable error rate: {}", r.stable_error_rate);
            println!("  Canary error rate: {}", r.canary_error_rate);
            println!("  Canary traffic: {}%", r.canary_percent);
        }
        Mode::Budget => {
            let b = &config.budget;
            println!("  SLO target: {}", b.slo_target);
            println!("  Window: {} minutes", b.window_minutes);
            println!("  Observed error rate: {}", b.observed_error_rate);
        }
    }

    println!("  Output: {}", config.output.format);
    if let Some(ref path) = config.output.path {
        println!("  Output file: {}", path.display());
    }
}
