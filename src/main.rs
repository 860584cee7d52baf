//! Command line entry point.
//!
//! Loads the reference pools, synthesizes one dataset, aggregates the
//! trend summary and pushes everything through the enabled sinks. Sink
//! failures are logged and skipped; only pool or synthesis failures
//! abort the run.

mod config;
mod error;
mod export;
mod gen;
mod pool;

use std::path::PathBuf;
use std::process::ExitCode;

use chrono::Utc;
use clap::Parser;
use env_logger::Env;
use log::{error, info};

use crate::config::ForgeConfig;
use crate::error::ForgeResult;
use crate::export::RunInfo;
use crate::pool::PoolSet;

/// Synthesizes vendor-risk / CVE datasets for analytics pipelines.
#[derive(Parser, Debug)]
#[command(name = "riskforge", version)]
struct Cli {
    /// Number of records to generate
    #[arg(long, default_value_t = 50)]
    count: usize,

    /// Seed for repeatable output (unseeded runs use OS entropy)
    #[arg(long)]
    seed: Option<u64>,

    /// Tag records as unenriched
    #[arg(long)]
    unenriched: bool,

    /// Skip the SQLite sink
    #[arg(long)]
    no_sql: bool,

    /// Skip the JSON feed sink
    #[arg(long)]
    no_json: bool,

    /// Use the reference pools bundled into the binary
    #[arg(long)]
    builtin_pools: bool,

    /// Vendor pool CSV (overrides RISKFORGE_VENDOR_POOL)
    #[arg(long)]
    vendors: Option<PathBuf>,

    /// Scenario template pool CSV (overrides RISKFORGE_SCENARIO_POOL)
    #[arg(long)]
    scenarios: Option<PathBuf>,

    /// Vulnerability pool CSV (overrides RISKFORGE_VULN_POOL)
    #[arg(long)]
    vulns: Option<PathBuf>,

    /// Directory for the report CSV (overrides RISKFORGE_CSV_DIR)
    #[arg(long)]
    out_dir: Option<PathBuf>,

    /// SQLite database file (overrides RISKFORGE_DB)
    #[arg(long)]
    db: Option<PathBuf>,

    /// Directory for the JSON feed file (overrides RISKFORGE_FEED_DIR)
    #[arg(long)]
    feed_dir: Option<PathBuf>,
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    match run(Cli::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> ForgeResult<()> {
    let cfg = resolve_config(&cli);

    let pools = if cli.builtin_pools {
        PoolSet::builtin()?
    } else {
        PoolSet::load(&cfg)?
    };
    info!(
        "pools loaded: {} vendors across {} sectors, {} scenarios, {} vulnerabilities",
        pools.vendors.len(),
        pools.sectors().len(),
        pools.scenarios.len(),
        pools.vulns.len()
    );

    let enriched = !cli.unenriched;
    let now = Utc::now();
    let run = RunInfo::new(cli.seed, cli.count, enriched, now);
    let mut rng = gen::rng_from_seed(cli.seed);

    let dataset = gen::synth::synthesize(&pools, cli.count, enriched, &mut rng, now)?;
    let trend = gen::trend::aggregate(&dataset, now);
    info!(
        "run {}: {} records synthesized ({} dirty / {} clean)",
        run.run_id,
        dataset.len(),
        trend.dirty_count,
        trend.clean_count
    );

    match export::csv::write_report(&cfg.csv_dir, &run, &dataset) {
        Ok(path) => info!("report CSV saved: {}", path.display()),
        Err(e) => error!("report CSV failed: {e}"),
    }

    if !cli.no_sql {
        let stored = export::sqlite::SqliteSink::open(&cfg.db_path)
            .and_then(|mut sink| sink.store(&run, &dataset));
        match stored {
            Ok(n) => info!("{} records appended to {}", n, cfg.db_path.display()),
            Err(e) => error!("database sink failed: {e}"),
        }
    }

    if !cli.no_json {
        match export::feed::write_feed(&cfg.feed_dir, &run, &dataset, &trend) {
            Ok(path) => info!("feed JSON saved: {}", path.display()),
            Err(e) => error!("feed sink failed: {e}"),
        }
    }

    Ok(())
}

fn resolve_config(cli: &Cli) -> ForgeConfig {
    let mut cfg = ForgeConfig::from_env();
    if let Some(p) = &cli.vendors {
        cfg.vendor_pool = p.clone();
    }
    if let Some(p) = &cli.scenarios {
        cfg.scenario_pool = p.clone();
    }
    if let Some(p) = &cli.vulns {
        cfg.vuln_pool = p.clone();
    }
    if let Some(p) = &cli.out_dir {
        cfg.csv_dir = p.clone();
    }
    if let Some(p) = &cli.db {
        cfg.db_path = p.clone();
    }
    if let Some(p) = &cli.feed_dir {
        cfg.feed_dir = p.clone();
    }
    cfg
}
