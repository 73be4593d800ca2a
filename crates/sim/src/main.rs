//! Headless armada skirmish driver.
//!
//! Loads rules, catalogs and a scenario from the data directory, replays the
//! scenario's scripted orders against the simulation core at a fixed
//! timestep and logs a summary.
//!
//! # Examples
//!
//! ```bash
//! ARMADA_SCENARIO=siege ARMADA_DURATION=60 RUST_LOG=armada_core=debug \
//!     cargo run -p armada-sim
//! ```

mod config;
mod runner;

use anyhow::Result;
use armada_content::ContentFactory;

use crate::config::SimConfig;

fn main() -> Result<()> {
    // Load .env file if it exists (silently ignore if not found)
    let _ = dotenvy::dotenv();

    setup_logging();

    let config = SimConfig::from_env();
    tracing::info!(
        data_dir = %config.data_dir.display(),
        scenario = %config.scenario,
        timestep = config.timestep,
        duration = config.duration,
        "starting armada-sim"
    );

    let factory = ContentFactory::new(&config.data_dir);
    let context = factory.load_context()?;
    let scenario = factory.load_scenario(&config.scenario)?;
    if context.rules.use_test_values {
        tracing::info!(mult = context.rules.test_time_mult, "test timing enabled");
    }

    let report = runner::run(&context, &scenario, &config)?;
    report.log_summary();

    Ok(())
}

fn setup_logging() {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();
}
