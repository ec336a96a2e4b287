//! WBal demo - runs the W' balance model over a synthetic interval session.
//!
//! Reads `config.toml` and `zones.toml` from the data directory when present,
//! logs a summary and prints the detected matches as JSON.

use anyhow::Context;
use chrono::{NaiveDate, Utc};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use wbal::metrics::MinWPrime;
use wbal::storage::config::{get_zones_path, load_config};
use wbal::{Ride, WPrimeModel, ZoneHistory, ZoneProvider};

/// CP used when no zone history is configured.
const DEMO_CP: u16 = 250;
/// W' used when no zone history is configured.
const DEMO_W_PRIME: u32 = 20000;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting WBal v{}", env!("CARGO_PKG_VERSION"));

    let config = load_config().context("loading configuration")?;

    let zones_path = get_zones_path();
    let zones = if zones_path.exists() {
        ZoneHistory::load(&zones_path)
            .with_context(|| format!("loading zones from {}", zones_path.display()))?
    } else {
        tracing::info!(
            "No zone history at {}, using CP {}W and W' {}J",
            zones_path.display(),
            DEMO_CP,
            DEMO_W_PRIME
        );
        let epoch = NaiveDate::from_ymd_opt(2000, 1, 1).context("invalid epoch date")?;
        ZoneHistory::single(epoch, DEMO_CP, DEMO_W_PRIME)
    };

    let ride = Ride::from_watts(Utc::now(), &interval_session(DEMO_CP as f64));
    let model = WPrimeModel::new(config);
    let zones: &dyn ZoneProvider = &zones;

    let analysis = model.compute(&ride, Some(zones));

    tracing::info!(
        "{} seconds, CP {}W, W' {}J, tau {:?}",
        analysis.balance.len(),
        analysis.parameters.cp,
        analysis.parameters.w_prime,
        analysis.parameters.tau
    );
    tracing::info!(
        "Minimum W' {} ({} s exhausted), {} matches costing {:.0}J",
        MinWPrime::format(analysis.min_balance_kj()),
        analysis.balance.seconds_below_zero,
        analysis.matches.len(),
        analysis.total_match_cost()
    );

    let json = serde_json::to_string_pretty(&analysis.matches).context("serializing matches")?;
    println!("{}", json);

    Ok(())
}

/// Warm-up, five 3-minute efforts at 120% CP with 3-minute recoveries,
/// cool-down.
fn interval_session(cp: f64) -> Vec<f64> {
    let mut samples = Vec::new();

    samples.extend(std::iter::repeat(cp * 0.55).take(10 * 60));
    for interval in 0..5 {
        samples.extend(std::iter::repeat(cp * 1.20).take(180));
        if interval < 4 {
            samples.extend(std::iter::repeat(cp * 0.50).take(180));
        }
    }
    samples.extend(std::iter::repeat(cp * 0.40).take(10 * 60));

    samples
}
