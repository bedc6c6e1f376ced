//! BRICS Energy Dashboard - renders `22084021.png` from the three energy
//! spreadsheets in the working directory.

use anyhow::{Context, Result};
use brics_energy_dashboard::{create_dashboard, DashboardConfig, DashboardData};
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

fn main() -> Result<()> {
    let env = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt::Subscriber::builder().with_env_filter(env).init();

    let config = DashboardConfig::default();
    info!("Loading energy data");
    let data = DashboardData::load(&config).context("Failed to load energy data")?;

    create_dashboard(true, &data, &config).with_context(|| {
        format!(
            "Failed to create dashboard {}",
            config.output_path.display()
        )
    })?;
    Ok(())
}
