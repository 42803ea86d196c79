use anyhow::Result;
use pulse_logging::pulse_info;
use pulse_server::{config::Config, logging, run};

#[tokio::main]
async fn main() -> Result<()> {
    logging::init_from_env()?;
    pulse_info!("GitPulse v{}", env!("CARGO_PKG_VERSION"));

    let config = Config::load()?;
    run(config).await
}
