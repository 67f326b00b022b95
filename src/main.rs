use wardbook::config::{self, StoreConfig};
use wardbook::Hospital;

#[tokio::main]
async fn main() {
    wardbook::init_tracing();
    tracing::info!("{} starting v{}", config::APP_NAME, config::APP_VERSION);

    if let Err(e) = run().await {
        tracing::error!(error = %e, "Wardbook failed");
        std::process::exit(1);
    }
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let config = StoreConfig::from_env()?;
    let hospital = Hospital::start(&config)?;

    let dashboard = hospital.dashboard().await?;
    println!("{}", serde_json::to_string_pretty(&dashboard)?);

    let stats = hospital.stats().await?;
    println!("{}", serde_json::to_string_pretty(&stats)?);

    hospital.shutdown().await?;
    Ok(())
}
