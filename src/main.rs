use fx_swing_trader::broker::OandaClient;
use fx_swing_trader::llm::LLMClient;
use fx_swing_trader::{AppConfig, TradePipeline};
use std::process::ExitCode;
use tracing::{error, info, info_span, Instrument};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
    // Setup Logging
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = tracing_subscriber::fmt().with_env_filter(filter).finish();
    tracing::subscriber::set_global_default(subscriber).expect("setting default subscriber failed");

    info!("Starting FX Swing Trader...");

    match run().await {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            error!("❌ {}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<bool, Box<dyn std::error::Error + Send + Sync>> {
    // Load Configuration
    let config = AppConfig::load()?;
    info!("Loaded Configuration: {:?}", config);

    let broker = OandaClient::new(&config.oanda, config.request_timeout_secs)?;
    info!(
        "Successfully connected to OANDA ({} environment).",
        config.oanda.environment
    );

    info!("Using LLM Model: {} ({})", config.llm.model, config.llm.base_url);
    let llm = LLMClient::new(&config.llm, config.request_timeout_secs);

    if config.dry_run {
        info!("🧪 Dry run enabled - the order will be built but not sent");
    }

    let run_id = uuid::Uuid::new_v4();
    let today = chrono::Utc::now().date_naive();
    let pipeline = TradePipeline::new(&broker, &llm, &config);
    let report = pipeline
        .run(today)
        .instrument(info_span!("run", %run_id))
        .await?;

    Ok(report.order_placed)
}
