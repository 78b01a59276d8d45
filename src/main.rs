use anyhow::Result;
use city_weather_advisor::{AdvisorConfig, WeatherAdvisor};
use rmcp::ServiceExt;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "city_weather_advisor=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = AdvisorConfig::from_env()?;
    tracing::info!(
        geocoding = %config.geocoding_base_url,
        forecast = %config.forecast_base_url,
        locale = %config.locale,
        "Starting weather advisor MCP server"
    );

    let advisor = WeatherAdvisor::new(&config)?;
    let server = advisor.serve(rmcp::transport::stdio()).await?;
    server.waiting().await?;

    tracing::info!("Server shutdown complete");
    Ok(())
}
