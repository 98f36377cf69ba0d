use anyhow::{Error, Result};
use campaign_service::{api::run_api_server, clients::database::DatabaseClient, config::Config};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Error> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = Config::load()?;
    let database = DatabaseClient::connect(&config.database_url())?;

    run_api_server(config, database).await
}
