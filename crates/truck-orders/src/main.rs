use resource_actor::tracing::setup_tracing;
use std::error::Error;
use tracing::info;
use truck_orders::config::Config;
use truck_orders::server::start_server;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    setup_tracing();

    info!("Starting food-truck order store");
    let config = Config::load()?;

    start_server(config).await?;

    info!("Application stopped");
    Ok(())
}
