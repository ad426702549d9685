use geopoint_server::utils::logger;
use geopoint_server::{Config, Server, ServerState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();

    let config = Config::from_env();

    if config.log_to_file {
        std::fs::create_dir_all(config.log_dir()).ok();
        logger::init_logger_with_file(Some(&config.log_level), Some(&config.log_dir()));
    } else {
        logger::init_logger_with_file(Some(&config.log_level), None);
    }

    tracing::info!("GeoPoint server starting...");

    let state = ServerState::initialize(&config).await?;
    let server = Server::new(config, state);

    if let Err(e) = server.run().await {
        tracing::error!("Server error: {}", e);
        return Err(e.into());
    }

    Ok(())
}

