use pizzeria_server::{Config, Server, ServerState, init_logger_with_file};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. Environment and logging
    dotenv::dotenv().ok();
    let config = Config::from_env();
    init_logger_with_file(config.log_dir().to_str());

    tracing::info!("Pizzeria server starting...");

    // 2. State (work dir, database, services)
    let state = ServerState::initialize(&config)
        .await
        .map_err(|e| anyhow::anyhow!("Initialization failed: {}", e))?;

    // 3. HTTP server
    let server = Server::with_state(config, state);
    server
        .run()
        .await
        .map_err(|e| anyhow::anyhow!("Server error: {}", e))?;

    Ok(())
}
