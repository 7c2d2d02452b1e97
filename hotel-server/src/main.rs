use hotel_server::{Config, Server, ServerState, init_logger_with_file, print_banner};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. Load configuration
    let config = Config::from_env();

    // 2. Set up logging (file output when the log dir exists)
    std::fs::create_dir_all(config.log_dir())?;
    init_logger_with_file(Some(&config.log_level), Some(&config.log_dir()));

    print_banner();
    tracing::info!("Hotel server starting...");

    // 3. Initialize shared state (database, migrations, locks)
    let state = ServerState::initialize(&config).await?;

    // 4. Run the HTTP server (spawns the reconciler)
    let server = Server::with_state(config, state);
    if let Err(e) = server.run().await {
        tracing::error!("Server error: {}", e);
        return Err(e.into());
    }

    Ok(())
}
