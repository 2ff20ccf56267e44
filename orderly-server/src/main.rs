use orderly_server::{Config, Server, ServerState, init_logger, print_banner};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load .env file
    let _ = dotenvy::dotenv();

    // Initialize tracing
    init_logger();

    print_banner();

    tracing::info!("Orderly server starting...");

    // Load configuration
    let config = Config::from_env();

    // Initialize server state (store, queue manager, auth, assets)
    let state = ServerState::initialize(&config).await;

    // Start the HTTP server
    let server = Server::with_state(config, state);

    if let Err(e) = server.run().await {
        tracing::error!("Server error: {}", e);
        return Err(e);
    }

    Ok(())
}
