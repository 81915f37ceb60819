use tokio::net::TcpListener;
use zenn_mcp::{
    config::{Config, MCP_PATH},
    api::routes::create_router,
    logging::init_logging,
    AppState,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let logger = init_logging("zenn-mcp");

    // Load configuration
    let config = Config::load()?;
    let app_state = AppState::new(config, logger.clone());
    let server_addr = app_state.config.server_addr;
    logger.info(&format!(
        "Upstream {} (timeout {:?})",
        app_state.config.zenn_endpoint, app_state.config.http_timeout
    ));

    let app = create_router(app_state);
    let listener = TcpListener::bind(server_addr).await?;

    logger.info(&format!("Listening on http://{}{}", server_addr, MCP_PATH));
    axum::serve(listener, app).await?;

    Ok(())
}
