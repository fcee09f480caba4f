use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use multidml_server::config::ServerConfig;
use multidml_server::router::build_router;
use multidml_server::salesforce::{authenticate, http_client, SalesforceClient};
use multidml_server::shutdown::shutdown_signal;
use multidml_server::state::AppState;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    let config = ServerConfig::load()?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level)),
        )
        .init();

    // Login failure is fatal: no route can do anything without a session.
    let http = http_client(&config.salesforce)?;
    let session = authenticate(&http, &config.salesforce).await?;

    let addr = format!("{}:{}", config.host, config.port);
    let state = AppState {
        crm: Arc::new(SalesforceClient::new(http, session)),
        config: Arc::new(config),
    };
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Server listening on {addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}
