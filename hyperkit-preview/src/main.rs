use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // Use JSON logs in production (HYPERKIT_LOG_JSON=1), human-readable otherwise
    let json_logs = std::env::var("HYPERKIT_LOG_JSON").unwrap_or_default() == "1";
    let filter = EnvFilter::from_default_env().add_directive("hyperkit_preview=info".parse()?);
    if json_logs {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .init();
    }

    let config = hyperkit_preview::config::ServerConfig::parse();
    tracing::info!(
        listen_addr = %config.listen_addr,
        retention_secs = config.retention_secs,
        max_projects = config.max_projects,
        "Starting hyperkit-preview"
    );

    let server = hyperkit_preview::server::Server::new(config);
    server.run().await
}
