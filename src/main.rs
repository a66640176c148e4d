//! scanbridge binary - HTTP endpoint in front of a document scanner

use scanbridge::ServerConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present, then configuration
    dotenvy::dotenv().ok();
    let config = ServerConfig::load()?;

    // Start server
    scanbridge::start_server(config).await?;

    Ok(())
}
