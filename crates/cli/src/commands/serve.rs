//! `pegwise serve` — Start the HTTP arbitration server.

use pegwise_config::AppConfig;

pub async fn run(port_override: Option<u16>) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = AppConfig::load().map_err(|e| format!("Failed to load config: {e}"))?;

    if let Some(port) = port_override {
        config.gateway.port = port;
    }

    // Missing credential aborts here, before the listener binds
    config.require_api_key()?;

    println!("🗼 Pegwise");
    println!("   Listening: {}:{}", config.gateway.host, config.gateway.port);
    println!("   Model: {}", config.model);
    println!("   Move budget: {}", config.max_moves);

    pegwise_gateway::start(config).await?;

    Ok(())
}
