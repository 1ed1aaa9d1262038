use anyhow::{Context, Result};
use dish_advisor::{config, server};
use tracing::info;
use tracing_subscriber::{EnvFilter, filter::LevelFilter};

/// `RUST_LOG` wins over `server.logs.level`; either must name a plain level.
fn resolve_log_level(configured: &str, from_env: Option<String>) -> Result<String> {
    let level = from_env.unwrap_or_else(|| configured.to_string());
    level.parse::<LevelFilter>().with_context(|| {
        format!(
            "Invalid log level: '{}'. Valid levels: error, warn, info, debug, trace",
            level
        )
    })?;
    Ok(level)
}

fn init_tracing(level: &str) {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(level))
        .json()
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    // The API key check lives in config loading, so a missing
    // OPENAI_API_KEY stops the process before the page is served.
    let config = match config::load().await {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    let from_env = std::env::var("RUST_LOG").ok();
    let log_level = match resolve_log_level(&config.server.logs.level, from_env) {
        Ok(level) => level,
        Err(e) => {
            eprintln!("{:#}", e);
            std::process::exit(1);
        }
    };
    init_tracing(&log_level);

    info!(
        "Dish advisor listening on {}:{} (model {}, up to {} tokens per answer)",
        config.server.host, config.server.port, config.llm.model, config.llm.max_tokens
    );

    server::run(config).await?;

    Ok(())
}
