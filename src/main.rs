use anyhow::{Context, Result};
use clap::Parser;
use mmgateway::api::{self, AppState};
use mmgateway::artifacts::Sweeper;
use mmgateway::config::Config;
use mmgateway::gateway::Gateway;
use std::sync::Arc;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Debug, Parser)]
#[command(name = "mmgateway")]
#[command(about = "Multimodal generation gateway")]
struct CliArgs {
    /// Override the bind address (host:port) from the environment.
    #[arg(long, value_name = "ADDR")]
    bind: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "mmgateway=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting mmgateway");

    let args = CliArgs::parse();

    let mut config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };
    if let Some(bind) = args.bind {
        config.bind_addr = bind;
    }

    if config.admin_token.is_none() {
        info!("ADMIN_TOKEN not set; the artifact-wipe endpoint is disabled");
    }

    let gateway = Gateway::from_config(&config)?;
    let sweeper = Sweeper::start(gateway.artifacts().clone(), config.sweep_interval);

    let state = Arc::new(AppState {
        gateway,
        public_base_url: config.public_base_url.clone(),
        admin_token: config.admin_token.clone(),
        default_delivery: config.default_delivery,
    });

    let listener = tokio::net::TcpListener::bind(&config.bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.bind_addr))?;
    info!("Listening on {}", config.bind_addr);

    axum::serve(listener, api::router(state))
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            info!("Shutdown signal received");
        })
        .await
        .context("server error")?;

    sweeper.stop().await;
    info!("Shutdown complete");
    Ok(())
}
