use anyhow::{Context, Result};
use clap::Parser;
use dotenv::dotenv;
use product::{
    config::Config,
    database::{clear_products, connect_db},
    handler::AppRouter,
    state::AppState,
};
use shared::{
    config::ConnectionManager,
    utils::{Telemetry, init_logger},
};
use std::time::Duration;
use tracing::{error, info};

#[derive(Debug, Parser)]
#[command(name = "product", about = "Product catalogue REST API")]
struct Cli {
    /// Empty the products table, restart its id sequence and exit
    #[arg(long)]
    clear: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();

    let cli = Cli::parse();

    let config = Config::init().context("Failed to load configuration")?;

    let telemetry = match config.otel_endpoint.as_deref() {
        Some(endpoint) => Some(
            Telemetry::init("product-service", endpoint)
                .context("Failed to initialize telemetry")?,
        ),
        None => None,
    };

    let log_guard = init_logger(
        telemetry.as_ref().map(Telemetry::logger_provider),
        "product",
        config.is_dev,
        config.enable_file_log,
    )
    .context("Failed to initialize logger")?;

    let pool = ConnectionManager::new_pool(
        &config.database_url,
        config.db_max_conn,
        Duration::from_secs(5),
    )
    .context("Failed to create database pool")?;

    if cli.clear {
        let exit_code = match clear_products(&pool).await {
            Ok(()) => {
                info!("Datos eliminados correctamente");
                0
            }
            Err(e) => {
                error!("Failed to clear products: {e}");
                1
            }
        };

        if let Some(telemetry) = telemetry {
            telemetry.shutdown()?;
        }
        drop(log_guard);
        std::process::exit(exit_code);
    }

    connect_db(&pool, config.run_migrations).await;

    let state = AppState::new(pool, &config).context("Failed to create AppState")?;

    AppRouter::serve(config.port, state)
        .await
        .context("Failed to start server")?;

    info!("Shutting down servers...");

    if let Some(telemetry) = telemetry {
        telemetry.shutdown()?;
    }
    drop(log_guard);

    Ok(())
}
