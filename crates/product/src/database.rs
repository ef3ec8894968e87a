use anyhow::Context;
use shared::{config::ConnectionPool, errors::RepositoryError};
use tracing::{error, info};

pub const CONNECT_ERROR_MESSAGE: &str = "Hubo un error al conectar la base de datos";

/// Checks connectivity and, when asked, applies the embedded migrations.
/// A failure is logged and reported as `false`; startup carries on so the
/// health and documentation routes stay reachable.
pub async fn connect_db(pool: &ConnectionPool, run_migrations: bool) -> bool {
    match try_connect(pool, run_migrations).await {
        Ok(()) => {
            info!("✅ Conexion exitosa a la base de datos");
            true
        }
        Err(e) => {
            error!("{CONNECT_ERROR_MESSAGE}: {e:#}");
            false
        }
    }
}

async fn try_connect(pool: &ConnectionPool, run_migrations: bool) -> anyhow::Result<()> {
    sqlx::query("SELECT 1")
        .execute(pool)
        .await
        .context("Database connectivity check failed")?;

    if run_migrations {
        sqlx::migrate!("./migrations")
            .run(pool)
            .await
            .context("Failed to run database migrations")?;
        info!("✅ Database migrations applied");
    }

    Ok(())
}

/// Empties the product table and restarts its id sequence.
pub async fn clear_products(pool: &ConnectionPool) -> Result<(), RepositoryError> {
    sqlx::query("TRUNCATE TABLE products RESTART IDENTITY")
        .execute(pool)
        .await
        .map_err(|e| {
            error!("❌ Failed to clear products: {:?}", e);
            RepositoryError::from(e)
        })?;

    Ok(())
}
