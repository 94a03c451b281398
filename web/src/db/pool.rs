use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use std::sync::OnceLock;

use crate::config::AppConfig;

static DB_POOL: OnceLock<PgPool> = OnceLock::new();

pub async fn init_pool(config: &AppConfig) -> Result<(), sqlx::Error> {
    let pool = PgPoolOptions::new()
        .max_connections(config.db_max_connections)
        .connect(&config.database_url)
        .await?;

    DB_POOL.set(pool).map_err(|_| {
        sqlx::Error::Configuration("Database pool already initialized".to_string().into())
    })?;

    Ok(())
}

/// Pool created by [`init_pool`]. Errors instead of panicking so a server
/// function called before startup reports a failure to its caller.
pub fn get_pool() -> Result<&'static PgPool, sqlx::Error> {
    DB_POOL.get().ok_or(sqlx::Error::PoolClosed)
}

/// Applies the SQL files in `web/migrations` that have not run yet.
pub async fn run_migrations() -> Result<(), sqlx::migrate::MigrateError> {
    let pool = get_pool()?;
    let dir = std::path::Path::new(env!("CARGO_MANIFEST_DIR")).join("migrations");
    sqlx::migrate::Migrator::new(dir).await?.run(pool).await
}
