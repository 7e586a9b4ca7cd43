//! Backend entry-point: settings, migrations, pool, and the HTTP server.

mod server;

use diesel::Connection;
use diesel_migrations::{embed_migrations, EmbeddedMigrations, MigrationHarness};
use ortho_config::OrthoConfig as _;
use tracing::{info, warn};
use tracing_subscriber::{fmt, EnvFilter};

use backend::outbound::persistence::{DbPool, PoolConfig};
use server::{create_server, AppSettings, ServerConfig};

const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

fn run_migrations(database_url: &str) -> std::io::Result<()> {
    let mut conn = diesel::pg::PgConnection::establish(database_url)
        .map_err(|err| std::io::Error::other(format!("database connection failed: {err}")))?;
    let applied = conn
        .run_pending_migrations(MIGRATIONS)
        .map_err(|err| std::io::Error::other(format!("migrations failed: {err}")))?;
    info!(count = applied.len(), "migrations applied");
    Ok(())
}

/// Application bootstrap.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = AppSettings::load()
        .map_err(|err| std::io::Error::other(format!("configuration failed: {err}")))?;
    let bind_addr = settings
        .bind_addr()
        .map_err(|err| std::io::Error::other(format!("invalid bind address: {err}")))?;

    let database_url = settings.database_url().to_owned();
    tokio::task::spawn_blocking(move || run_migrations(&database_url))
        .await
        .map_err(|err| std::io::Error::other(format!("migration task failed: {err}")))??;

    let pool = DbPool::new(
        PoolConfig::new(settings.database_url()).with_max_size(settings.pool_max_size()),
    )
    .await
    .map_err(std::io::Error::other)?;

    let config = ServerConfig {
        bind_addr,
        db_pool: pool,
        upload_dir: settings.upload_dir(),
        token_ttl_minutes: settings.token_ttl_minutes(),
    };

    info!(addr = %config.bind_addr, "starting portal backend");
    create_server(&config)?.await
}
