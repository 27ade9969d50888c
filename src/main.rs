//! Competition Registry - Application Entry Point

use std::net::SocketAddr;

use anyhow::Context;
use redis::Client as RedisClient;
use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use competition_registry::{
    config::{LogFormat, CONFIG},
    create_router, db,
    services::{KeepAliveService, UserService},
    state::AppState,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| CONFIG.server.rust_log.clone().into());
    let registry = tracing_subscriber::registry().with(filter);
    match CONFIG.server.log_format {
        LogFormat::Json => registry.with(tracing_subscriber::fmt::layer().json()).init(),
        LogFormat::Pretty => registry.with(tracing_subscriber::fmt::layer()).init(),
    }

    tracing::info!("Starting Competition Registry server...");

    tracing::info!("Connecting to database...");
    let db_pool = db::create_pool(&CONFIG.database)
        .await
        .context("failed to connect to database")?;

    tracing::info!("Running database migrations...");
    db::run_migrations(&db_pool).await?;

    UserService::seed_admin(&db_pool, &CONFIG.seed)
        .await
        .context("failed to seed administrator")?;

    tracing::info!("Connecting to Redis...");
    let redis_client = RedisClient::open(CONFIG.redis.url.as_str())?;
    let redis_conn = redis::aio::ConnectionManager::new(redis_client).await?;

    KeepAliveService::spawn(db_pool.clone(), CONFIG.keep_alive.interval);

    let state = AppState::new(db_pool, redis_conn, CONFIG.clone());
    let app = create_router(state);

    let addr = SocketAddr::new(CONFIG.server.host.parse()?, CONFIG.server.port);
    let listener = TcpListener::bind(addr).await?;

    tracing::info!("Server listening on http://{}", addr);

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}
