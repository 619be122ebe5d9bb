use std::net::SocketAddr;
use std::time::Duration;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use blogserver_backend::{
    build_router,
    config::Config,
    db::connection::{create_pool, DbPool},
    repositories::session as session_repo,
    state::AppState,
};

const SESSION_CLEANUP_INTERVAL: Duration = Duration::from_secs(60 * 60);

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "blogserver_backend=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = Config::load()?;
    tracing::info!(
        database_url = %config.database_url,
        port = config.port,
        session_ttl_hours = config.session_ttl_hours,
        feed_page_size = config.feed_page_size,
        rate_limit_window_ms = config.rate_limit_window_ms,
        "Loaded configuration from environment/.env"
    );

    // Initialize database
    let pool: DbPool = create_pool(&config.database_url).await?;
    sqlx::migrate!("./migrations").run(&pool).await?;

    // Expired sessions age out in the background; access records go
    // with them via the foreign key.
    spawn_session_cleanup(pool.clone());

    let state = AppState::new(pool, config.clone());
    let app = build_router(state);

    // Start server
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!("Server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    // ConnectInfo feeds the per-IP key extractor on the auth routes.
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}

fn spawn_session_cleanup(pool: DbPool) {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(SESSION_CLEANUP_INTERVAL);
        loop {
            interval.tick().await;
            match session_repo::cleanup_expired_sessions(&pool).await {
                Ok(removed) if removed > 0 => {
                    tracing::info!(removed, "Cleaned up expired sessions")
                }
                Ok(_) => {}
                Err(err) => tracing::warn!("Session cleanup failed: {}", err),
            }
        }
    });
}
