use anyhow::Context;
use starter_api::config::ServerConfig;
use starter_api::logging;
use starter_api::router::build_app_router;
use starter_api::state::AppState;
use starter_db::PoolSettings;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = ServerConfig::from_env().context("Invalid configuration")?;
    logging::init(&config).context("Failed to initialise logging")?;

    let settings = PoolSettings {
        max_connections: config.db_max_connections,
        log_statements: config.is_development(),
        ..PoolSettings::default()
    };
    let pool = starter_db::create_pool(&config.database_url, &settings)
        .await
        .context("Failed to connect to database")?;
    tracing::info!("Database connection pool created");

    starter_db::health_check(&pool)
        .await
        .context("Database health check failed")?;
    tracing::info!("Database health check passed");

    starter_db::run_migrations(&pool)
        .await
        .context("Failed to run database migrations")?;
    tracing::info!("Database migrations applied");

    let listener = tokio::net::TcpListener::bind(config.bind_addr())
        .await
        .with_context(|| format!("Failed to bind {}:{}", config.host, config.port))?;
    let addr = listener.local_addr().context("Failed to read bound address")?;
    tracing::info!(
        app = %config.app_name,
        version = %config.app_version,
        environment = %config.environment,
        "Starting server on {addr}"
    );

    let app = build_app_router(AppState::new(pool.clone(), config));

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    pool.close().await;
    tracing::info!("Server shut down");
    Ok(())
}

/// Resolve on Ctrl+C, or SIGTERM on Unix.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl+C");
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
