mod api;
mod middleware;

use std::sync::Arc;

use codetally_analyzer::Analyzer;
use tracing_subscriber::EnvFilter;

use crate::api::{build_app, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = codetally_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let pool = match config.database_url.as_deref() {
        Some(url) => {
            let pool_config = codetally_db::PoolConfig::from_app_config(&config);
            let pool = codetally_db::connect_pool(url, pool_config).await?;
            let applied = codetally_db::run_migrations(&pool).await?;
            tracing::info!(applied, "database migrations complete");
            Some(pool)
        }
        None => {
            tracing::warn!("DATABASE_URL not set; analysis history is disabled");
            None
        }
    };

    let analyzer = Arc::new(Analyzer::from_app_config(&config)?);
    let app = build_app(AppState { analyzer, pool }, &config.cors_allowed_origins);

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    tracing::info!(addr = %config.bind_addr, env = %config.env, "codetally server listening");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to listen for ctrl-c");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("received shutdown signal, starting graceful shutdown");
}
