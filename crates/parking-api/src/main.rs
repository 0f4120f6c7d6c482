//! Parking service API server entry point.

use std::sync::{Arc, Mutex};

use parking_api::config::{LogFormat, Settings};
use parking_api::error::AppError;
use parking_api::observability;
use parking_api::state::AppState;
use parking_core::clock::SystemClock;
use parking_core::rng::OsSeededRng;
use parking_store::{MIGRATOR, PgParkingLogRepository};
use tracing::{info, warn};

#[tokio::main]
async fn main() -> Result<(), AppError> {
    let tracer_provider =
        observability::init_tracing(LogFormat::from_env(), parking_api::SERVICE_NAME);

    info!("Starting parking service");

    let settings = Settings::from_env()?;
    info!(?settings, "configuration loaded");

    // Create database connection pool.
    let pool = settings
        .pool_options()
        .connect_with(settings.connect_options()?)
        .await?;

    MIGRATOR.run(&pool).await?;
    info!("database initialized");

    let app_state = AppState::new(
        settings.parking_lot(),
        settings.api_key.as_str(),
        Arc::new(SystemClock),
        Arc::new(Mutex::new(OsSeededRng::new())),
        Arc::new(PgParkingLogRepository::new(pool.clone())),
    );

    let app = parking_api::app(app_state);

    let addr = settings.socket_addr()?;
    info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Application shutdown");
    pool.close().await;

    if let Some(provider) = tracer_provider {
        if let Err(err) = provider.shutdown() {
            warn!(error = %err, "failed to flush trace exporter");
        }
    }

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            warn!(error = %err, "failed to listen for ctrl-c");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(err) => {
                warn!(error = %err, "failed to listen for SIGTERM");
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
}
