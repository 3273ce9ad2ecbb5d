mod cli;

use crate::cli::CLI;
use clap::Parser;
use tinylink_gateway::{App, AppState};
use tinylink_generator::HashGenerator;
use tinylink_shortener::ShortenerService;
use tinylink_storage::{Flusher, Store, StoreOptions};
use tokio::net::TcpListener;
use tracing::{error, info};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = CLI::try_parse()?;

    tinylink_telemetry::init(config.log_format)?;

    info!(
        listen_addr = %config.listen_addr,
        data_file = %config.data_file.display(),
        flush = %config.flush,
        "starting tinylink gateway"
    );

    let store = Store::open(
        StoreOptions::builder()
            .path(config.data_file.clone())
            .flush_policy(config.flush_policy())
            .build(),
    )?;

    let flusher = Flusher::spawn(&store);

    let service = ShortenerService::new(store.clone(), HashGenerator::new());
    let router = App::router(AppState::new(service));

    let listener = TcpListener::bind(config.listen_addr).await?;
    info!(addr = %listener.local_addr()?, "listening");

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("shutting down");
    if let Some(flusher) = flusher {
        flusher.stop().await;
    }

    let final_flush = tokio::task::spawn_blocking(move || store.flush()).await?;
    if let Err(e) = final_flush {
        error!(error = %e, "final flush failed");
        return Err(e.into());
    }

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!(error = %e, "failed to listen for ctrl-c");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                error!(error = %e, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
