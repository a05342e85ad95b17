use landing_config::Config;
use landing_logging::log_error;
use tracing::info;

use crate::environment::Environment;

pub async fn serve(config: Config) -> anyhow::Result<()> {
    let Environment {
        server,
        webhook_worker,
    } = Environment::new(&config)?;

    let webhook_worker = match webhook_worker {
        Some(worker) => {
            info!("Forwarding submissions to the Discord webhook");
            Some(worker.spawn())
        }
        None => {
            info!("No Discord webhook configured, submissions will only be logged");
            None
        }
    };

    info!(
        "Starting http server on {}:{}",
        config.http.host, config.http.port
    );
    server
        .serve(config.http.host, config.http.port, shutdown_signal())
        .await?;

    // the server has dropped its queue handle, so the worker stops once the
    // remaining payloads are delivered
    if let Some(worker) = webhook_worker {
        info!("Waiting for pending webhook deliveries");
        worker.await?;
    }

    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        log_error("Failed to listen for the shutdown signal", &err.into());
        std::future::pending::<()>().await;
    }
    info!("Shutting down");
}
