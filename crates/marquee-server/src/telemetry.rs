use tokio::signal;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

/// `RUST_LOG` wins; otherwise `info` with the per-request spans of
/// `tower_http` kept at `debug`.
pub fn init_tracing() {
  let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info,tower_http=debug"));
  tracing_subscriber::fmt().with_env_filter(filter).with_target(false).compact().init();
}

/// Resolves on Ctrl+C or SIGTERM.
pub async fn shutdown_signal() {
  let ctrl_c = async {
    if let Err(err) = signal::ctrl_c().await {
      error!("failed to install Ctrl+C handler: {err}");
    }
  };

  #[cfg(unix)]
  let terminate = async {
    match signal::unix::signal(signal::unix::SignalKind::terminate()) {
      Ok(mut sig) => {
        sig.recv().await;
      }
      Err(err) => error!("failed to install SIGTERM handler: {err}"),
    }
  };

  #[cfg(not(unix))]
  let terminate = std::future::pending::<()>();

  tokio::select! {
    _ = ctrl_c => {},
    _ = terminate => {},
  }

  info!("shutdown signal received");
}
