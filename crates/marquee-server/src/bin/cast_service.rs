use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use marquee_config::{CONFIG_BACKEND, TomlConfigBackend};
use marquee_core::services::CastService;
use marquee_server::cast_app;
use marquee_server::config::CastServiceConfig;
use marquee_server::telemetry::{init_tracing, shutdown_signal};
use marquee_storage::{SqliteCastStore, StorageConfig};
use tokio::net::TcpListener;
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "cast-service", about = "Cast CRUD service")]
struct Args {
  /// Config file; defaults to marquee.toml in the user config dir.
  #[arg(long, env = "MARQUEE_CONFIG")]
  config: Option<PathBuf>,

  /// Listen address, e.g. 0.0.0.0:8000.
  #[arg(long)]
  bind: Option<String>,

  /// SQLite file (a `sqlite://` prefix is accepted).
  #[arg(long, env = "DATABASE_URI")]
  database: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
  init_tracing();
  let args = Args::parse();

  let backend = match &args.config {
    Some(path) => TomlConfigBackend::with_file(path),
    None => CONFIG_BACKEND.clone(),
  };

  let mut cfg = CastServiceConfig::load_from(&backend).context("loading [cast_service]")?;
  if let Some(bind) = args.bind {
    cfg.bind_addr = bind;
  }
  let database = cfg.database_path(args.database.as_deref());
  let storage = StorageConfig::load_from(&backend).context("loading [storage]")?;

  let store = SqliteCastStore::open(&database, &storage)
    .with_context(|| format!("opening cast database {}", database.display()))?;
  let app = cast_app(Arc::new(CastService::new(store)));

  let listener = TcpListener::bind(&cfg.bind_addr).await.with_context(|| format!("binding {}", cfg.bind_addr))?;
  info!(addr = %listener.local_addr()?, database = %database.display(), "cast service listening");

  axum::serve(listener, app).with_graceful_shutdown(shutdown_signal()).await?;
  Ok(())
}
