use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use marquee_cast_client::{CastClientConfig, HttpCastLookup};
use marquee_config::{CONFIG_BACKEND, TomlConfigBackend};
use marquee_core::services::MovieService;
use marquee_server::config::MovieServiceConfig;
use marquee_server::movie_app;
use marquee_server::telemetry::{init_tracing, shutdown_signal};
use marquee_storage::{SqliteMovieStore, StorageConfig};
use tokio::net::TcpListener;
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "movie-service", about = "Movie CRUD service backed by the cast service")]
struct Args {
  /// Config file; defaults to marquee.toml in the user config dir.
  #[arg(long, env = "MARQUEE_CONFIG")]
  config: Option<PathBuf>,

  /// Listen address, e.g. 0.0.0.0:8001.
  #[arg(long)]
  bind: Option<String>,

  /// SQLite file (a `sqlite://` prefix is accepted).
  #[arg(long, env = "DATABASE_URI")]
  database: Option<String>,

  /// Base URL of the cast service.
  #[arg(long, env = "CAST_SERVICE_HOST_URL")]
  cast_service_url: Option<String>,

  /// Upper bound for one cast existence check.
  #[arg(long)]
  lookup_timeout_ms: Option<u64>,
}

#[tokio::main]
async fn main() -> Result<()> {
  init_tracing();
  let args = Args::parse();

  let backend = match &args.config {
    Some(path) => TomlConfigBackend::with_file(path),
    None => CONFIG_BACKEND.clone(),
  };

  let mut cfg = MovieServiceConfig::load_from(&backend).context("loading [movie_service]")?;
  if let Some(bind) = args.bind {
    cfg.bind_addr = bind;
  }
  let database = cfg.database_path(args.database.as_deref());
  let storage = StorageConfig::load_from(&backend).context("loading [storage]")?;

  let mut client_cfg = CastClientConfig::load_from(&backend).context("loading [cast_client]")?;
  if let Some(url) = args.cast_service_url {
    client_cfg.base_url = url;
  }
  if let Some(timeout_ms) = args.lookup_timeout_ms {
    client_cfg.timeout_ms = timeout_ms;
  }

  let lookup = HttpCastLookup::from_config(&client_cfg).context("building cast lookup client")?;
  let store = SqliteMovieStore::open(&database, &storage)
    .with_context(|| format!("opening movie database {}", database.display()))?;
  let app = movie_app(Arc::new(MovieService::new(store, lookup)));

  let listener = TcpListener::bind(&cfg.bind_addr).await.with_context(|| format!("binding {}", cfg.bind_addr))?;
  info!(
    addr = %listener.local_addr()?,
    database = %database.display(),
    cast_service = %client_cfg.base_url,
    "movie service listening"
  );

  axum::serve(listener, app).with_graceful_shutdown(shutdown_signal()).await?;
  Ok(())
}
