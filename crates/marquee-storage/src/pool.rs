use std::path::Path;
use std::time::Duration;

use diesel::connection::SimpleConnection;
use diesel::r2d2::{ConnectionManager, CustomizeConnection, Pool};
use diesel::sqlite::SqliteConnection;
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};
use marquee_core::ports::RepoError;
use tracing::{debug, info};

use crate::StorageError;
use crate::config::StorageConfig;

pub type SqlitePool = Pool<ConnectionManager<SqliteConnection>>;

/// Cada servicio tiene su propia base de datos y su propio juego de migraciones.
pub const CAST_MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations/casts");
pub const MOVIE_MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations/movies");

#[derive(Debug)]
struct ConnectionOptions {
  busy_timeout_ms: u64,
  journal_mode: Option<String>,
}

impl CustomizeConnection<SqliteConnection, diesel::r2d2::Error> for ConnectionOptions {
  fn on_acquire(&self, conn: &mut SqliteConnection) -> Result<(), diesel::r2d2::Error> {
    let mut pragmas = format!("PRAGMA busy_timeout = {}; PRAGMA foreign_keys = ON;", self.busy_timeout_ms);
    if let Some(mode) = &self.journal_mode {
      pragmas.push_str(&format!(" PRAGMA journal_mode = {mode};"));
    }
    conn.batch_execute(&pragmas).map_err(diesel::r2d2::Error::QueryError)
  }
}

/// Builds the connection pool for one SQLite file. The pool is owned by the
/// caller and handed to the store that uses it.
pub fn open_pool(database: &Path, cfg: &StorageConfig) -> Result<SqlitePool, StorageError> {
  let url = database.to_string_lossy().into_owned();
  let manager = ConnectionManager::<SqliteConnection>::new(url);

  let pool = Pool::builder()
    .max_size(cfg.pool_size.max(1))
    .connection_timeout(Duration::from_millis(cfg.busy_timeout_ms.max(1)))
    .connection_customizer(Box::new(ConnectionOptions {
      busy_timeout_ms: cfg.busy_timeout_ms,
      journal_mode: cfg.journal_mode().map(str::to_owned),
    }))
    .build(manager)?;

  info!(database = %database.display(), pool_size = cfg.pool_size, "sqlite pool ready");
  Ok(pool)
}

pub fn run_migrations(pool: &SqlitePool, migrations: EmbeddedMigrations) -> Result<(), StorageError> {
  let mut conn = pool.get()?;
  let applied = conn.run_pending_migrations(migrations).map_err(|e| StorageError::Migration(e.to_string()))?;
  for version in &applied {
    debug!(%version, "migration applied");
  }
  Ok(())
}

/// Runs a diesel closure on the blocking pool so the async runtime never
/// waits on SQLite.
pub(crate) async fn with_conn<T, F>(pool: &SqlitePool, f: F) -> Result<T, RepoError>
where
  F: FnOnce(&mut SqliteConnection) -> Result<T, StorageError> + Send + 'static,
  T: Send + 'static,
{
  let pool = pool.clone();
  tokio::task::spawn_blocking(move || {
    let mut conn = pool.get()?;
    f(&mut *conn)
  })
  .await
  .map_err(|e| RepoError::Task(e.to_string()))?
  .map_err(RepoError::from)
}
