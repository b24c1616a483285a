pub mod cast_store;
pub mod config;
pub mod models;
pub mod movie_store;
pub mod pool;
pub mod schema;

pub use cast_store::SqliteCastStore;
pub use config::StorageConfig;
pub use movie_store::SqliteMovieStore;
pub use pool::{CAST_MIGRATIONS, MOVIE_MIGRATIONS, SqlitePool, open_pool, run_migrations};

use marquee_core::ports::RepoError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StorageError {
  #[error("connection pool error: {0}")]
  Pool(#[from] diesel::r2d2::PoolError),

  #[error("migration error: {0}")]
  Migration(String),

  #[error("query error: {0}")]
  Query(#[from] diesel::result::Error),
}

impl From<StorageError> for RepoError {
  fn from(err: StorageError) -> Self {
    match err {
      StorageError::Pool(e) => RepoError::Pool(e.to_string()),
      StorageError::Migration(e) => RepoError::Storage(e),
      StorageError::Query(e) => RepoError::Storage(e.to_string()),
    }
  }
}
