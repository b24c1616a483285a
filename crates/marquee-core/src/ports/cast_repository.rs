use async_trait::async_trait;

use crate::domain::{Cast, CastId, CastUpdate, NewCast};

#[derive(Debug, thiserror::Error)]
pub enum RepoError {
  #[error("connection pool error: {0}")]
  Pool(String),
  #[error("storage error: {0}")]
  Storage(String),
  #[error("blocking task failed: {0}")]
  Task(String),
}

/// Port de persistencia de casts.
///
/// Los ids los asigna el almacenamiento, son crecientes y nunca se
/// reutilizan. `get` devuelve `None` como centinela de "no encontrado";
/// `update` y `delete` asumen que quien llama ya comprobó la existencia.
#[async_trait]
pub trait CastRepository: Send + Sync + 'static {
  async fn create(&self, cast: &NewCast) -> Result<Cast, RepoError>;
  async fn get(&self, id: CastId) -> Result<Option<Cast>, RepoError>;
  async fn list(&self) -> Result<Vec<Cast>, RepoError>;
  /// Merges the supplied fields and returns the stored record, or `None` if
  /// the row vanished in between.
  async fn update(&self, id: CastId, update: &CastUpdate) -> Result<Option<Cast>, RepoError>;
  /// Unconditional removal.
  async fn delete(&self, id: CastId) -> Result<CastId, RepoError>;
}
