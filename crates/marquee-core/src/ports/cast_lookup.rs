use async_trait::async_trait;

use crate::domain::CastId;

#[derive(Debug, thiserror::Error)]
pub enum LookupError {
  /// Connect failure, timeout or a broken response body.
  #[error("cast service unreachable: {0}")]
  Unavailable(String),
  #[error("cast service answered with unexpected status {0}")]
  UnexpectedStatus(u16),
}

/// Port de consulta de existencia de casts.
///
/// En producción es un GET al servicio de casts; en tests, cualquier
/// implementación en memoria. Se inyecta en `MovieService` por constructor.
#[async_trait]
pub trait CastLookup: Send + Sync + 'static {
  /// `Ok(false)` means the cast service answered "not found"; an `Err`
  /// means it could not be asked.
  async fn exists(&self, id: CastId) -> Result<bool, LookupError>;
}

#[async_trait]
impl<T: CastLookup + ?Sized> CastLookup for std::sync::Arc<T> {
  async fn exists(&self, id: CastId) -> Result<bool, LookupError> {
    (**self).exists(id).await
  }
}
