use serde_json::Value;
use thiserror::Error;
use tracing::{debug, warn};

use crate::domain::{CastId, NewMovie, ValidatedMovie};
use crate::errors::CoreError;
use crate::ports::{CastLookup, LookupError};
use crate::schema::{FromPayload, SchemaErrors};

/// Why a movie payload was refused.
#[derive(Debug, Error)]
pub enum Rejection {
  #[error(transparent)]
  Schema(#[from] SchemaErrors),

  /// First referenced cast the cast service reported as absent.
  #[error("Cast with given id:{0} not found")]
  MissingCast(CastId),

  #[error(transparent)]
  Unavailable(#[from] LookupError),
}

impl From<Rejection> for CoreError {
  fn from(rejection: Rejection) -> Self {
    match rejection {
      Rejection::Schema(errors) => CoreError::Schema(errors),
      Rejection::MissingCast(id) => CoreError::CastNotFound(id),
      Rejection::Unavailable(err) => CoreError::DependencyUnavailable(err),
    }
  }
}

/// Comprueba un payload de película antes de persistirlo.
///
/// 1) estructura del payload (campos, tipos, longitud del nombre)
/// 2) existencia de cada cast referenciado, en el orden recibido, uno a uno
///
/// Se detiene en el primer cast inexistente; no acumula todos los que faltan.
pub struct MovieValidator<L> {
  lookup: L,
}

impl<L: CastLookup> MovieValidator<L> {
  pub fn new(lookup: L) -> Self {
    Self { lookup }
  }

  pub fn lookup(&self) -> &L {
    &self.lookup
  }

  pub async fn validate(&self, payload: &Value) -> Result<ValidatedMovie, Rejection> {
    let movie = NewMovie::from_payload(payload)?;
    self.resolve_casts(movie).await
  }

  /// Resolves every referenced cast id against the lookup.
  async fn resolve_casts(&self, movie: NewMovie) -> Result<ValidatedMovie, Rejection> {
    for &cast_id in &movie.casts_id {
      debug!(%cast_id, "checking cast existence");

      let present = self.lookup.exists(cast_id).await.inspect_err(|err| {
        warn!(%cast_id, error = %err, "cast lookup failed");
      })?;

      if !present {
        warn!(%cast_id, movie = %movie.name, "movie references unknown cast");
        return Err(Rejection::MissingCast(cast_id));
      }
    }

    Ok(ValidatedMovie::new(movie))
  }
}
