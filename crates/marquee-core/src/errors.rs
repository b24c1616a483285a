// crates/marquee-core/src/errors.rs
use std::fmt;

use thiserror::Error;

use crate::domain::CastId;
use crate::ports::{LookupError, RepoError};
use crate::schema::SchemaErrors;

/// Kind of record a not-found error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Entity {
  Cast,
  Movie,
}

impl fmt::Display for Entity {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Entity::Cast => f.write_str("Cast"),
      Entity::Movie => f.write_str("Movie"),
    }
  }
}

/// Error genérico del núcleo.
///
/// The HTTP layer maps each variant to a status code and a `detail` body;
/// nothing below this crate knows about HTTP.
#[derive(Debug, Error)]
pub enum CoreError {
  #[error(transparent)]
  Schema(#[from] SchemaErrors),

  #[error("{0} not found")]
  NotFound(Entity),

  /// A movie references a cast id the cast service does not know.
  #[error("Cast with given id:{0} not found")]
  CastNotFound(CastId),

  /// The cast service could not be asked at all.
  #[error("cast service unavailable: {0}")]
  DependencyUnavailable(#[from] LookupError),

  #[error("repository error: {0}")]
  Repository(String),
}

impl From<RepoError> for CoreError {
  fn from(err: RepoError) -> Self {
    CoreError::Repository(err.to_string())
  }
}
