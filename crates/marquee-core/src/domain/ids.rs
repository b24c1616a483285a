use serde::{Deserialize, Serialize};
use std::fmt;

/// Identificador de un miembro del reparto (`Cast`).
///
/// Lo asigna el almacenamiento al crear el registro; es monótono y nunca se
/// reutiliza, incluso después de borrar el registro.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CastId(i64);

impl CastId {
  pub const fn new(raw: i64) -> Self {
    CastId(raw)
  }

  pub const fn get(self) -> i64 {
    self.0
  }
}

impl From<i64> for CastId {
  fn from(raw: i64) -> Self {
    CastId(raw)
  }
}

impl From<CastId> for i64 {
  fn from(id: CastId) -> Self {
    id.0
  }
}

impl fmt::Display for CastId {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    self.0.fmt(f)
  }
}

/// Identificador de una película (`Movie`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MovieId(i64);

impl MovieId {
  pub const fn new(raw: i64) -> Self {
    MovieId(raw)
  }

  pub const fn get(self) -> i64 {
    self.0
  }
}

impl From<i64> for MovieId {
  fn from(raw: i64) -> Self {
    MovieId(raw)
  }
}

impl From<MovieId> for i64 {
  fn from(id: MovieId) -> Self {
    id.0
  }
}

impl fmt::Display for MovieId {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    self.0.fmt(f)
  }
}
