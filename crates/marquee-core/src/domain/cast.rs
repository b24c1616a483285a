use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::ids::CastId;
use crate::schema::{Fields, FromPayload, NAME_LENGTH, SchemaErrors};

/// Un miembro del reparto, tal como lo guarda el servicio de casts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cast {
  pub id: CastId,
  /// Entre 1 y 50 caracteres.
  pub name: String,
  pub nationality: Option<String>,
}

/// Payload de creación (`POST /api/v1/casts/`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCast {
  pub name: String,
  pub nationality: Option<String>,
}

impl NewCast {
  pub fn into_cast(self, id: CastId) -> Cast {
    Cast { id, name: self.name, nationality: self.nationality }
  }
}

impl FromPayload for NewCast {
  fn from_payload(payload: &Value) -> Result<Self, SchemaErrors> {
    let mut fields = Fields::of(payload)?;
    let name = fields.required_str("name", Some(NAME_LENGTH));
    let nationality = fields.optional_str("nationality", None);

    match name {
      Some(name) if fields.is_clean() => Ok(NewCast { name, nationality }),
      _ => Err(fields.into_errors()),
    }
  }
}

/// Partial update: only the supplied fields change.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CastUpdate {
  pub name: Option<String>,
  pub nationality: Option<String>,
}

impl CastUpdate {
  pub fn is_empty(&self) -> bool {
    self.name.is_none() && self.nationality.is_none()
  }

  /// Merges the supplied fields into `cast`.
  pub fn apply_to(&self, cast: &mut Cast) {
    if let Some(name) = &self.name {
      cast.name = name.clone();
    }
    if let Some(nationality) = &self.nationality {
      cast.nationality = Some(nationality.clone());
    }
  }
}

impl FromPayload for CastUpdate {
  fn from_payload(payload: &Value) -> Result<Self, SchemaErrors> {
    let mut fields = Fields::of(payload)?;
    let update = CastUpdate {
      name: fields.optional_str("name", Some(NAME_LENGTH)),
      nationality: fields.optional_str("nationality", None),
    };
    fields.into_result()?;
    Ok(update)
  }
}
