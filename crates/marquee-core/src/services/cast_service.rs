use serde_json::Value;
use tracing::info;

use crate::domain::{Cast, CastId, CastUpdate, NewCast};
use crate::errors::{CoreError, Entity};
use crate::ports::CastRepository;
use crate::schema::FromPayload;

pub struct CastService<R>
where
  R: CastRepository,
{
  repo: R,
}

impl<R> CastService<R>
where
  R: CastRepository,
{
  pub fn new(repo: R) -> Self {
    Self { repo }
  }

  // -------- COMMAND (write) --------

  pub async fn create(&self, payload: &Value) -> Result<Cast, CoreError> {
    let new_cast = NewCast::from_payload(payload)?;
    let cast = self.repo.create(&new_cast).await?;
    info!(cast_id = %cast.id, name = %cast.name, "cast created");
    Ok(cast)
  }

  /// Partial update. An unknown id is reported before the payload is looked at.
  pub async fn update(&self, id: CastId, payload: &Value) -> Result<Cast, CoreError> {
    self.get(id).await?;
    let update = CastUpdate::from_payload(payload)?;
    let cast = self.repo.update(id, &update).await?.ok_or(CoreError::NotFound(Entity::Cast))?;
    info!(cast_id = %id, "cast updated");
    Ok(cast)
  }

  pub async fn delete(&self, id: CastId) -> Result<CastId, CoreError> {
    self.get(id).await?;
    let deleted = self.repo.delete(id).await?;
    info!(cast_id = %id, "cast deleted");
    Ok(deleted)
  }

  // -------- QUERY (read) --------

  pub async fn get(&self, id: CastId) -> Result<Cast, CoreError> {
    self.repo.get(id).await?.ok_or(CoreError::NotFound(Entity::Cast))
  }

  pub async fn list(&self) -> Result<Vec<Cast>, CoreError> {
    Ok(self.repo.list().await?)
  }
}
