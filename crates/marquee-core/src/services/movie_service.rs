use serde_json::Value;
use tracing::info;

use crate::domain::{Movie, MovieId, MovieUpdate};
use crate::errors::{CoreError, Entity};
use crate::ports::{CastLookup, MovieRepository};
use crate::schema::FromPayload;
use crate::services::movie_validator::MovieValidator;

/// Servicio de películas.
///
/// La consulta de casts se inyecta por constructor (`lookup`) para que los
/// tests puedan sustituirla sin tocar estado global.
pub struct MovieService<R, L>
where
  R: MovieRepository,
  L: CastLookup,
{
  repo: R,
  validator: MovieValidator<L>,
}

impl<R, L> MovieService<R, L>
where
  R: MovieRepository,
  L: CastLookup,
{
  pub fn new(repo: R, lookup: L) -> Self {
    Self { repo, validator: MovieValidator::new(lookup) }
  }

  // -------- COMMAND (write) --------

  /// Schema check, then every cast id against the cast service, then persist.
  /// Nothing is written unless all three succeed.
  pub async fn create(&self, payload: &Value) -> Result<Movie, CoreError> {
    let validated = self.validator.validate(payload).await?;
    let movie = self.repo.create(&validated).await?;
    info!(movie_id = %movie.id, name = %movie.name, casts = movie.casts_id.len(), "movie created");
    Ok(movie)
  }

  /// Partial update. Cast references in the payload are stored as given and
  /// are not checked against the cast service.
  pub async fn update(&self, id: MovieId, payload: &Value) -> Result<Movie, CoreError> {
    self.get(id).await?;
    let update = MovieUpdate::from_payload(payload)?;
    let movie = self.repo.update(id, &update).await?.ok_or(CoreError::NotFound(Entity::Movie))?;
    info!(movie_id = %id, "movie updated");
    Ok(movie)
  }

  pub async fn delete(&self, id: MovieId) -> Result<MovieId, CoreError> {
    self.get(id).await?;
    let deleted = self.repo.delete(id).await?;
    info!(movie_id = %id, "movie deleted");
    Ok(deleted)
  }

  // -------- QUERY (read) --------

  pub async fn get(&self, id: MovieId) -> Result<Movie, CoreError> {
    self.repo.get(id).await?.ok_or(CoreError::NotFound(Entity::Movie))
  }

  pub async fn list(&self) -> Result<Vec<Movie>, CoreError> {
    Ok(self.repo.list().await?)
  }

  pub fn validator(&self) -> &MovieValidator<L> {
    &self.validator
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::domain::{CastId, ValidatedMovie};
  use crate::ports::RepoError;
  use crate::services::movie_validator::tests::KnownCasts;
  use async_trait::async_trait;
  use serde_json::json;
  use std::collections::BTreeMap;
  use std::sync::Mutex;

  #[derive(Default)]
  struct InMemoryMovies {
    rows: Mutex<(i64, BTreeMap<MovieId, Movie>)>,
  }

  #[async_trait]
  impl MovieRepository for InMemoryMovies {
    async fn create(&self, movie: &ValidatedMovie) -> Result<Movie, RepoError> {
      let mut guard = self.rows.lock().unwrap();
      guard.0 += 1;
      let stored = movie.clone().into_movie(MovieId::new(guard.0));
      guard.1.insert(stored.id, stored.clone());
      Ok(stored)
    }

    async fn get(&self, id: MovieId) -> Result<Option<Movie>, RepoError> {
      Ok(self.rows.lock().unwrap().1.get(&id).cloned())
    }

    async fn list(&self) -> Result<Vec<Movie>, RepoError> {
      Ok(self.rows.lock().unwrap().1.values().cloned().collect())
    }

    async fn update(&self, id: MovieId, update: &MovieUpdate) -> Result<Option<Movie>, RepoError> {
      let mut guard = self.rows.lock().unwrap();
      Ok(guard.1.get_mut(&id).map(|movie| {
        update.apply_to(movie);
        movie.clone()
      }))
    }

    async fn delete(&self, id: MovieId) -> Result<MovieId, RepoError> {
      self.rows.lock().unwrap().1.remove(&id);
      Ok(id)
    }
  }

  fn inception(casts: &[i64]) -> Value {
    json!({
      "name": "Inception",
      "plot": "A thief enters dreams.",
      "genres": ["Sci-Fi", "Thriller"],
      "casts_id": casts,
    })
  }

  #[tokio::test]
  async fn create_then_get_round_trips_fields() {
    let service = MovieService::new(InMemoryMovies::default(), KnownCasts::new(&[1]));
    let created = service.create(&inception(&[1])).await.unwrap();
    let fetched = service.get(created.id).await.unwrap();

    assert_eq!(created, fetched);
    assert_eq!(fetched.casts_id, vec![CastId::new(1)]);
    assert_eq!(service.get(created.id).await.unwrap(), fetched);
  }

  #[tokio::test]
  async fn missing_cast_writes_nothing() {
    let service = MovieService::new(InMemoryMovies::default(), KnownCasts::new(&[1, 2]));
    let err = service.create(&inception(&[999])).await.unwrap_err();

    assert_eq!(err.to_string(), "Cast with given id:999 not found");
    assert!(service.list().await.unwrap().is_empty());
  }

  #[tokio::test]
  async fn unavailable_cast_service_writes_nothing() {
    let service = MovieService::new(InMemoryMovies::default(), KnownCasts::unreachable());
    let err = service.create(&inception(&[1])).await.unwrap_err();

    assert!(matches!(err, CoreError::DependencyUnavailable(_)));
    assert!(service.list().await.unwrap().is_empty());
  }

  #[tokio::test]
  async fn update_does_not_recheck_casts() {
    let service = MovieService::new(InMemoryMovies::default(), KnownCasts::new(&[1]));
    let created = service.create(&inception(&[1])).await.unwrap();
    let updated = service.update(created.id, &json!({ "casts_id": [404] })).await.unwrap();

    assert_eq!(updated.casts_id, vec![CastId::new(404)]);
    assert_eq!(updated.name, "Inception");
    assert_eq!(service.validator().lookup().asked(), vec![1]);
  }

  #[tokio::test]
  async fn update_and_delete_unknown_movie_are_not_found() {
    let service = MovieService::new(InMemoryMovies::default(), KnownCasts::new(&[]));

    for payload in [json!({ "name": "x" }), json!(null), json!({ "name": 5 })] {
      let err = service.update(MovieId::new(999), &payload).await.unwrap_err();
      assert!(matches!(err, CoreError::NotFound(Entity::Movie)));
    }
    assert!(matches!(service.delete(MovieId::new(999)).await, Err(CoreError::NotFound(Entity::Movie))));
  }

  #[tokio::test]
  async fn delete_removes_the_movie() {
    let service = MovieService::new(InMemoryMovies::default(), KnownCasts::new(&[]));
    let created = service.create(&inception(&[])).await.unwrap();

    assert_eq!(service.delete(created.id).await.unwrap(), created.id);
    assert!(matches!(service.get(created.id).await, Err(CoreError::NotFound(Entity::Movie))));
  }
}
