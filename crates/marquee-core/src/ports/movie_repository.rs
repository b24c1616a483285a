use async_trait::async_trait;

use crate::domain::{Movie, MovieId, MovieUpdate, ValidatedMovie};
use crate::ports::RepoError;

/// Port de persistencia de películas.
///
/// A movie write is all-or-nothing: the row and its genre/cast lists are
/// stored together or not at all. Cast references are not checked here.
#[async_trait]
pub trait MovieRepository: Send + Sync + 'static {
  async fn create(&self, movie: &ValidatedMovie) -> Result<Movie, RepoError>;
  async fn get(&self, id: MovieId) -> Result<Option<Movie>, RepoError>;
  async fn list(&self) -> Result<Vec<Movie>, RepoError>;
  async fn update(&self, id: MovieId, update: &MovieUpdate) -> Result<Option<Movie>, RepoError>;
  async fn delete(&self, id: MovieId) -> Result<MovieId, RepoError>;
}
