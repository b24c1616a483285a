use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use marquee_core::domain::{Movie, MovieId};
use marquee_core::ports::{CastLookup, MovieRepository};
use marquee_core::services::MovieService;

use crate::error::ApiError;
use crate::extract::{IdPath, JsonBody};

type Service<R, L> = State<Arc<MovieService<R, L>>>;

/// 201 only after every cast id is confirmed; otherwise nothing is stored.
pub(super) async fn create<R: MovieRepository, L: CastLookup>(
  State(svc): Service<R, L>,
  JsonBody(payload): JsonBody,
) -> Result<(StatusCode, Json<Movie>), ApiError> {
  let movie = svc.create(&payload).await?;
  Ok((StatusCode::CREATED, Json(movie)))
}

pub(super) async fn list<R: MovieRepository, L: CastLookup>(
  State(svc): Service<R, L>,
) -> Result<Json<Vec<Movie>>, ApiError> {
  Ok(Json(svc.list().await?))
}

pub(super) async fn fetch<R: MovieRepository, L: CastLookup>(
  State(svc): Service<R, L>,
  IdPath(id): IdPath<MovieId>,
) -> Result<Json<Movie>, ApiError> {
  Ok(Json(svc.get(id).await?))
}

pub(super) async fn update<R: MovieRepository, L: CastLookup>(
  State(svc): Service<R, L>,
  IdPath(id): IdPath<MovieId>,
  body: Result<JsonBody, ApiError>,
) -> Result<Json<Movie>, ApiError> {
  let JsonBody(payload) = match body {
    Ok(body) => body,
    Err(err) => {
      svc.get(id).await?;
      return Err(err);
    }
  };
  Ok(Json(svc.update(id, &payload).await?))
}

pub(super) async fn remove<R: MovieRepository, L: CastLookup>(
  State(svc): Service<R, L>,
  IdPath(id): IdPath<MovieId>,
) -> Result<Json<MovieId>, ApiError> {
  Ok(Json(svc.delete(id).await?))
}
