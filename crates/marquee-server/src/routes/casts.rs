use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use marquee_core::domain::{Cast, CastId};
use marquee_core::ports::CastRepository;
use marquee_core::services::CastService;

use crate::error::ApiError;
use crate::extract::{IdPath, JsonBody};

type Service<R> = State<Arc<CastService<R>>>;

pub(super) async fn create<R: CastRepository>(
  State(svc): Service<R>,
  JsonBody(payload): JsonBody,
) -> Result<(StatusCode, Json<Cast>), ApiError> {
  let cast = svc.create(&payload).await?;
  Ok((StatusCode::CREATED, Json(cast)))
}

pub(super) async fn list<R: CastRepository>(State(svc): Service<R>) -> Result<Json<Vec<Cast>>, ApiError> {
  Ok(Json(svc.list().await?))
}

pub(super) async fn fetch<R: CastRepository>(
  State(svc): Service<R>,
  IdPath(id): IdPath<CastId>,
) -> Result<Json<Cast>, ApiError> {
  Ok(Json(svc.get(id).await?))
}

/// An unknown id wins over an unreadable body.
pub(super) async fn update<R: CastRepository>(
  State(svc): Service<R>,
  IdPath(id): IdPath<CastId>,
  body: Result<JsonBody, ApiError>,
) -> Result<Json<Cast>, ApiError> {
  let JsonBody(payload) = match body {
    Ok(body) => body,
    Err(err) => {
      svc.get(id).await?;
      return Err(err);
    }
  };
  Ok(Json(svc.update(id, &payload).await?))
}

pub(super) async fn remove<R: CastRepository>(
  State(svc): Service<R>,
  IdPath(id): IdPath<CastId>,
) -> Result<Json<CastId>, ApiError> {
  Ok(Json(svc.delete(id).await?))
}
