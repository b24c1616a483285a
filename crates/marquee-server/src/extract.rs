use axum::body::Bytes;
use axum::extract::{FromRequest, FromRequestParts, Path, Request};
use axum::http::request::Parts;
use marquee_core::SchemaErrors;
use serde_json::Value;

use crate::error::ApiError;

/// Integer `{id}` path segment. A non-integer segment is a 422 at
/// `["path", "id"]`, not axum's plain-text 400.
#[derive(Debug, Clone, Copy)]
pub struct IdPath<T>(pub T);

impl<S, T> FromRequestParts<S> for IdPath<T>
where
  S: Send + Sync,
  T: From<i64> + Send,
{
  type Rejection = ApiError;

  async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
    let Path(raw) =
      Path::<String>::from_request_parts(parts, state).await.map_err(|_| SchemaErrors::invalid_path_id())?;
    let id = raw.trim().parse::<i64>().map_err(|_| SchemaErrors::invalid_path_id())?;
    Ok(IdPath(T::from(id)))
  }
}

/// Raw JSON body. Field checks happen later against the parsed value so every
/// violation in the payload is reported at once.
#[derive(Debug, Clone)]
pub struct JsonBody(pub Value);

impl<S> FromRequest<S> for JsonBody
where
  S: Send + Sync,
{
  type Rejection = ApiError;

  async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
    let bytes = Bytes::from_request(req, state).await.map_err(|e| SchemaErrors::invalid_json(e.body_text()))?;
    let value = serde_json::from_slice(&bytes).map_err(|e| SchemaErrors::invalid_json(e.to_string()))?;
    Ok(JsonBody(value))
  }
}

