//! Mapping from core errors to HTTP responses.
//!
//! | error | status | body |
//! |---|---|---|
//! | schema | 422 | `{"detail": [{"loc", "msg", "type"}, ...]}` |
//! | cast/movie not found | 404 | `{"detail": "Cast not found"}` |
//! | referenced cast missing | 404 | `{"detail": "Cast with given id:<id> not found"}` |
//! | cast service unreachable | 503 | `{"detail": "Cast service unavailable"}` |
//! | storage | 500 | `{"detail": "Internal server error"}` |

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use marquee_core::{CoreError, SchemaErrors};
use serde::Serialize;
use tracing::{error, warn};

#[derive(Serialize)]
struct Detail<T: Serialize> {
  detail: T,
}

#[derive(Debug)]
pub struct ApiError(CoreError);

impl ApiError {
  pub fn status(&self) -> StatusCode {
    match &self.0 {
      CoreError::Schema(_) => StatusCode::UNPROCESSABLE_ENTITY,
      CoreError::NotFound(_) | CoreError::CastNotFound(_) => StatusCode::NOT_FOUND,
      CoreError::DependencyUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
      CoreError::Repository(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
  }
}

impl From<CoreError> for ApiError {
  fn from(err: CoreError) -> Self {
    ApiError(err)
  }
}

impl From<SchemaErrors> for ApiError {
  fn from(errors: SchemaErrors) -> Self {
    ApiError(CoreError::Schema(errors))
  }
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    let status = self.status();

    match self.0 {
      CoreError::Schema(errors) => (status, Json(Detail { detail: errors.into_errors() })).into_response(),
      err @ (CoreError::NotFound(_) | CoreError::CastNotFound(_)) => {
        (status, Json(Detail { detail: err.to_string() })).into_response()
      }
      CoreError::DependencyUnavailable(err) => {
        warn!(error = %err, "cast service unavailable");
        (status, Json(Detail { detail: "Cast service unavailable" })).into_response()
      }
      CoreError::Repository(err) => {
        error!(error = %err, "storage failure");
        (status, Json(Detail { detail: "Internal server error" })).into_response()
      }
    }
  }
}
