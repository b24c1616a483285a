use axum::routing::get;
use axum::{Json, Router};
use serde_json::{Value, json};

pub(super) fn router() -> Router {
  Router::new().route("/health", get(health))
}

async fn health() -> Json<Value> {
  Json(json!({ "status": "ok" }))
}
