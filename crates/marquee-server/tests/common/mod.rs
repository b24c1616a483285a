#![allow(dead_code)]

use std::sync::Arc;

use axum::Router;
use axum::body::{Body, to_bytes};
use axum::http::{Method, Request, StatusCode};
use marquee_core::services::CastService;
use marquee_server::cast_app;
use marquee_storage::{SqliteCastStore, StorageConfig};
use serde_json::Value;
use tempfile::TempDir;
use tower::ServiceExt;

pub async fn send(app: &Router, method: Method, uri: &str, body: Option<&str>) -> (StatusCode, Value) {
  let builder = Request::builder().method(method).uri(uri);
  let req = match body {
    Some(body) => builder.header("content-type", "application/json").body(Body::from(body.to_string())),
    None => builder.body(Body::empty()),
  }
  .unwrap();

  let resp = app.clone().oneshot(req).await.unwrap();
  let status = resp.status();
  let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
  let json = if bytes.is_empty() { Value::Null } else { serde_json::from_slice(&bytes).unwrap() };
  (status, json)
}

pub async fn get(app: &Router, uri: &str) -> (StatusCode, Value) {
  send(app, Method::GET, uri, None).await
}

pub async fn post(app: &Router, uri: &str, body: &Value) -> (StatusCode, Value) {
  send(app, Method::POST, uri, Some(&body.to_string())).await
}

pub async fn put(app: &Router, uri: &str, body: &Value) -> (StatusCode, Value) {
  send(app, Method::PUT, uri, Some(&body.to_string())).await
}

pub async fn delete(app: &Router, uri: &str) -> (StatusCode, Value) {
  send(app, Method::DELETE, uri, None).await
}

/// Cast service over a fresh SQLite file. Keep the `TempDir` alive for the
/// duration of the test.
pub fn cast_service() -> (TempDir, Router) {
  let tmp = tempfile::tempdir().unwrap();
  let store = SqliteCastStore::open(&tmp.path().join("casts.db"), &StorageConfig::default()).unwrap();
  (tmp, cast_app(Arc::new(CastService::new(store))))
}

/// `loc` of every 422 entry, e.g. `[["body", "name"]]`.
pub fn error_locs(body: &Value) -> Vec<Value> {
  body["detail"].as_array().unwrap().iter().map(|e| e["loc"].clone()).collect()
}
