//! HTTP client for the cast service's existence check.
//!
//! The movie service asks "does cast X exist" with a plain
//! `GET /api/v1/casts/{id}/` against the cast service:
//! - `200` means the cast exists
//! - `404` means it does not
//! - any other status (other 2xx included), a refused connection or a
//!   timeout means the question could not be answered, which is not the
//!   same as "absent"
//!
//! There is no retry and no caching; each call is one request bounded by the
//! configured timeout.

pub mod config;

pub use config::CastClientConfig;

use std::time::Duration;

use async_trait::async_trait;
use marquee_core::domain::CastId;
use marquee_core::ports::{CastLookup, LookupError};
use reqwest::{Client, StatusCode, Url};
use thiserror::Error;
use tracing::{debug, info};

#[derive(Debug, Error)]
pub enum ClientError {
  #[error("invalid cast service url {url:?}: {reason}")]
  InvalidUrl { url: String, reason: String },

  #[error("failed to build http client: {0}")]
  Build(#[from] reqwest::Error),
}

/// [`CastLookup`] backed by the cast service's REST API.
#[derive(Clone)]
pub struct HttpCastLookup {
  client: Client,
  base_url: Url,
}

impl HttpCastLookup {
  pub fn new(base_url: &str, timeout: Duration) -> Result<Self, ClientError> {
    let base_url = parse_base_url(base_url)?;
    let client = Client::builder().timeout(timeout).build()?;
    info!(%base_url, timeout_ms = timeout.as_millis() as u64, "cast lookup client ready");
    Ok(Self { client, base_url })
  }

  pub fn from_config(cfg: &CastClientConfig) -> Result<Self, ClientError> {
    Self::new(&cfg.base_url, cfg.timeout())
  }

  pub fn base_url(&self) -> &Url {
    &self.base_url
  }

  fn cast_url(&self, id: CastId) -> Result<Url, LookupError> {
    self.base_url.join(&format!("api/v1/casts/{id}/")).map_err(|e| LookupError::Unavailable(e.to_string()))
  }
}

/// `Url::join` drops the last path segment unless it ends in `/`, so a base
/// like `http://cast/svc` is normalized to `http://cast/svc/`.
fn parse_base_url(raw: &str) -> Result<Url, ClientError> {
  let invalid = |reason: String| ClientError::InvalidUrl { url: raw.to_string(), reason };

  let mut url = Url::parse(raw).map_err(|e| invalid(e.to_string()))?;
  if !matches!(url.scheme(), "http" | "https") {
    return Err(invalid(format!("unsupported scheme {}", url.scheme())));
  }
  if !url.path().ends_with('/') {
    let path = format!("{}/", url.path());
    url.set_path(&path);
  }
  Ok(url)
}

#[async_trait]
impl CastLookup for HttpCastLookup {
  async fn exists(&self, id: CastId) -> Result<bool, LookupError> {
    let url = self.cast_url(id)?;
    debug!(%url, "asking cast service");

    let resp = self.client.get(url).send().await.map_err(|e| {
      if e.is_timeout() {
        LookupError::Unavailable(format!("timed out: {e}"))
      } else {
        LookupError::Unavailable(e.to_string())
      }
    })?;

    match resp.status() {
      StatusCode::OK => Ok(true),
      StatusCode::NOT_FOUND => Ok(false),
      status => Err(LookupError::UnexpectedStatus(status.as_u16())),
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use axum::Router;
  use axum::extract::Path;
  use axum::http::StatusCode as AxumStatus;
  use axum::routing::get;
  use std::net::SocketAddr;

  async fn cast_status(Path(id): Path<i64>) -> AxumStatus {
    match id {
      1 | 2 => AxumStatus::OK,
      13 => AxumStatus::INTERNAL_SERVER_ERROR,
      14 => AxumStatus::NO_CONTENT,
      42 => {
        tokio::time::sleep(Duration::from_millis(500)).await;
        AxumStatus::OK
      }
      _ => AxumStatus::NOT_FOUND,
    }
  }

  async fn spawn_cast_service(prefix: &str) -> SocketAddr {
    let routes = Router::new().route("/api/v1/casts/{id}/", get(cast_status));
    let app = if prefix.is_empty() { routes } else { Router::new().nest(prefix, routes) };

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
      axum::serve(listener, app).await.unwrap();
    });
    addr
  }

  #[tokio::test]
  async fn maps_200_and_404() {
    let addr = spawn_cast_service("").await;
    let lookup = HttpCastLookup::new(&format!("http://{addr}"), Duration::from_secs(2)).unwrap();

    assert!(lookup.exists(CastId::new(1)).await.unwrap());
    assert!(!lookup.exists(CastId::new(999)).await.unwrap());
  }

  #[tokio::test]
  async fn other_statuses_are_errors_not_absence() {
    let addr = spawn_cast_service("").await;
    let lookup = HttpCastLookup::new(&format!("http://{addr}/"), Duration::from_secs(2)).unwrap();

    let err = lookup.exists(CastId::new(13)).await.unwrap_err();
    assert!(matches!(err, LookupError::UnexpectedStatus(500)));

    let err = lookup.exists(CastId::new(14)).await.unwrap_err();
    assert!(matches!(err, LookupError::UnexpectedStatus(204)));
  }

  #[tokio::test]
  async fn base_url_path_is_kept() {
    let addr = spawn_cast_service("/cast").await;
    let lookup = HttpCastLookup::new(&format!("http://{addr}/cast"), Duration::from_secs(2)).unwrap();

    assert_eq!(lookup.base_url().path(), "/cast/");
    assert!(lookup.exists(CastId::new(2)).await.unwrap());
  }

  #[tokio::test]
  async fn slow_answer_times_out() {
    let addr = spawn_cast_service("").await;
    let lookup = HttpCastLookup::new(&format!("http://{addr}"), Duration::from_millis(50)).unwrap();

    let err = lookup.exists(CastId::new(42)).await.unwrap_err();
    assert!(matches!(err, LookupError::Unavailable(_)));
  }

  #[tokio::test]
  async fn refused_connection_is_unavailable() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let lookup = HttpCastLookup::new(&format!("http://{addr}"), Duration::from_secs(2)).unwrap();
    let err = lookup.exists(CastId::new(1)).await.unwrap_err();
    assert!(matches!(err, LookupError::Unavailable(_)));
  }

  #[test]
  fn rejects_non_http_urls() {
    assert!(matches!(HttpCastLookup::new("ftp://cast", Duration::from_secs(1)), Err(ClientError::InvalidUrl { .. })));
    assert!(matches!(HttpCastLookup::new("not a url", Duration::from_secs(1)), Err(ClientError::InvalidUrl { .. })));
  }
}
