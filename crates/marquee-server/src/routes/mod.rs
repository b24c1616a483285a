mod casts;
mod health;
mod movies;

use std::sync::Arc;

use axum::Router;
use axum::routing::{MethodRouter, get};
use marquee_core::ports::{CastLookup, CastRepository, MovieRepository};
use marquee_core::services::{CastService, MovieService};
use tower_http::trace::TraceLayer;

/// Registers `path` both with and without the trailing slash.
fn both_slashes<S>(router: Router<S>, path: &str, methods: MethodRouter<S>) -> Router<S>
where
  S: Clone + Send + Sync + 'static,
{
  let bare = path.trim_end_matches('/');
  router.route(path, methods.clone()).route(bare, methods)
}

pub fn cast_app<R>(service: Arc<CastService<R>>) -> Router
where
  R: CastRepository,
{
  let api = Router::new();
  let api = both_slashes(api, "/api/v1/casts/", get(casts::list::<R>).post(casts::create::<R>));
  let api = both_slashes(
    api,
    "/api/v1/casts/{id}/",
    get(casts::fetch::<R>).put(casts::update::<R>).delete(casts::remove::<R>),
  );

  api.with_state(service).merge(health::router()).layer(TraceLayer::new_for_http())
}

pub fn movie_app<R, L>(service: Arc<MovieService<R, L>>) -> Router
where
  R: MovieRepository,
  L: CastLookup,
{
  let api = Router::new();
  let api = both_slashes(api, "/api/v1/movies/", get(movies::list::<R, L>).post(movies::create::<R, L>));
  let api = both_slashes(
    api,
    "/api/v1/movies/{id}/",
    get(movies::fetch::<R, L>).put(movies::update::<R, L>).delete(movies::remove::<R, L>),
  );

  api.with_state(service).merge(health::router()).layer(TraceLayer::new_for_http())
}
