//! HTTP surface of the cast and movie services.
//!
//! ```text
//! cast-service   (default 0.0.0.0:8000)
//! ├── /api/v1/casts/        GET list · POST create
//! ├── /api/v1/casts/{id}/   GET · PUT · DELETE
//! └── /health
//!
//! movie-service  (default 0.0.0.0:8001)
//! ├── /api/v1/movies/       GET list · POST create (checks every cast id first)
//! ├── /api/v1/movies/{id}/  GET · PUT · DELETE
//! └── /health
//! ```
//!
//! Every route is also served without the trailing slash.

pub mod config;
pub mod error;
pub mod extract;
pub mod routes;
pub mod telemetry;

pub use error::ApiError;
pub use routes::{cast_app, movie_app};
