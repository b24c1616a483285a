pub mod cast_service;
pub mod movie_service;
pub mod movie_validator;

pub use cast_service::CastService;
pub use movie_service::MovieService;
pub use movie_validator::{MovieValidator, Rejection};
