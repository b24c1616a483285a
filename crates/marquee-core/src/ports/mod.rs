pub mod cast_lookup;
pub mod cast_repository;
pub mod movie_repository;

pub use cast_lookup::{CastLookup, LookupError};
pub use cast_repository::{CastRepository, RepoError};
pub use movie_repository::MovieRepository;
