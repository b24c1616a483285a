pub mod cast;
pub mod ids;
pub mod movie;

pub use cast::{Cast, CastUpdate, NewCast};
pub use ids::{CastId, MovieId};
pub use movie::{Movie, MovieUpdate, NewMovie, ValidatedMovie};
