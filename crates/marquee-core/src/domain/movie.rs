use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::ids::{CastId, MovieId};
use crate::schema::{Fields, FromPayload, NAME_LENGTH, SchemaErrors};

/// Una película persistida.
///
/// `casts_id` es una referencia "blanda": se valida contra el servicio de
/// casts al crear la película, pero nada impide que un cast se borre después.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Movie {
  pub id: MovieId,
  pub name: String,
  pub plot: String,
  /// Order is preserved exactly as supplied.
  pub genres: Vec<String>,
  /// Order is preserved exactly as supplied.
  pub casts_id: Vec<CastId>,
}

/// Payload de creación (`POST /api/v1/movies/`), ya validado estructuralmente
/// pero todavía sin comprobar las referencias a casts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewMovie {
  pub name: String,
  pub plot: String,
  pub genres: Vec<String>,
  pub casts_id: Vec<CastId>,
}

impl FromPayload for NewMovie {
  fn from_payload(payload: &Value) -> Result<Self, SchemaErrors> {
    let mut fields = Fields::of(payload)?;
    let name = fields.required_str("name", Some(NAME_LENGTH));
    let plot = fields.required_str("plot", None);
    let genres = fields.required_str_list("genres");
    let casts_id = fields.required_int_list::<CastId>("casts_id");

    match (name, plot, genres, casts_id) {
      (Some(name), Some(plot), Some(genres), Some(casts_id)) if fields.is_clean() => {
        Ok(NewMovie { name, plot, genres, casts_id })
      }
      _ => Err(fields.into_errors()),
    }
  }
}

/// A [`NewMovie`] whose every cast id resolved against the cast service.
///
/// Only the movie validator can build one, so the movie store never sees a
/// payload that skipped the existence check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedMovie(NewMovie);

impl ValidatedMovie {
  pub(crate) fn new(movie: NewMovie) -> Self {
    ValidatedMovie(movie)
  }

  pub fn movie(&self) -> &NewMovie {
    &self.0
  }

  pub fn into_movie(self, id: MovieId) -> Movie {
    let NewMovie { name, plot, genres, casts_id } = self.0;
    Movie { id, name, plot, genres, casts_id }
  }
}

/// Partial update (`PUT /api/v1/movies/{id}/`).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MovieUpdate {
  pub name: Option<String>,
  pub plot: Option<String>,
  pub genres: Option<Vec<String>>,
  pub casts_id: Option<Vec<CastId>>,
}

impl MovieUpdate {
  pub fn is_empty(&self) -> bool {
    self.name.is_none() && self.plot.is_none() && self.genres.is_none() && self.casts_id.is_none()
  }

  pub fn apply_to(&self, movie: &mut Movie) {
    if let Some(name) = &self.name {
      movie.name = name.clone();
    }
    if let Some(plot) = &self.plot {
      movie.plot = plot.clone();
    }
    if let Some(genres) = &self.genres {
      movie.genres = genres.clone();
    }
    if let Some(casts_id) = &self.casts_id {
      movie.casts_id = casts_id.clone();
    }
  }
}

impl FromPayload for MovieUpdate {
  fn from_payload(payload: &Value) -> Result<Self, SchemaErrors> {
    let mut fields = Fields::of(payload)?;
    let update = MovieUpdate {
      name: fields.optional_str("name", Some(NAME_LENGTH)),
      plot: fields.optional_str("plot", None),
      genres: fields.optional_str_list("genres"),
      casts_id: fields.optional_int_list::<CastId>("casts_id"),
    };
    fields.into_result()?;
    Ok(update)
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use serde_json::json;

  fn inception() -> Value {
    json!({
      "name": "Inception",
      "plot": "A thief enters dreams.",
      "genres": ["Sci-Fi", "Thriller"],
      "casts_id": [1, 2]
    })
  }

  #[test]
  fn new_movie_keeps_field_order() {
    let movie = NewMovie::from_payload(&inception()).unwrap();
    assert_eq!(movie.genres, vec!["Sci-Fi", "Thriller"]);
    assert_eq!(movie.casts_id, vec![CastId::new(1), CastId::new(2)]);
  }

  #[test]
  fn new_movie_reports_every_missing_field() {
    let err = NewMovie::from_payload(&json!({ "plot": "A thief enters dreams." })).unwrap_err();
    let missing: Vec<_> = err.errors().iter().filter(|e| e.kind == "missing").collect();
    assert_eq!(missing.len(), 3);
    assert!(err.errors()[0].mentions("name"));
  }

  #[test]
  fn empty_cast_list_is_structurally_valid() {
    let mut payload = inception();
    payload["casts_id"] = json!([]);
    let movie = NewMovie::from_payload(&payload).unwrap();
    assert!(movie.casts_id.is_empty());
  }

  #[test]
  fn movie_serializes_flat() {
    let movie = ValidatedMovie::new(NewMovie::from_payload(&inception()).unwrap()).into_movie(MovieId::new(7));
    let value = serde_json::to_value(&movie).unwrap();
    let mut expected = inception();
    expected["id"] = json!(7);
    assert_eq!(value, expected);
  }

  #[test]
  fn update_leaves_unsupplied_fields() {
    let mut movie = ValidatedMovie::new(NewMovie::from_payload(&inception()).unwrap()).into_movie(MovieId::new(1));
    let update = MovieUpdate::from_payload(&json!({ "name": "Inception Updated", "plot": "New plot" })).unwrap();
    update.apply_to(&mut movie);
    assert_eq!(movie.name, "Inception Updated");
    assert_eq!(movie.plot, "New plot");
    assert_eq!(movie.genres, vec!["Sci-Fi", "Thriller"]);
    assert_eq!(movie.casts_id, vec![CastId::new(1), CastId::new(2)]);
  }

  #[test]
  fn update_rejects_wrong_types() {
    let err = MovieUpdate::from_payload(&json!({ "genres": [1] })).unwrap_err();
    assert_eq!(err.errors()[0].kind, "string_type");
  }
}
