use crate::schema::{casts, movie_casts, movie_genres, movies};

use diesel::prelude::*;
use diesel::sqlite::Sqlite;

#[derive(Debug, Queryable, Selectable)]
#[diesel(table_name = casts)]
#[diesel(check_for_backend(Sqlite))]
pub struct CastRow {
  pub id: i64,
  pub name: String,
  pub nationality: Option<String>,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = casts)]
pub struct NewCastRow<'a> {
  pub name: &'a str,
  pub nationality: Option<&'a str>,
}

/// `None` fields are left untouched by the UPDATE.
#[derive(Debug, AsChangeset)]
#[diesel(table_name = casts)]
pub struct CastChangeset<'a> {
  pub name: Option<&'a str>,
  pub nationality: Option<&'a str>,
}

#[derive(Debug, Queryable, Selectable, Identifiable)]
#[diesel(table_name = movies)]
#[diesel(check_for_backend(Sqlite))]
pub struct MovieRow {
  pub id: i64,
  pub name: String,
  pub plot: String,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = movies)]
pub struct NewMovieRow<'a> {
  pub name: &'a str,
  pub plot: &'a str,
}

#[derive(Debug, AsChangeset)]
#[diesel(table_name = movies)]
pub struct MovieChangeset<'a> {
  pub name: Option<&'a str>,
  pub plot: Option<&'a str>,
}

#[derive(Debug, Queryable, Selectable, Identifiable, Associations)]
#[diesel(table_name = movie_genres)]
#[diesel(belongs_to(MovieRow, foreign_key = movie_id))]
#[diesel(check_for_backend(Sqlite))]
pub struct MovieGenreRow {
  pub id: i64,
  pub movie_id: i64,
  pub position: i32,
  pub genre: String,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = movie_genres)]
pub struct NewMovieGenreRow<'a> {
  pub movie_id: i64,
  pub position: i32,
  pub genre: &'a str,
}

#[derive(Debug, Queryable, Selectable, Identifiable, Associations)]
#[diesel(table_name = movie_casts)]
#[diesel(belongs_to(MovieRow, foreign_key = movie_id))]
#[diesel(check_for_backend(Sqlite))]
pub struct MovieCastRow {
  pub id: i64,
  pub movie_id: i64,
  pub position: i32,
  pub cast_id: i64,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = movie_casts)]
pub struct NewMovieCastRow {
  pub movie_id: i64,
  pub position: i32,
  pub cast_id: i64,
}
