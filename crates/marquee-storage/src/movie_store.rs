use std::path::Path;

use async_trait::async_trait;
use diesel::prelude::*;
use diesel::sqlite::SqliteConnection;

use marquee_core::domain::{CastId, Movie, MovieId, MovieUpdate, ValidatedMovie};
use marquee_core::ports::{MovieRepository, RepoError};

use crate::StorageError;
use crate::config::StorageConfig;
use crate::models::{
  MovieCastRow, MovieChangeset, MovieGenreRow, MovieRow, NewMovieCastRow, NewMovieGenreRow, NewMovieRow,
};
use crate::pool::{MOVIE_MIGRATIONS, SqlitePool, open_pool, run_migrations, with_conn};
use crate::schema::{movie_casts, movie_genres, movies};

/// Películas en SQLite: una fila en `movies` más sus listas ordenadas en
/// `movie_genres` y `movie_casts`. Toda escritura va en una transacción.
#[derive(Clone)]
pub struct SqliteMovieStore {
  pool: SqlitePool,
}

impl SqliteMovieStore {
  pub fn new(pool: SqlitePool) -> Self {
    Self { pool }
  }

  pub fn open(database: &Path, cfg: &StorageConfig) -> Result<Self, StorageError> {
    let pool = open_pool(database, cfg)?;
    run_migrations(&pool, MOVIE_MIGRATIONS)?;
    Ok(Self::new(pool))
  }
}

fn assemble(row: MovieRow, genres: Vec<MovieGenreRow>, casts: Vec<MovieCastRow>) -> Movie {
  Movie {
    id: MovieId::new(row.id),
    name: row.name,
    plot: row.plot,
    genres: genres.into_iter().map(|g| g.genre).collect(),
    casts_id: casts.into_iter().map(|c| CastId::new(c.cast_id)).collect(),
  }
}

fn find_row(conn: &mut SqliteConnection, id: MovieId) -> QueryResult<Option<MovieRow>> {
  movies::table.find(id.get()).select(MovieRow::as_select()).first(conn).optional()
}

fn load_movie(conn: &mut SqliteConnection, row: MovieRow) -> QueryResult<Movie> {
  let genres = MovieGenreRow::belonging_to(&row)
    .select(MovieGenreRow::as_select())
    .order(movie_genres::position.asc())
    .load(conn)?;
  let casts = MovieCastRow::belonging_to(&row)
    .select(MovieCastRow::as_select())
    .order(movie_casts::position.asc())
    .load(conn)?;
  Ok(assemble(row, genres, casts))
}

fn replace_genres(conn: &mut SqliteConnection, movie_id: i64, genres: &[String]) -> QueryResult<()> {
  diesel::delete(movie_genres::table.filter(movie_genres::movie_id.eq(movie_id))).execute(conn)?;
  if genres.is_empty() {
    return Ok(());
  }

  let rows: Vec<_> = genres
    .iter()
    .enumerate()
    .map(|(position, genre)| NewMovieGenreRow { movie_id, position: position as i32, genre })
    .collect();
  diesel::insert_into(movie_genres::table).values(&rows).execute(conn)?;
  Ok(())
}

fn replace_casts(conn: &mut SqliteConnection, movie_id: i64, casts_id: &[CastId]) -> QueryResult<()> {
  diesel::delete(movie_casts::table.filter(movie_casts::movie_id.eq(movie_id))).execute(conn)?;
  if casts_id.is_empty() {
    return Ok(());
  }

  let rows: Vec<_> = casts_id
    .iter()
    .enumerate()
    .map(|(position, cast_id)| NewMovieCastRow { movie_id, position: position as i32, cast_id: cast_id.get() })
    .collect();
  diesel::insert_into(movie_casts::table).values(&rows).execute(conn)?;
  Ok(())
}

#[async_trait]
impl MovieRepository for SqliteMovieStore {
  async fn create(&self, movie: &ValidatedMovie) -> Result<Movie, RepoError> {
    let movie = movie.clone();

    with_conn(&self.pool, move |conn| {
      conn.transaction::<_, StorageError, _>(|conn| {
        let new = movie.movie();
        let row = diesel::insert_into(movies::table)
          .values(&NewMovieRow { name: &new.name, plot: &new.plot })
          .returning(MovieRow::as_returning())
          .get_result::<MovieRow>(conn)?;

        replace_genres(conn, row.id, &new.genres)?;
        replace_casts(conn, row.id, &new.casts_id)?;

        Ok(movie.into_movie(MovieId::new(row.id)))
      })
    })
    .await
  }

  async fn get(&self, id: MovieId) -> Result<Option<Movie>, RepoError> {
    with_conn(&self.pool, move |conn| {
      conn.transaction::<_, StorageError, _>(|conn| match find_row(conn, id)? {
        Some(row) => Ok(Some(load_movie(conn, row)?)),
        None => Ok(None),
      })
    })
    .await
  }

  async fn list(&self) -> Result<Vec<Movie>, RepoError> {
    with_conn(&self.pool, |conn| {
      conn.transaction::<_, StorageError, _>(|conn| {
        let rows = movies::table.order(movies::id.asc()).select(MovieRow::as_select()).load::<MovieRow>(conn)?;

        let genres = MovieGenreRow::belonging_to(&rows)
          .select(MovieGenreRow::as_select())
          .order((movie_genres::movie_id.asc(), movie_genres::position.asc()))
          .load::<MovieGenreRow>(conn)?
          .grouped_by(&rows);
        let casts = MovieCastRow::belonging_to(&rows)
          .select(MovieCastRow::as_select())
          .order((movie_casts::movie_id.asc(), movie_casts::position.asc()))
          .load::<MovieCastRow>(conn)?
          .grouped_by(&rows);

        Ok(
          rows
            .into_iter()
            .zip(genres)
            .zip(casts)
            .map(|((row, genres), casts)| assemble(row, genres, casts))
            .collect(),
        )
      })
    })
    .await
  }

  async fn update(&self, id: MovieId, update: &MovieUpdate) -> Result<Option<Movie>, RepoError> {
    let update = update.clone();

    with_conn(&self.pool, move |conn| {
      conn.transaction::<_, StorageError, _>(|conn| {
        if find_row(conn, id)?.is_none() {
          return Ok(None);
        }

        if update.name.is_some() || update.plot.is_some() {
          let changeset = MovieChangeset { name: update.name.as_deref(), plot: update.plot.as_deref() };
          diesel::update(movies::table.find(id.get())).set(&changeset).execute(conn)?;
        }
        if let Some(genres) = &update.genres {
          replace_genres(conn, id.get(), genres)?;
        }
        if let Some(casts_id) = &update.casts_id {
          replace_casts(conn, id.get(), casts_id)?;
        }

        match find_row(conn, id)? {
          Some(row) => Ok(Some(load_movie(conn, row)?)),
          None => Ok(None),
        }
      })
    })
    .await
  }

  async fn delete(&self, id: MovieId) -> Result<MovieId, RepoError> {
    with_conn(&self.pool, move |conn| {
      conn.transaction::<_, StorageError, _>(|conn| {
        diesel::delete(movie_genres::table.filter(movie_genres::movie_id.eq(id.get()))).execute(conn)?;
        diesel::delete(movie_casts::table.filter(movie_casts::movie_id.eq(id.get()))).execute(conn)?;
        diesel::delete(movies::table.find(id.get())).execute(conn)?;
        Ok(id)
      })
    })
    .await
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use marquee_core::ports::{CastLookup, LookupError};
  use marquee_core::services::MovieValidator;
  use serde_json::json;
  use tempfile::{TempDir, tempdir};

  struct EveryCast;

  #[async_trait]
  impl CastLookup for EveryCast {
    async fn exists(&self, _id: CastId) -> Result<bool, LookupError> {
      Ok(true)
    }
  }

  fn store() -> (TempDir, SqliteMovieStore) {
    let tmp = tempdir().unwrap();
    let store = SqliteMovieStore::open(&tmp.path().join("movies.db"), &StorageConfig::default()).unwrap();
    (tmp, store)
  }

  async fn validated(name: &str, genres: &[&str], casts: &[i64]) -> ValidatedMovie {
    let payload = json!({ "name": name, "plot": "A thief enters dreams.", "genres": genres, "casts_id": casts });
    MovieValidator::new(EveryCast).validate(&payload).await.unwrap()
  }

  #[tokio::test]
  async fn create_preserves_list_order() {
    let (_tmp, store) = store();

    let payload = validated("Inception", &["Thriller", "Sci-Fi", "Heist"], &[3, 1, 2]).await;
    let movie = store.create(&payload).await.unwrap();
    assert_eq!(movie.id, MovieId::new(1));

    let fetched = store.get(movie.id).await.unwrap().unwrap();
    assert_eq!(fetched, movie);
    assert_eq!(fetched.genres, vec!["Thriller", "Sci-Fi", "Heist"]);
    assert_eq!(fetched.casts_id, vec![CastId::new(3), CastId::new(1), CastId::new(2)]);
  }

  #[tokio::test]
  async fn cast_ids_keep_their_64_bit_value() {
    let (_tmp, store) = store();
    let movie = store.create(&validated("Inception", &[], &[3_000_000_000, i64::MAX]).await).await.unwrap();

    let fetched = store.get(movie.id).await.unwrap().unwrap();
    assert_eq!(fetched.casts_id, vec![CastId::new(3_000_000_000), CastId::new(i64::MAX)]);
  }

  #[tokio::test]
  async fn list_groups_children_per_movie() {
    let (_tmp, store) = store();
    let a = store.create(&validated("Inception", &["Sci-Fi"], &[1]).await).await.unwrap();
    let b = store.create(&validated("Matrix", &["Sci-Fi", "Action"], &[2, 3]).await).await.unwrap();
    let c = store.create(&validated("Empty", &[], &[]).await).await.unwrap();

    assert_eq!(store.list().await.unwrap(), vec![a, b, c]);
  }

  #[tokio::test]
  async fn update_replaces_only_supplied_fields() {
    let (_tmp, store) = store();
    let movie = store.create(&validated("Inception", &["Sci-Fi"], &[1]).await).await.unwrap();

    let update =
      MovieUpdate { plot: Some("New plot".into()), casts_id: Some(vec![CastId::new(9)]), ..Default::default() };
    let updated = store.update(movie.id, &update).await.unwrap().unwrap();

    assert_eq!(updated.name, "Inception");
    assert_eq!(updated.plot, "New plot");
    assert_eq!(updated.genres, vec!["Sci-Fi"]);
    assert_eq!(updated.casts_id, vec![CastId::new(9)]);
    assert_eq!(store.get(movie.id).await.unwrap(), Some(updated));
  }

  #[tokio::test]
  async fn update_unknown_movie_is_none() {
    let (_tmp, store) = store();
    let update = MovieUpdate { name: Some("x".into()), ..Default::default() };
    assert_eq!(store.update(MovieId::new(3), &update).await.unwrap(), None);
  }

  #[tokio::test]
  async fn delete_drops_children_and_never_reuses_the_id() {
    let (_tmp, store) = store();
    let first = store.create(&validated("Inception", &["Sci-Fi"], &[1]).await).await.unwrap();

    assert_eq!(store.delete(first.id).await.unwrap(), first.id);
    assert_eq!(store.get(first.id).await.unwrap(), None);

    let second = store.create(&validated("Matrix", &[], &[]).await).await.unwrap();
    assert!(second.id > first.id);
    assert_eq!(store.list().await.unwrap(), vec![second]);
  }
}
