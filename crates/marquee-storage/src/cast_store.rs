use std::path::Path;

use async_trait::async_trait;
use diesel::prelude::*;

use marquee_core::domain::{Cast, CastId, CastUpdate, NewCast};
use marquee_core::ports::{CastRepository, RepoError};

use crate::StorageError;
use crate::config::StorageConfig;
use crate::models::{CastChangeset, CastRow, NewCastRow};
use crate::pool::{CAST_MIGRATIONS, SqlitePool, open_pool, run_migrations, with_conn};
use crate::schema::casts;

#[derive(Clone)]
pub struct SqliteCastStore {
  pool: SqlitePool,
}

impl SqliteCastStore {
  pub fn new(pool: SqlitePool) -> Self {
    Self { pool }
  }

  /// Opens (or creates) the cast database and applies pending migrations.
  pub fn open(database: &Path, cfg: &StorageConfig) -> Result<Self, StorageError> {
    let pool = open_pool(database, cfg)?;
    run_migrations(&pool, CAST_MIGRATIONS)?;
    Ok(Self::new(pool))
  }
}

fn row_to_cast(row: CastRow) -> Cast {
  Cast { id: CastId::new(row.id), name: row.name, nationality: row.nationality }
}

#[async_trait]
impl CastRepository for SqliteCastStore {
  async fn create(&self, cast: &NewCast) -> Result<Cast, RepoError> {
    let cast = cast.clone();

    with_conn(&self.pool, move |conn| {
      let row = diesel::insert_into(casts::table)
        .values(&NewCastRow { name: &cast.name, nationality: cast.nationality.as_deref() })
        .returning(CastRow::as_returning())
        .get_result(conn)?;
      Ok(row_to_cast(row))
    })
    .await
  }

  async fn get(&self, id: CastId) -> Result<Option<Cast>, RepoError> {
    with_conn(&self.pool, move |conn| {
      let row_opt =
        casts::table.find(id.get()).select(CastRow::as_select()).first::<CastRow>(conn).optional()?;
      Ok(row_opt.map(row_to_cast))
    })
    .await
  }

  async fn list(&self) -> Result<Vec<Cast>, RepoError> {
    with_conn(&self.pool, |conn| {
      let rows = casts::table.order(casts::id.asc()).select(CastRow::as_select()).load::<CastRow>(conn)?;
      Ok(rows.into_iter().map(row_to_cast).collect())
    })
    .await
  }

  async fn update(&self, id: CastId, update: &CastUpdate) -> Result<Option<Cast>, RepoError> {
    let update = update.clone();

    with_conn(&self.pool, move |conn| {
      // diesel rechaza un changeset vacío; sin cambios basta con releer la fila
      if update.is_empty() {
        let row_opt =
          casts::table.find(id.get()).select(CastRow::as_select()).first::<CastRow>(conn).optional()?;
        return Ok(row_opt.map(row_to_cast));
      }

      let changeset = CastChangeset { name: update.name.as_deref(), nationality: update.nationality.as_deref() };
      let row_opt = diesel::update(casts::table.find(id.get()))
        .set(&changeset)
        .returning(CastRow::as_returning())
        .get_result::<CastRow>(conn)
        .optional()?;
      Ok(row_opt.map(row_to_cast))
    })
    .await
  }

  async fn delete(&self, id: CastId) -> Result<CastId, RepoError> {
    with_conn(&self.pool, move |conn| {
      diesel::delete(casts::table.find(id.get())).execute(conn)?;
      Ok(id)
    })
    .await
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use tempfile::{TempDir, tempdir};

  fn store() -> (TempDir, SqliteCastStore) {
    let tmp = tempdir().unwrap();
    let store = SqliteCastStore::open(&tmp.path().join("casts.db"), &StorageConfig::default()).unwrap();
    (tmp, store)
  }

  fn john() -> NewCast {
    NewCast { name: "John Doe".into(), nationality: Some("USA".into()) }
  }

  #[tokio::test]
  async fn create_assigns_first_id_and_reads_back() {
    let (_tmp, store) = store();

    let cast = store.create(&john()).await.unwrap();
    assert_eq!(cast, Cast { id: CastId::new(1), name: "John Doe".into(), nationality: Some("USA".into()) });
    assert_eq!(store.get(cast.id).await.unwrap(), Some(cast.clone()));
    assert_eq!(store.get(cast.id).await.unwrap(), Some(cast));
  }

  #[tokio::test]
  async fn missing_id_is_none() {
    let (_tmp, store) = store();
    assert_eq!(store.get(CastId::new(999)).await.unwrap(), None);
  }

  #[tokio::test]
  async fn ids_grow_and_are_never_reused() {
    let (_tmp, store) = store();

    let first = store.create(&john()).await.unwrap();
    let second = store.create(&NewCast { name: "Jane".into(), nationality: None }).await.unwrap();
    assert!(second.id > first.id);

    store.delete(second.id).await.unwrap();
    let third = store.create(&john()).await.unwrap();
    assert!(third.id > second.id);

    let listed: Vec<_> = store.list().await.unwrap().into_iter().map(|c| c.id).collect();
    assert_eq!(listed, vec![first.id, third.id]);
  }

  #[tokio::test]
  async fn update_merges_and_empty_update_is_noop() {
    let (_tmp, store) = store();
    let cast = store.create(&john()).await.unwrap();

    let renamed =
      store.update(cast.id, &CastUpdate { name: Some("Johnny".into()), nationality: None }).await.unwrap().unwrap();
    assert_eq!(renamed.name, "Johnny");
    assert_eq!(renamed.nationality.as_deref(), Some("USA"));

    let same = store.update(cast.id, &CastUpdate::default()).await.unwrap().unwrap();
    assert_eq!(same, renamed);

    assert_eq!(store.update(CastId::new(77), &CastUpdate::default()).await.unwrap(), None);
  }

  #[tokio::test]
  async fn delete_is_unconditional() {
    let (_tmp, store) = store();
    assert_eq!(store.delete(CastId::new(5)).await.unwrap(), CastId::new(5));

    let cast = store.create(&john()).await.unwrap();
    store.delete(cast.id).await.unwrap();
    assert_eq!(store.get(cast.id).await.unwrap(), None);
  }
}
