//! `SQLite` implementation of [`PotRepository`].

use std::future::Future;

use sqlx::sqlite::SqliteRow;
use sqlx::{FromRow, Row, SqlitePool};

use verdant_app::ports::PotRepository;
use verdant_domain::error::VerdantError;
use verdant_domain::id::{FloorId, PotId};
use verdant_domain::pot::Pot;

use crate::error::StorageError;
use crate::row;

/// Wrapper for converting database rows into domain [`Pot`].
struct Wrapper(Pot);

impl Wrapper {
    fn maybe(value: Option<Self>) -> Option<Pot> {
        value.map(|w| w.0)
    }
}

impl<'r> FromRow<'r, SqliteRow> for Wrapper {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        let id: i64 = row.try_get("id")?;
        let floor_id: i64 = row.try_get("floor_id")?;
        let location_code: String = row.try_get("location_code")?;
        let created_at: String = row.try_get("created_at")?;

        Ok(Self(Pot {
            id: PotId::from_i64(id),
            floor_id: FloorId::from_i64(floor_id),
            location_code,
            created_at: row::timestamp(&created_at)?,
        }))
    }
}

const INSERT: &str = "INSERT INTO pots (floor_id, location_code, created_at) VALUES (?, ?, ?)";
const SELECT_BY_ID: &str = "SELECT * FROM pots WHERE id = ?";
const SELECT_ALL: &str = "SELECT * FROM pots ORDER BY id";
const DELETE_BY_ID: &str = "DELETE FROM pots WHERE id = ?";

/// `SQLite`-backed pot repository.
pub struct SqlitePotRepository {
    pool: SqlitePool,
}

impl SqlitePotRepository {
    /// Create a new repository using the given connection pool.
    #[must_use]
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

impl PotRepository for SqlitePotRepository {
    fn create(&self, mut pot: Pot) -> impl Future<Output = Result<Pot, VerdantError>> + Send {
        let pool = self.pool.clone();
        async move {
            let result = sqlx::query(INSERT)
                .bind(pot.floor_id.as_i64())
                .bind(&pot.location_code)
                .bind(pot.created_at.to_rfc3339())
                .execute(&pool)
                .await
                .map_err(StorageError::from)?;

            pot.id = PotId::from_i64(result.last_insert_rowid());
            Ok(pot)
        }
    }

    fn get_by_id(
        &self,
        id: PotId,
    ) -> impl Future<Output = Result<Option<Pot>, VerdantError>> + Send {
        let pool = self.pool.clone();
        async move {
            let row: Option<Wrapper> = sqlx::query_as(SELECT_BY_ID)
                .bind(id.as_i64())
                .fetch_optional(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(Wrapper::maybe(row))
        }
    }

    fn get_all(&self) -> impl Future<Output = Result<Vec<Pot>, VerdantError>> + Send {
        let pool = self.pool.clone();
        async move {
            let rows: Vec<Wrapper> = sqlx::query_as(SELECT_ALL)
                .fetch_all(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(rows.into_iter().map(|w| w.0).collect())
        }
    }

    fn delete(&self, id: PotId) -> impl Future<Output = Result<(), VerdantError>> + Send {
        let pool = self.pool.clone();
        async move {
            sqlx::query(DELETE_BY_ID)
                .bind(id.as_i64())
                .execute(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(())
        }
    }
}
