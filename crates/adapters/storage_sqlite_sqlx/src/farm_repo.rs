//! `SQLite` implementation of [`FarmRepository`].

use std::future::Future;

use sqlx::sqlite::SqliteRow;
use sqlx::{FromRow, Row, SqlitePool};

use verdant_app::ports::FarmRepository;
use verdant_domain::error::VerdantError;
use verdant_domain::farm::Farm;
use verdant_domain::id::FarmId;

use crate::error::StorageError;
use crate::row;

/// Wrapper for converting database rows into domain [`Farm`].
struct Wrapper(Farm);

impl Wrapper {
    fn maybe(value: Option<Self>) -> Option<Farm> {
        value.map(|w| w.0)
    }
}

impl<'r> FromRow<'r, SqliteRow> for Wrapper {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        let id: i64 = row.try_get("id")?;
        let name: String = row.try_get("name")?;
        let location: Option<String> = row.try_get("location")?;
        let created_at: String = row.try_get("created_at")?;

        Ok(Self(Farm {
            id: FarmId::from_i64(id),
            name,
            location,
            created_at: row::timestamp(&created_at)?,
        }))
    }
}

const INSERT: &str = "INSERT INTO farms (name, location, created_at) VALUES (?, ?, ?)";
const SELECT_BY_ID: &str = "SELECT * FROM farms WHERE id = ?";
const SELECT_ALL: &str = "SELECT * FROM farms ORDER BY id";
const UPDATE: &str = "UPDATE farms SET name = ?, location = ? WHERE id = ?";
const DELETE_BY_ID: &str = "DELETE FROM farms WHERE id = ?";

/// `SQLite`-backed farm repository.
pub struct SqliteFarmRepository {
    pool: SqlitePool,
}

impl SqliteFarmRepository {
    /// Create a new repository using the given connection pool.
    #[must_use]
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

impl FarmRepository for SqliteFarmRepository {
    fn create(&self, mut farm: Farm) -> impl Future<Output = Result<Farm, VerdantError>> + Send {
        let pool = self.pool.clone();
        async move {
            let result = sqlx::query(INSERT)
                .bind(&farm.name)
                .bind(farm.location.as_deref())
                .bind(farm.created_at.to_rfc3339())
                .execute(&pool)
                .await
                .map_err(StorageError::from)?;

            farm.id = FarmId::from_i64(result.last_insert_rowid());
            Ok(farm)
        }
    }

    fn get_by_id(
        &self,
        id: FarmId,
    ) -> impl Future<Output = Result<Option<Farm>, VerdantError>> + Send {
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

    fn get_all(&self) -> impl Future<Output = Result<Vec<Farm>, VerdantError>> + Send {
        let pool = self.pool.clone();
        async move {
            let rows: Vec<Wrapper> = sqlx::query_as(SELECT_ALL)
                .fetch_all(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(rows.into_iter().map(|w| w.0).collect())
        }
    }

    fn update(&self, farm: Farm) -> impl Future<Output = Result<Farm, VerdantError>> + Send {
        let pool = self.pool.clone();
        async move {
            sqlx::query(UPDATE)
                .bind(&farm.name)
                .bind(farm.location.as_deref())
                .bind(farm.id.as_i64())
                .execute(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(farm)
        }
    }

    fn delete(&self, id: FarmId) -> impl Future<Output = Result<(), VerdantError>> + Send {
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
