//! `SQLite` implementation of [`FloorRepository`].

use std::future::Future;

use sqlx::sqlite::SqliteRow;
use sqlx::{FromRow, Row, SqlitePool};

use verdant_app::ports::FloorRepository;
use verdant_domain::error::VerdantError;
use verdant_domain::floor::Floor;
use verdant_domain::id::{FarmId, FloorId};

use crate::error::StorageError;
use crate::row;

/// Wrapper for converting database rows into domain [`Floor`].
struct Wrapper(Floor);

impl Wrapper {
    fn maybe(value: Option<Self>) -> Option<Floor> {
        value.map(|w| w.0)
    }
}

impl<'r> FromRow<'r, SqliteRow> for Wrapper {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        let id: i64 = row.try_get("id")?;
        let farm_id: i64 = row.try_get("farm_id")?;
        let name: String = row.try_get("name")?;
        let level: Option<i64> = row.try_get("level")?;
        let created_at: String = row.try_get("created_at")?;

        Ok(Self(Floor {
            id: FloorId::from_i64(id),
            farm_id: FarmId::from_i64(farm_id),
            name,
            level,
            created_at: row::timestamp(&created_at)?,
        }))
    }
}

const INSERT: &str = "INSERT INTO floors (farm_id, name, level, created_at) VALUES (?, ?, ?, ?)";
const SELECT_BY_ID: &str = "SELECT * FROM floors WHERE id = ?";
const SELECT_ALL: &str = "SELECT * FROM floors ORDER BY id";
const DELETE_BY_ID: &str = "DELETE FROM floors WHERE id = ?";

/// `SQLite`-backed floor repository.
pub struct SqliteFloorRepository {
    pool: SqlitePool,
}

impl SqliteFloorRepository {
    /// Create a new repository using the given connection pool.
    #[must_use]
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

impl FloorRepository for SqliteFloorRepository {
    fn create(&self, mut floor: Floor) -> impl Future<Output = Result<Floor, VerdantError>> + Send {
        let pool = self.pool.clone();
        async move {
            let result = sqlx::query(INSERT)
                .bind(floor.farm_id.as_i64())
                .bind(&floor.name)
                .bind(floor.level)
                .bind(floor.created_at.to_rfc3339())
                .execute(&pool)
                .await
                .map_err(StorageError::from)?;

            floor.id = FloorId::from_i64(result.last_insert_rowid());
            Ok(floor)
        }
    }

    fn get_by_id(
        &self,
        id: FloorId,
    ) -> impl Future<Output = Result<Option<Floor>, VerdantError>> + Send {
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

    fn get_all(&self) -> impl Future<Output = Result<Vec<Floor>, VerdantError>> + Send {
        let pool = self.pool.clone();
        async move {
            let rows: Vec<Wrapper> = sqlx::query_as(SELECT_ALL)
                .fetch_all(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(rows.into_iter().map(|w| w.0).collect())
        }
    }

    fn delete(&self, id: FloorId) -> impl Future<Output = Result<(), VerdantError>> + Send {
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
