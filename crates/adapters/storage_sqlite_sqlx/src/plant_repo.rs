//! `SQLite` implementation of [`PlantRepository`].

use std::future::Future;

use sqlx::sqlite::SqliteRow;
use sqlx::{FromRow, Row, SqlitePool};

use verdant_app::ports::PlantRepository;
use verdant_domain::error::VerdantError;
use verdant_domain::id::{PlantId, PotId};
use verdant_domain::plant::Plant;

use crate::error::StorageError;
use crate::row;

/// Wrapper for converting database rows into domain [`Plant`].
struct Wrapper(Plant);

impl Wrapper {
    fn maybe(value: Option<Self>) -> Option<Plant> {
        value.map(|w| w.0)
    }
}

impl<'r> FromRow<'r, SqliteRow> for Wrapper {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        let id: i64 = row.try_get("id")?;
        let pot_id: Option<i64> = row.try_get("pot_id")?;
        let qr_code: Option<String> = row.try_get("qr_code")?;
        let species: String = row.try_get("species")?;
        let variety: Option<String> = row.try_get("variety")?;
        let germination_date: Option<String> = row.try_get("germination_date")?;
        let planting_date: Option<String> = row.try_get("planting_date")?;
        let active: i64 = row.try_get("active")?;
        let created_at: String = row.try_get("created_at")?;

        Ok(Self(Plant {
            id: PlantId::from_i64(id),
            pot_id: pot_id.map(PotId::from_i64),
            qr_code,
            species,
            variety,
            germination_date: germination_date.as_deref().map(row::date).transpose()?,
            planting_date: planting_date.as_deref().map(row::date).transpose()?,
            active: active != 0,
            created_at: row::timestamp(&created_at)?,
        }))
    }
}

const INSERT: &str = "INSERT INTO plants (pot_id, qr_code, species, variety, germination_date, planting_date, active, created_at) VALUES (?, ?, ?, ?, ?, ?, ?, ?)";
const SELECT_BY_ID: &str = "SELECT * FROM plants WHERE id = ?";
const SELECT_BY_QR: &str = "SELECT * FROM plants WHERE qr_code = ?";
const SELECT_ALL: &str = "SELECT * FROM plants ORDER BY id";
const UPDATE: &str = "UPDATE plants SET pot_id = ?, qr_code = ?, species = ?, variety = ?, germination_date = ?, planting_date = ?, active = ? WHERE id = ?";
const DELETE_BY_ID: &str = "DELETE FROM plants WHERE id = ?";

/// `SQLite`-backed plant repository.
pub struct SqlitePlantRepository {
    pool: SqlitePool,
}

impl SqlitePlantRepository {
    /// Create a new repository using the given connection pool.
    #[must_use]
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

impl PlantRepository for SqlitePlantRepository {
    fn create(&self, mut plant: Plant) -> impl Future<Output = Result<Plant, VerdantError>> + Send {
        let pool = self.pool.clone();
        async move {
            let result = sqlx::query(INSERT)
                .bind(plant.pot_id.map(|id| id.as_i64()))
                .bind(plant.qr_code.as_deref())
                .bind(&plant.species)
                .bind(plant.variety.as_deref())
                .bind(plant.germination_date.map(|d| d.to_string()))
                .bind(plant.planting_date.map(|d| d.to_string()))
                .bind(i64::from(plant.active))
                .bind(plant.created_at.to_rfc3339())
                .execute(&pool)
                .await
                .map_err(StorageError::from)?;

            plant.id = PlantId::from_i64(result.last_insert_rowid());
            Ok(plant)
        }
    }

    fn get_by_id(
        &self,
        id: PlantId,
    ) -> impl Future<Output = Result<Option<Plant>, VerdantError>> + Send {
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

    fn get_all(&self) -> impl Future<Output = Result<Vec<Plant>, VerdantError>> + Send {
        let pool = self.pool.clone();
        async move {
            let rows: Vec<Wrapper> = sqlx::query_as(SELECT_ALL)
                .fetch_all(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(rows.into_iter().map(|w| w.0).collect())
        }
    }

    fn find_by_qr_code(
        &self,
        qr_code: &str,
    ) -> impl Future<Output = Result<Option<Plant>, VerdantError>> + Send {
        let pool = self.pool.clone();
        let qr_code = qr_code.to_string();
        async move {
            let row: Option<Wrapper> = sqlx::query_as(SELECT_BY_QR)
                .bind(qr_code)
                .fetch_optional(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(Wrapper::maybe(row))
        }
    }

    fn update(&self, plant: Plant) -> impl Future<Output = Result<Plant, VerdantError>> + Send {
        let pool = self.pool.clone();
        async move {
            sqlx::query(UPDATE)
                .bind(plant.pot_id.map(|id| id.as_i64()))
                .bind(plant.qr_code.as_deref())
                .bind(&plant.species)
                .bind(plant.variety.as_deref())
                .bind(plant.germination_date.map(|d| d.to_string()))
                .bind(plant.planting_date.map(|d| d.to_string()))
                .bind(i64::from(plant.active))
                .bind(plant.id.as_i64())
                .execute(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(plant)
        }
    }

    fn delete(&self, id: PlantId) -> impl Future<Output = Result<(), VerdantError>> + Send {
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
