//! `SQLite` implementation of [`HarvestRepository`].

use std::future::Future;

use sqlx::sqlite::SqliteRow;
use sqlx::{FromRow, Row, SqlitePool};

use verdant_app::ports::HarvestRepository;
use verdant_domain::error::VerdantError;
use verdant_domain::harvest::Harvest;
use verdant_domain::id::{HarvestId, PlantId};

use crate::error::StorageError;
use crate::row;

/// Wrapper for converting database rows into domain [`Harvest`].
struct Wrapper(Harvest);

impl Wrapper {
    fn maybe(value: Option<Self>) -> Option<Harvest> {
        value.map(|w| w.0)
    }
}

impl<'r> FromRow<'r, SqliteRow> for Wrapper {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        let id: i64 = row.try_get("id")?;
        let plant_id: i64 = row.try_get("plant_id")?;
        let harvest_date: String = row.try_get("harvest_date")?;
        let yield_weight: Option<f64> = row.try_get("yield_weight")?;
        let created_at: String = row.try_get("created_at")?;

        Ok(Self(Harvest {
            id: HarvestId::from_i64(id),
            plant_id: PlantId::from_i64(plant_id),
            harvest_date: row::date(&harvest_date)?,
            yield_weight,
            created_at: row::timestamp(&created_at)?,
        }))
    }
}

const INSERT: &str =
    "INSERT INTO harvests (plant_id, harvest_date, yield_weight, created_at) VALUES (?, ?, ?, ?)";
const SELECT_BY_ID: &str = "SELECT * FROM harvests WHERE id = ?";
const SELECT_ALL: &str = "SELECT * FROM harvests ORDER BY id";
const DELETE_BY_ID: &str = "DELETE FROM harvests WHERE id = ?";

/// `SQLite`-backed harvest repository.
pub struct SqliteHarvestRepository {
    pool: SqlitePool,
}

impl SqliteHarvestRepository {
    /// Create a new repository using the given connection pool.
    #[must_use]
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

impl HarvestRepository for SqliteHarvestRepository {
    fn create(
        &self,
        mut harvest: Harvest,
    ) -> impl Future<Output = Result<Harvest, VerdantError>> + Send {
        let pool = self.pool.clone();
        async move {
            let result = sqlx::query(INSERT)
                .bind(harvest.plant_id.as_i64())
                .bind(harvest.harvest_date.to_string())
                .bind(harvest.yield_weight)
                .bind(harvest.created_at.to_rfc3339())
                .execute(&pool)
                .await
                .map_err(StorageError::from)?;

            harvest.id = HarvestId::from_i64(result.last_insert_rowid());
            Ok(harvest)
        }
    }

    fn get_by_id(
        &self,
        id: HarvestId,
    ) -> impl Future<Output = Result<Option<Harvest>, VerdantError>> + Send {
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

    fn get_all(&self) -> impl Future<Output = Result<Vec<Harvest>, VerdantError>> + Send {
        let pool = self.pool.clone();
        async move {
            let rows: Vec<Wrapper> = sqlx::query_as(SELECT_ALL)
                .fetch_all(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(rows.into_iter().map(|w| w.0).collect())
        }
    }

    fn delete(&self, id: HarvestId) -> impl Future<Output = Result<(), VerdantError>> + Send {
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

#[cfg(test)]
mod tests {
    use verdant_app::ports::PlantRepository;
    use verdant_domain::plant::Plant;
    use verdant_domain::time::Date;

    use super::*;
    use crate::plant_repo::SqlitePlantRepository;
    use crate::pool::Config;

    async fn setup() -> (SqliteHarvestRepository, PlantId) {
        let db = Config {
            database_url: "sqlite::memory:".to_string(),
        }
        .build()
        .await
        .unwrap();

        let plants = SqlitePlantRepository::new(db.pool().clone());
        let plant = plants
            .create(Plant::builder().species("Tomato").build().unwrap())
            .await
            .unwrap();

        (SqliteHarvestRepository::new(db.pool().clone()), plant.id)
    }

    #[tokio::test]
    async fn should_create_and_retrieve_harvest() {
        let (repo, plant_id) = setup().await;

        let harvest = Harvest::builder()
            .plant_id(plant_id)
            .harvest_date(Date::from_ymd_opt(2024, 6, 20).unwrap())
            .yield_weight(120.5)
            .build()
            .unwrap();
        let created = repo.create(harvest).await.unwrap();

        let fetched = repo.get_by_id(created.id).await.unwrap().unwrap();
        assert_eq!(fetched.plant_id, plant_id);
        assert_eq!(
            fetched.harvest_date,
            Date::from_ymd_opt(2024, 6, 20).unwrap()
        );
        assert_eq!(fetched.yield_weight, Some(120.5));
    }

    #[tokio::test]
    async fn should_store_missing_yield_weight_as_null() {
        let (repo, plant_id) = setup().await;

        let harvest = Harvest::builder().plant_id(plant_id).build().unwrap();
        let created = repo.create(harvest).await.unwrap();

        let fetched = repo.get_by_id(created.id).await.unwrap().unwrap();
        assert!(fetched.yield_weight.is_none());
    }

    #[tokio::test]
    async fn should_reject_harvest_for_unknown_plant() {
        let (repo, _) = setup().await;

        let harvest = Harvest::builder()
            .plant_id(PlantId::from_i64(99))
            .build()
            .unwrap();
        let result = repo.create(harvest).await;
        assert!(matches!(result, Err(VerdantError::Storage(_))));
    }

    #[tokio::test]
    async fn should_delete_harvest_when_exists() {
        let (repo, plant_id) = setup().await;
        let harvest = repo
            .create(Harvest::builder().plant_id(plant_id).build().unwrap())
            .await
            .unwrap();

        repo.delete(harvest.id).await.unwrap();

        assert!(repo.get_by_id(harvest.id).await.unwrap().is_none());
    }
}
