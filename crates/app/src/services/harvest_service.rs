//! Harvest service — use-cases for recording harvests.

use verdant_domain::error::{NotFoundError, VerdantError};
use verdant_domain::harvest::Harvest;
use verdant_domain::id::HarvestId;
use verdant_domain::time::now;

use crate::ports::storage::HarvestRepository;

/// Application service for harvest CRUD. Harvests are not mirrored to the bus.
pub struct HarvestService<R> {
    repo: R,
}

impl<R: HarvestRepository> HarvestService<R> {
    /// Create a new service backed by the given repository.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Record a new harvest.
    ///
    /// # Errors
    ///
    /// Returns a storage error propagated from the repository.
    #[tracing::instrument(skip(self, harvest), fields(plant_id = %harvest.plant_id))]
    pub async fn create_harvest(&self, mut harvest: Harvest) -> Result<Harvest, VerdantError> {
        harvest.created_at = now();
        self.repo.create(harvest).await
    }

    /// Look up a harvest by id, returning an error if not found.
    ///
    /// # Errors
    ///
    /// Returns [`VerdantError::NotFound`] when no harvest with `id` exists,
    /// or a storage error from the repository.
    pub async fn get_harvest(&self, id: HarvestId) -> Result<Harvest, VerdantError> {
        self.repo.get_by_id(id).await?.ok_or_else(|| {
            NotFoundError {
                entity: "Harvest",
                id: id.to_string(),
            }
            .into()
        })
    }

    /// List all harvests.
    ///
    /// # Errors
    ///
    /// Returns a storage error propagated from the repository.
    pub async fn list_harvests(&self) -> Result<Vec<Harvest>, VerdantError> {
        self.repo.get_all().await
    }

    /// Delete a harvest by id.
    ///
    /// # Errors
    ///
    /// Returns [`VerdantError::NotFound`] if the harvest does not exist, or
    /// a storage error propagated from the repository.
    #[tracing::instrument(skip(self))]
    pub async fn delete_harvest(&self, id: HarvestId) -> Result<(), VerdantError> {
        let _ = self.get_harvest(id).await?;
        self.repo.delete(id).await
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::future::Future;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicI64, Ordering};

    use verdant_domain::id::PlantId;
    use verdant_domain::time::Date;

    use super::*;

    struct InMemoryHarvestRepo {
        store: Mutex<HashMap<HarvestId, Harvest>>,
        next_id: AtomicI64,
    }

    impl Default for InMemoryHarvestRepo {
        fn default() -> Self {
            Self {
                store: Mutex::new(HashMap::new()),
                next_id: AtomicI64::new(1),
            }
        }
    }

    impl HarvestRepository for InMemoryHarvestRepo {
        fn create(
            &self,
            mut harvest: Harvest,
        ) -> impl Future<Output = Result<Harvest, VerdantError>> + Send {
            harvest.id = HarvestId::from_i64(self.next_id.fetch_add(1, Ordering::SeqCst));
            let mut store = self.store.lock().unwrap();
            store.insert(harvest.id, harvest.clone());
            async { Ok(harvest) }
        }

        fn get_by_id(
            &self,
            id: HarvestId,
        ) -> impl Future<Output = Result<Option<Harvest>, VerdantError>> + Send {
            let result = self.store.lock().unwrap().get(&id).cloned();
            async { Ok(result) }
        }

        fn get_all(&self) -> impl Future<Output = Result<Vec<Harvest>, VerdantError>> + Send {
            let result: Vec<Harvest> = self.store.lock().unwrap().values().cloned().collect();
            async { Ok(result) }
        }

        fn delete(&self, id: HarvestId) -> impl Future<Output = Result<(), VerdantError>> + Send {
            self.store.lock().unwrap().remove(&id);
            async { Ok(()) }
        }
    }

    #[tokio::test]
    async fn should_record_harvest_with_yield_weight() {
        let service = HarvestService::new(InMemoryHarvestRepo::default());

        let harvest = Harvest::builder()
            .plant_id(PlantId::from_i64(5))
            .harvest_date(Date::from_ymd_opt(2024, 6, 20).unwrap())
            .yield_weight(120.5)
            .build()
            .unwrap();
        let created = service.create_harvest(harvest).await.unwrap();

        let fetched = service.get_harvest(created.id).await.unwrap();
        assert_eq!(fetched.yield_weight, Some(120.5));
    }

    #[tokio::test]
    async fn should_return_not_found_for_missing_harvest() {
        let service = HarvestService::new(InMemoryHarvestRepo::default());
        let result = service.get_harvest(HarvestId::from_i64(99)).await;
        assert!(matches!(result, Err(VerdantError::NotFound(_))));
    }
}
