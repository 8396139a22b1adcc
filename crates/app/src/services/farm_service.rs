//! Farm service — use-cases for managing farms.

use verdant_domain::error::{NotFoundError, VerdantError};
use verdant_domain::farm::Farm;
use verdant_domain::id::FarmId;
use verdant_domain::time::now;

use crate::ports::mirror::Mirror;
use crate::ports::storage::FarmRepository;

/// Application service for farm CRUD, keeping the bus mirror in step with
/// every mutation. Mirror hooks run after the database write and never fail
/// the operation — the database is the source of truth.
pub struct FarmService<R, M> {
    repo: R,
    mirror: M,
}

impl<R: FarmRepository, M: Mirror> FarmService<R, M> {
    /// Create a new service backed by the given repository and mirror.
    pub fn new(repo: R, mirror: M) -> Self {
        Self { repo, mirror }
    }

    /// Create a new farm after validating domain invariants, then publish
    /// its discovery and state messages.
    ///
    /// # Errors
    ///
    /// Returns [`VerdantError::Validation`] if invariants fail, or a
    /// storage error propagated from the repository.
    #[tracing::instrument(skip(self, farm), fields(farm_name = %farm.name))]
    pub async fn create_farm(&self, mut farm: Farm) -> Result<Farm, VerdantError> {
        farm.validate()?;
        farm.created_at = now();
        let created = self.repo.create(farm).await?;
        self.mirror.farm_created(&created).await;
        Ok(created)
    }

    /// Look up a farm by id, returning an error if not found.
    ///
    /// # Errors
    ///
    /// Returns [`VerdantError::NotFound`] when no farm with `id` exists,
    /// or a storage error from the repository.
    pub async fn get_farm(&self, id: FarmId) -> Result<Farm, VerdantError> {
        self.repo.get_by_id(id).await?.ok_or_else(|| {
            NotFoundError {
                entity: "Farm",
                id: id.to_string(),
            }
            .into()
        })
    }

    /// List all farms. Pure read: no mirror side effects.
    ///
    /// # Errors
    ///
    /// Returns a storage error propagated from the repository.
    pub async fn list_farms(&self) -> Result<Vec<Farm>, VerdantError> {
        self.repo.get_all().await
    }

    /// Update an existing farm (preserving its creation timestamp), then
    /// republish its state.
    ///
    /// # Errors
    ///
    /// Returns [`VerdantError::Validation`] if invariants fail,
    /// [`VerdantError::NotFound`] if the farm does not exist, or a storage
    /// error from the repository.
    #[tracing::instrument(skip(self, farm))]
    pub async fn update_farm(&self, farm: Farm) -> Result<Farm, VerdantError> {
        farm.validate()?;
        let existing = self.get_farm(farm.id).await?;
        let updated = self
            .repo
            .update(Farm {
                created_at: existing.created_at,
                ..farm
            })
            .await?;
        self.mirror.farm_updated(&updated).await;
        Ok(updated)
    }

    /// Delete a farm by id, then retract its retained bus topics.
    ///
    /// # Errors
    ///
    /// Returns [`VerdantError::NotFound`] if the farm does not exist, or a
    /// storage error propagated from the repository.
    #[tracing::instrument(skip(self))]
    pub async fn delete_farm(&self, id: FarmId) -> Result<(), VerdantError> {
        let _ = self.get_farm(id).await?;
        self.repo.delete(id).await?;
        self.mirror.farm_deleted(id).await;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::future::Future;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicI64, AtomicUsize, Ordering};

    use verdant_domain::error::ValidationError;
    use verdant_domain::id::PlantId;
    use verdant_domain::plant::Plant;

    use crate::ports::mirror::ResyncSummary;

    use super::*;

    struct InMemoryFarmRepo {
        store: Mutex<HashMap<FarmId, Farm>>,
        next_id: AtomicI64,
    }

    impl Default for InMemoryFarmRepo {
        fn default() -> Self {
            Self {
                store: Mutex::new(HashMap::new()),
                next_id: AtomicI64::new(1),
            }
        }
    }

    impl FarmRepository for InMemoryFarmRepo {
        fn create(&self, mut farm: Farm) -> impl Future<Output = Result<Farm, VerdantError>> + Send {
            farm.id = FarmId::from_i64(self.next_id.fetch_add(1, Ordering::SeqCst));
            let mut store = self.store.lock().unwrap();
            store.insert(farm.id, farm.clone());
            async { Ok(farm) }
        }

        fn get_by_id(
            &self,
            id: FarmId,
        ) -> impl Future<Output = Result<Option<Farm>, VerdantError>> + Send {
            let result = self.store.lock().unwrap().get(&id).cloned();
            async { Ok(result) }
        }

        fn get_all(&self) -> impl Future<Output = Result<Vec<Farm>, VerdantError>> + Send {
            let result: Vec<Farm> = self.store.lock().unwrap().values().cloned().collect();
            async { Ok(result) }
        }

        fn update(&self, farm: Farm) -> impl Future<Output = Result<Farm, VerdantError>> + Send {
            let mut store = self.store.lock().unwrap();
            store.insert(farm.id, farm.clone());
            async { Ok(farm) }
        }

        fn delete(&self, id: FarmId) -> impl Future<Output = Result<(), VerdantError>> + Send {
            self.store.lock().unwrap().remove(&id);
            async { Ok(()) }
        }
    }

    /// Counts hook invocations.
    #[derive(Default)]
    struct RecordingMirror {
        created: AtomicUsize,
        updated: AtomicUsize,
        deleted: AtomicUsize,
    }

    impl Mirror for &RecordingMirror {
        async fn farm_created(&self, _farm: &Farm) {
            self.created.fetch_add(1, Ordering::SeqCst);
        }

        async fn farm_updated(&self, _farm: &Farm) {
            self.updated.fetch_add(1, Ordering::SeqCst);
        }

        async fn farm_deleted(&self, _id: FarmId) {
            self.deleted.fetch_add(1, Ordering::SeqCst);
        }

        async fn plant_created(&self, _plant: &Plant) {}

        async fn plant_updated(&self, _plant: &Plant) {}

        async fn plant_deleted(&self, _id: PlantId) {}

        async fn resync_all(&self) -> Result<ResyncSummary, VerdantError> {
            Ok(ResyncSummary::default())
        }
    }

    #[tokio::test]
    async fn should_assign_id_and_fire_created_hook() {
        let mirror = RecordingMirror::default();
        let service = FarmService::new(InMemoryFarmRepo::default(), &mirror);

        let farm = Farm::builder().name("Greenhouse A").build().unwrap();
        let created = service.create_farm(farm).await.unwrap();

        assert_eq!(created.id, FarmId::from_i64(1));
        assert_eq!(mirror.created.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn should_reject_empty_name_before_touching_repo_or_mirror() {
        let mirror = RecordingMirror::default();
        let service = FarmService::new(InMemoryFarmRepo::default(), &mirror);

        let mut farm = Farm::builder().name("x").build().unwrap();
        farm.name.clear();
        let result = service.create_farm(farm).await;

        assert!(matches!(
            result,
            Err(VerdantError::Validation(ValidationError::EmptyName))
        ));
        assert_eq!(mirror.created.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn should_return_not_found_for_missing_farm() {
        let mirror = RecordingMirror::default();
        let service = FarmService::new(InMemoryFarmRepo::default(), &mirror);

        let result = service.get_farm(FarmId::from_i64(99)).await;
        assert!(matches!(result, Err(VerdantError::NotFound(_))));
    }

    #[tokio::test]
    async fn should_preserve_created_at_and_fire_updated_hook_on_update() {
        let mirror = RecordingMirror::default();
        let service = FarmService::new(InMemoryFarmRepo::default(), &mirror);

        let created = service
            .create_farm(Farm::builder().name("Greenhouse A").build().unwrap())
            .await
            .unwrap();

        let updated = service
            .update_farm(
                Farm::builder()
                    .id(created.id)
                    .name("Greenhouse B")
                    .location("Bay 2")
                    .build()
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(updated.name, "Greenhouse B");
        assert_eq!(updated.created_at, created.created_at);
        assert_eq!(mirror.updated.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn should_return_not_found_when_updating_missing_farm() {
        let mirror = RecordingMirror::default();
        let service = FarmService::new(InMemoryFarmRepo::default(), &mirror);

        let farm = Farm::builder()
            .id(FarmId::from_i64(99))
            .name("Ghost")
            .build()
            .unwrap();
        let result = service.update_farm(farm).await;

        assert!(matches!(result, Err(VerdantError::NotFound(_))));
        assert_eq!(mirror.updated.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn should_fire_deleted_hook_on_delete() {
        let mirror = RecordingMirror::default();
        let service = FarmService::new(InMemoryFarmRepo::default(), &mirror);

        let created = service
            .create_farm(Farm::builder().name("Greenhouse A").build().unwrap())
            .await
            .unwrap();
        service.delete_farm(created.id).await.unwrap();

        assert_eq!(mirror.deleted.load(Ordering::SeqCst), 1);
        assert!(matches!(
            service.get_farm(created.id).await,
            Err(VerdantError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn should_return_not_found_when_deleting_missing_farm() {
        let mirror = RecordingMirror::default();
        let service = FarmService::new(InMemoryFarmRepo::default(), &mirror);

        let result = service.delete_farm(FarmId::from_i64(99)).await;
        assert!(matches!(result, Err(VerdantError::NotFound(_))));
        assert_eq!(mirror.deleted.load(Ordering::SeqCst), 0);
    }
}
