//! Floor service — use-cases for managing floors.

use verdant_domain::error::{NotFoundError, VerdantError};
use verdant_domain::floor::Floor;
use verdant_domain::id::FloorId;
use verdant_domain::time::now;

use crate::ports::storage::FloorRepository;

/// Application service for floor CRUD. Floors are not mirrored to the bus.
pub struct FloorService<R> {
    repo: R,
}

impl<R: FloorRepository> FloorService<R> {
    /// Create a new service backed by the given repository.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Create a new floor after validating domain invariants.
    ///
    /// # Errors
    ///
    /// Returns [`VerdantError::Validation`] if invariants fail, or a
    /// storage error propagated from the repository.
    #[tracing::instrument(skip(self, floor), fields(floor_name = %floor.name))]
    pub async fn create_floor(&self, mut floor: Floor) -> Result<Floor, VerdantError> {
        floor.validate()?;
        floor.created_at = now();
        self.repo.create(floor).await
    }

    /// Look up a floor by id, returning an error if not found.
    ///
    /// # Errors
    ///
    /// Returns [`VerdantError::NotFound`] when no floor with `id` exists,
    /// or a storage error from the repository.
    pub async fn get_floor(&self, id: FloorId) -> Result<Floor, VerdantError> {
        self.repo.get_by_id(id).await?.ok_or_else(|| {
            NotFoundError {
                entity: "Floor",
                id: id.to_string(),
            }
            .into()
        })
    }

    /// List all floors.
    ///
    /// # Errors
    ///
    /// Returns a storage error propagated from the repository.
    pub async fn list_floors(&self) -> Result<Vec<Floor>, VerdantError> {
        self.repo.get_all().await
    }

    /// Delete a floor by id.
    ///
    /// # Errors
    ///
    /// Returns [`VerdantError::NotFound`] if the floor does not exist, or a
    /// storage error propagated from the repository.
    #[tracing::instrument(skip(self))]
    pub async fn delete_floor(&self, id: FloorId) -> Result<(), VerdantError> {
        let _ = self.get_floor(id).await?;
        self.repo.delete(id).await
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::future::Future;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicI64, Ordering};

    use verdant_domain::id::FarmId;

    use super::*;

    struct InMemoryFloorRepo {
        store: Mutex<HashMap<FloorId, Floor>>,
        next_id: AtomicI64,
    }

    impl Default for InMemoryFloorRepo {
        fn default() -> Self {
            Self {
                store: Mutex::new(HashMap::new()),
                next_id: AtomicI64::new(1),
            }
        }
    }

    impl FloorRepository for InMemoryFloorRepo {
        fn create(
            &self,
            mut floor: Floor,
        ) -> impl Future<Output = Result<Floor, VerdantError>> + Send {
            floor.id = FloorId::from_i64(self.next_id.fetch_add(1, Ordering::SeqCst));
            let mut store = self.store.lock().unwrap();
            store.insert(floor.id, floor.clone());
            async { Ok(floor) }
        }

        fn get_by_id(
            &self,
            id: FloorId,
        ) -> impl Future<Output = Result<Option<Floor>, VerdantError>> + Send {
            let result = self.store.lock().unwrap().get(&id).cloned();
            async { Ok(result) }
        }

        fn get_all(&self) -> impl Future<Output = Result<Vec<Floor>, VerdantError>> + Send {
            let result: Vec<Floor> = self.store.lock().unwrap().values().cloned().collect();
            async { Ok(result) }
        }

        fn delete(&self, id: FloorId) -> impl Future<Output = Result<(), VerdantError>> + Send {
            self.store.lock().unwrap().remove(&id);
            async { Ok(()) }
        }
    }

    #[tokio::test]
    async fn should_create_and_list_floors() {
        let service = FloorService::new(InMemoryFloorRepo::default());

        let floor = Floor::builder()
            .farm_id(FarmId::from_i64(1))
            .name("Mezzanine")
            .level(2)
            .build()
            .unwrap();
        let created = service.create_floor(floor).await.unwrap();

        assert_eq!(created.id, FloorId::from_i64(1));
        assert_eq!(service.list_floors().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn should_return_not_found_when_deleting_missing_floor() {
        let service = FloorService::new(InMemoryFloorRepo::default());
        let result = service.delete_floor(FloorId::from_i64(99)).await;
        assert!(matches!(result, Err(VerdantError::NotFound(_))));
    }
}
