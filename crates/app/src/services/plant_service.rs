//! Plant service — use-cases for managing plants.

use verdant_domain::error::{NotFoundError, VerdantError};
use verdant_domain::id::PlantId;
use verdant_domain::plant::Plant;
use verdant_domain::time::now;

use crate::ports::mirror::Mirror;
use crate::ports::storage::PlantRepository;

/// Application service for plant CRUD, keeping the bus mirror in step with
/// every mutation.
pub struct PlantService<R, M> {
    repo: R,
    mirror: M,
}

impl<R: PlantRepository, M: Mirror> PlantService<R, M> {
    /// Create a new service backed by the given repository and mirror.
    pub fn new(repo: R, mirror: M) -> Self {
        Self { repo, mirror }
    }

    /// Create a new plant after validating domain invariants, then publish
    /// its discovery and state messages.
    ///
    /// # Errors
    ///
    /// Returns [`VerdantError::Validation`] if invariants fail, or a
    /// storage error propagated from the repository.
    #[tracing::instrument(skip(self, plant), fields(species = %plant.species))]
    pub async fn create_plant(&self, mut plant: Plant) -> Result<Plant, VerdantError> {
        plant.validate()?;
        plant.created_at = now();
        let created = self.repo.create(plant).await?;
        self.mirror.plant_created(&created).await;
        Ok(created)
    }

    /// Look up a plant by id, returning an error if not found.
    ///
    /// # Errors
    ///
    /// Returns [`VerdantError::NotFound`] when no plant with `id` exists,
    /// or a storage error from the repository.
    pub async fn get_plant(&self, id: PlantId) -> Result<Plant, VerdantError> {
        self.repo.get_by_id(id).await?.ok_or_else(|| {
            NotFoundError {
                entity: "Plant",
                id: id.to_string(),
            }
            .into()
        })
    }

    /// Look up a plant by its QR code label.
    ///
    /// # Errors
    ///
    /// Returns [`VerdantError::NotFound`] when no plant carries `qr_code`,
    /// or a storage error from the repository.
    pub async fn get_plant_by_qr(&self, qr_code: &str) -> Result<Plant, VerdantError> {
        self.repo.find_by_qr_code(qr_code).await?.ok_or_else(|| {
            NotFoundError {
                entity: "Plant",
                id: qr_code.to_string(),
            }
            .into()
        })
    }

    /// List all plants. Pure read: no mirror side effects.
    ///
    /// # Errors
    ///
    /// Returns a storage error propagated from the repository.
    pub async fn list_plants(&self) -> Result<Vec<Plant>, VerdantError> {
        self.repo.get_all().await
    }

    /// Update an existing plant (preserving its creation timestamp), then
    /// republish its state.
    ///
    /// # Errors
    ///
    /// Returns [`VerdantError::Validation`] if invariants fail,
    /// [`VerdantError::NotFound`] if the plant does not exist, or a storage
    /// error from the repository.
    #[tracing::instrument(skip(self, plant))]
    pub async fn update_plant(&self, plant: Plant) -> Result<Plant, VerdantError> {
        plant.validate()?;
        let existing = self.get_plant(plant.id).await?;
        let updated = self
            .repo
            .update(Plant {
                created_at: existing.created_at,
                ..plant
            })
            .await?;
        self.mirror.plant_updated(&updated).await;
        Ok(updated)
    }

    /// Delete a plant by id, then retract its retained bus topics.
    ///
    /// # Errors
    ///
    /// Returns [`VerdantError::NotFound`] if the plant does not exist, or a
    /// storage error propagated from the repository.
    #[tracing::instrument(skip(self))]
    pub async fn delete_plant(&self, id: PlantId) -> Result<(), VerdantError> {
        let _ = self.get_plant(id).await?;
        self.repo.delete(id).await?;
        self.mirror.plant_deleted(id).await;
        Ok(())
    }
}
