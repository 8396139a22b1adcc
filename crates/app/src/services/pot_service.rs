//! Pot service — use-cases for managing pots.

use verdant_domain::error::{NotFoundError, VerdantError};
use verdant_domain::id::PotId;
use verdant_domain::pot::Pot;
use verdant_domain::time::now;

use crate::ports::storage::PotRepository;

/// Application service for pot CRUD. Pots are not mirrored to the bus.
pub struct PotService<R> {
    repo: R,
}

impl<R: PotRepository> PotService<R> {
    /// Create a new service backed by the given repository.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Create a new pot after validating domain invariants.
    ///
    /// # Errors
    ///
    /// Returns [`VerdantError::Validation`] if invariants fail, or a
    /// storage error propagated from the repository.
    #[tracing::instrument(skip(self, pot), fields(location_code = %pot.location_code))]
    pub async fn create_pot(&self, mut pot: Pot) -> Result<Pot, VerdantError> {
        pot.validate()?;
        pot.created_at = now();
        self.repo.create(pot).await
    }

    /// Look up a pot by id, returning an error if not found.
    ///
    /// # Errors
    ///
    /// Returns [`VerdantError::NotFound`] when no pot with `id` exists,
    /// or a storage error from the repository.
    pub async fn get_pot(&self, id: PotId) -> Result<Pot, VerdantError> {
        self.repo.get_by_id(id).await?.ok_or_else(|| {
            NotFoundError {
                entity: "Pot",
                id: id.to_string(),
            }
            .into()
        })
    }

    /// List all pots.
    ///
    /// # Errors
    ///
    /// Returns a storage error propagated from the repository.
    pub async fn list_pots(&self) -> Result<Vec<Pot>, VerdantError> {
        self.repo.get_all().await
    }

    /// Delete a pot by id.
    ///
    /// # Errors
    ///
    /// Returns [`VerdantError::NotFound`] if the pot does not exist, or a
    /// storage error propagated from the repository.
    #[tracing::instrument(skip(self))]
    pub async fn delete_pot(&self, id: PotId) -> Result<(), VerdantError> {
        let _ = self.get_pot(id).await?;
        self.repo.delete(id).await
    }
}
