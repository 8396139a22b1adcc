//! Plant — a living cultivation asset, optionally assigned to a pot.

use serde::{Deserialize, Serialize};

use crate::error::{ValidationError, VerdantError};
use crate::id::{PlantId, PotId};
use crate::time::{Date, Timestamp, now};

/// A single plant. `pot_id` is `None` while the plant is unassigned
/// (e.g. after its pot was removed).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Plant {
    /// Store-assigned id. Zero until the plant has been persisted.
    pub id: PlantId,
    pub pot_id: Option<PotId>,
    /// Physical label; unique across all plants when present.
    pub qr_code: Option<String>,
    pub species: String,
    pub variety: Option<String>,
    pub germination_date: Option<Date>,
    pub planting_date: Option<Date>,
    /// Inactive plants are kept for record but no longer growing.
    pub active: bool,
    pub created_at: Timestamp,
}

impl Plant {
    /// Create a builder for constructing a [`Plant`].
    #[must_use]
    pub fn builder() -> PlantBuilder {
        PlantBuilder::default()
    }

    /// Check domain invariants.
    ///
    /// # Errors
    ///
    /// Returns [`VerdantError::Validation`] when `species` is empty.
    pub fn validate(&self) -> Result<(), VerdantError> {
        if self.species.is_empty() {
            return Err(ValidationError::EmptySpecies.into());
        }
        Ok(())
    }
}

/// Step-by-step builder for [`Plant`]. `active` defaults to `true`.
#[derive(Debug, Default)]
pub struct PlantBuilder {
    id: Option<PlantId>,
    pot_id: Option<PotId>,
    qr_code: Option<String>,
    species: Option<String>,
    variety: Option<String>,
    germination_date: Option<Date>,
    planting_date: Option<Date>,
    active: Option<bool>,
    created_at: Option<Timestamp>,
}

impl PlantBuilder {
    #[must_use]
    pub fn id(mut self, id: PlantId) -> Self {
        self.id = Some(id);
        self
    }

    #[must_use]
    pub fn pot_id(mut self, pot_id: PotId) -> Self {
        self.pot_id = Some(pot_id);
        self
    }

    #[must_use]
    pub fn qr_code(mut self, qr_code: impl Into<String>) -> Self {
        self.qr_code = Some(qr_code.into());
        self
    }

    #[must_use]
    pub fn species(mut self, species: impl Into<String>) -> Self {
        self.species = Some(species.into());
        self
    }

    #[must_use]
    pub fn variety(mut self, variety: impl Into<String>) -> Self {
        self.variety = Some(variety.into());
        self
    }

    #[must_use]
    pub fn germination_date(mut self, date: Date) -> Self {
        self.germination_date = Some(date);
        self
    }

    #[must_use]
    pub fn planting_date(mut self, date: Date) -> Self {
        self.planting_date = Some(date);
        self
    }

    #[must_use]
    pub fn active(mut self, active: bool) -> Self {
        self.active = Some(active);
        self
    }

    #[must_use]
    pub fn created_at(mut self, created_at: Timestamp) -> Self {
        self.created_at = Some(created_at);
        self
    }

    /// Consume the builder, validate, and return a [`Plant`].
    ///
    /// # Errors
    ///
    /// Returns [`VerdantError::Validation`] if `species` is missing or empty.
    pub fn build(self) -> Result<Plant, VerdantError> {
        let plant = Plant {
            id: self.id.unwrap_or(PlantId::from_i64(0)),
            pot_id: self.pot_id,
            qr_code: self.qr_code,
            species: self.species.unwrap_or_default(),
            variety: self.variety,
            germination_date: self.germination_date,
            planting_date: self.planting_date,
            active: self.active.unwrap_or(true),
            created_at: self.created_at.unwrap_or_else(now),
        };
        plant.validate()?;
        Ok(plant)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_build_valid_plant_when_species_provided() {
        let plant = Plant::builder().species("Basil").build().unwrap();
        assert_eq!(plant.species, "Basil");
        assert!(plant.variety.is_none());
        assert!(plant.qr_code.is_none());
    }

    #[test]
    fn should_default_active_to_true() {
        let plant = Plant::builder().species("Basil").build().unwrap();
        assert!(plant.active);
    }

    #[test]
    fn should_return_validation_error_when_species_is_empty() {
        let result = Plant::builder().qr_code("QR123").build();
        assert!(matches!(
            result,
            Err(VerdantError::Validation(ValidationError::EmptySpecies))
        ));
    }

    #[test]
    fn should_keep_optional_dates_when_provided() {
        let germinated = Date::from_ymd_opt(2024, 3, 1).unwrap();
        let planted = Date::from_ymd_opt(2024, 3, 15).unwrap();
        let plant = Plant::builder()
            .species("Tomato")
            .variety("San Marzano")
            .germination_date(germinated)
            .planting_date(planted)
            .build()
            .unwrap();
        assert_eq!(plant.germination_date, Some(germinated));
        assert_eq!(plant.planting_date, Some(planted));
    }

    #[test]
    fn should_roundtrip_through_serde_json() {
        let plant = Plant::builder()
            .species("Basil")
            .qr_code("QR123")
            .active(false)
            .build()
            .unwrap();
        let json = serde_json::to_string(&plant).unwrap();
        let parsed: Plant = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.species, plant.species);
        assert_eq!(parsed.qr_code, plant.qr_code);
        assert!(!parsed.active);
    }
}
