//! Pot — a plantable position on a floor.

use serde::{Deserialize, Serialize};

use crate::error::{ValidationError, VerdantError};
use crate::id::{FloorId, PotId};
use crate::time::{Timestamp, now};

/// A single pot, identified within its floor by a location code.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Pot {
    /// Store-assigned id. Zero until the pot has been persisted.
    pub id: PotId,
    pub floor_id: FloorId,
    pub location_code: String,
    pub created_at: Timestamp,
}

impl Pot {
    /// Create a builder for constructing a [`Pot`].
    #[must_use]
    pub fn builder() -> PotBuilder {
        PotBuilder::default()
    }

    /// Check domain invariants.
    ///
    /// # Errors
    ///
    /// Returns [`VerdantError::Validation`] when `location_code` is empty.
    pub fn validate(&self) -> Result<(), VerdantError> {
        if self.location_code.is_empty() {
            return Err(ValidationError::EmptyLocationCode.into());
        }
        Ok(())
    }
}

/// Step-by-step builder for [`Pot`].
#[derive(Debug, Default)]
pub struct PotBuilder {
    id: Option<PotId>,
    floor_id: Option<FloorId>,
    location_code: Option<String>,
    created_at: Option<Timestamp>,
}

impl PotBuilder {
    #[must_use]
    pub fn id(mut self, id: PotId) -> Self {
        self.id = Some(id);
        self
    }

    #[must_use]
    pub fn floor_id(mut self, floor_id: FloorId) -> Self {
        self.floor_id = Some(floor_id);
        self
    }

    #[must_use]
    pub fn location_code(mut self, location_code: impl Into<String>) -> Self {
        self.location_code = Some(location_code.into());
        self
    }

    #[must_use]
    pub fn created_at(mut self, created_at: Timestamp) -> Self {
        self.created_at = Some(created_at);
        self
    }

    /// Consume the builder, validate, and return a [`Pot`].
    ///
    /// # Errors
    ///
    /// Returns [`VerdantError::Validation`] if `location_code` is missing
    /// or empty.
    pub fn build(self) -> Result<Pot, VerdantError> {
        let pot = Pot {
            id: self.id.unwrap_or(PotId::from_i64(0)),
            floor_id: self.floor_id.unwrap_or(FloorId::from_i64(0)),
            location_code: self.location_code.unwrap_or_default(),
            created_at: self.created_at.unwrap_or_else(now),
        };
        pot.validate()?;
        Ok(pot)
    }
}
