//! Floor — a level within a farm.

use serde::{Deserialize, Serialize};

use crate::error::{ValidationError, VerdantError};
use crate::id::{FarmId, FloorId};
use crate::time::{Timestamp, now};

/// One level of a farm, holding pots.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Floor {
    /// Store-assigned id. Zero until the floor has been persisted.
    pub id: FloorId,
    pub farm_id: FarmId,
    pub name: String,
    pub level: Option<i64>,
    pub created_at: Timestamp,
}

impl Floor {
    /// Create a builder for constructing a [`Floor`].
    #[must_use]
    pub fn builder() -> FloorBuilder {
        FloorBuilder::default()
    }

    /// Check domain invariants.
    ///
    /// # Errors
    ///
    /// Returns [`VerdantError::Validation`] when `name` is empty.
    pub fn validate(&self) -> Result<(), VerdantError> {
        if self.name.is_empty() {
            return Err(ValidationError::EmptyName.into());
        }
        Ok(())
    }
}

/// Step-by-step builder for [`Floor`].
#[derive(Debug, Default)]
pub struct FloorBuilder {
    id: Option<FloorId>,
    farm_id: Option<FarmId>,
    name: Option<String>,
    level: Option<i64>,
    created_at: Option<Timestamp>,
}

impl FloorBuilder {
    #[must_use]
    pub fn id(mut self, id: FloorId) -> Self {
        self.id = Some(id);
        self
    }

    #[must_use]
    pub fn farm_id(mut self, farm_id: FarmId) -> Self {
        self.farm_id = Some(farm_id);
        self
    }

    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    #[must_use]
    pub fn level(mut self, level: i64) -> Self {
        self.level = Some(level);
        self
    }

    #[must_use]
    pub fn created_at(mut self, created_at: Timestamp) -> Self {
        self.created_at = Some(created_at);
        self
    }

    /// Consume the builder, validate, and return a [`Floor`].
    ///
    /// # Errors
    ///
    /// Returns [`VerdantError::Validation`] if `name` is missing or empty.
    pub fn build(self) -> Result<Floor, VerdantError> {
        let floor = Floor {
            id: self.id.unwrap_or(FloorId::from_i64(0)),
            farm_id: self.farm_id.unwrap_or(FarmId::from_i64(0)),
            name: self.name.unwrap_or_default(),
            level: self.level,
            created_at: self.created_at.unwrap_or_else(now),
        };
        floor.validate()?;
        Ok(floor)
    }
}
