//! Farm — a top-level cultivation site (greenhouse, warehouse, field).

use serde::{Deserialize, Serialize};

use crate::error::{ValidationError, VerdantError};
use crate::id::FarmId;
use crate::time::{Timestamp, now};

/// A cultivation site containing zero or more floors.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Farm {
    /// Store-assigned id. Zero until the farm has been persisted.
    pub id: FarmId,
    pub name: String,
    pub location: Option<String>,
    pub created_at: Timestamp,
}

impl Farm {
    /// Create a builder for constructing a [`Farm`].
    #[must_use]
    pub fn builder() -> FarmBuilder {
        FarmBuilder::default()
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

/// Step-by-step builder for [`Farm`].
#[derive(Debug, Default)]
pub struct FarmBuilder {
    id: Option<FarmId>,
    name: Option<String>,
    location: Option<String>,
    created_at: Option<Timestamp>,
}

impl FarmBuilder {
    #[must_use]
    pub fn id(mut self, id: FarmId) -> Self {
        self.id = Some(id);
        self
    }

    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    #[must_use]
    pub fn location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    #[must_use]
    pub fn created_at(mut self, created_at: Timestamp) -> Self {
        self.created_at = Some(created_at);
        self
    }

    /// Consume the builder, validate, and return a [`Farm`].
    ///
    /// # Errors
    ///
    /// Returns [`VerdantError::Validation`] if `name` is missing or empty.
    pub fn build(self) -> Result<Farm, VerdantError> {
        let farm = Farm {
            id: self.id.unwrap_or(FarmId::from_i64(0)),
            name: self.name.unwrap_or_default(),
            location: self.location,
            created_at: self.created_at.unwrap_or_else(now),
        };
        farm.validate()?;
        Ok(farm)
    }
}
