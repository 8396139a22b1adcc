//! Harvest — a yield event recorded against a plant.

use serde::{Deserialize, Serialize};

use crate::error::VerdantError;
use crate::id::{HarvestId, PlantId};
use crate::time::{Date, Timestamp, now};

/// One harvest of one plant, with an optional yield weight in grams.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Harvest {
    /// Store-assigned id. Zero until the harvest has been persisted.
    pub id: HarvestId,
    pub plant_id: PlantId,
    pub harvest_date: Date,
    pub yield_weight: Option<f64>,
    pub created_at: Timestamp,
}

impl Harvest {
    /// Create a builder for constructing a [`Harvest`].
    #[must_use]
    pub fn builder() -> HarvestBuilder {
        HarvestBuilder::default()
    }
}

/// Step-by-step builder for [`Harvest`].
#[derive(Debug, Default)]
pub struct HarvestBuilder {
    id: Option<HarvestId>,
    plant_id: Option<PlantId>,
    harvest_date: Option<Date>,
    yield_weight: Option<f64>,
    created_at: Option<Timestamp>,
}

impl HarvestBuilder {
    #[must_use]
    pub fn id(mut self, id: HarvestId) -> Self {
        self.id = Some(id);
        self
    }

    #[must_use]
    pub fn plant_id(mut self, plant_id: PlantId) -> Self {
        self.plant_id = Some(plant_id);
        self
    }

    #[must_use]
    pub fn harvest_date(mut self, harvest_date: Date) -> Self {
        self.harvest_date = Some(harvest_date);
        self
    }

    #[must_use]
    pub fn yield_weight(mut self, yield_weight: f64) -> Self {
        self.yield_weight = Some(yield_weight);
        self
    }

    #[must_use]
    pub fn created_at(mut self, created_at: Timestamp) -> Self {
        self.created_at = Some(created_at);
        self
    }

    /// Consume the builder and return a [`Harvest`]. The harvest date
    /// defaults to today when not provided.
    ///
    /// # Errors
    ///
    /// Currently infallible; returns `Result` for parity with the other
    /// builders so callers handle all entities uniformly.
    pub fn build(self) -> Result<Harvest, VerdantError> {
        let created_at = self.created_at.unwrap_or_else(now);
        Ok(Harvest {
            id: self.id.unwrap_or(HarvestId::from_i64(0)),
            plant_id: self.plant_id.unwrap_or(PlantId::from_i64(0)),
            harvest_date: self.harvest_date.unwrap_or(created_at.date_naive()),
            yield_weight: self.yield_weight,
            created_at,
        })
    }
}
