//! Mirror port — mutation hooks and full resync for the bus mirror.
//!
//! CRUD services call the hooks synchronously after a successful database
//! write. Hooks return `()` because the mirror is best-effort: a bus failure
//! is logged by the implementation and leaves the bus stale until the next
//! resync, but it must never abort the caller's CRUD operation. The database
//! is the source of truth.

use std::future::Future;

use serde::Serialize;

use verdant_domain::error::VerdantError;
use verdant_domain::farm::Farm;
use verdant_domain::id::{FarmId, PlantId};
use verdant_domain::plant::Plant;

/// Counts reported by a full resync.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
pub struct ResyncSummary {
    /// Farms republished.
    pub farms: usize,
    /// Plants republished.
    pub plants: usize,
    /// Entities whose publish failed (left stale until the next resync).
    pub failures: usize,
}

/// Keeps the external bus representation consistent with the store.
pub trait Mirror: Send + Sync {
    /// Publish discovery + state for a freshly created farm.
    fn farm_created(&self, farm: &Farm) -> impl Future<Output = ()> + Send;

    /// Republish state (and identity-derived discovery) after an update.
    fn farm_updated(&self, farm: &Farm) -> impl Future<Output = ()> + Send;

    /// Retract every retained topic of a deleted farm.
    fn farm_deleted(&self, id: FarmId) -> impl Future<Output = ()> + Send;

    /// Publish discovery + state for a freshly created plant.
    fn plant_created(&self, plant: &Plant) -> impl Future<Output = ()> + Send;

    /// Republish state (and identity-derived discovery) after an update.
    fn plant_updated(&self, plant: &Plant) -> impl Future<Output = ()> + Send;

    /// Retract every retained topic of a deleted plant.
    fn plant_deleted(&self, id: PlantId) -> impl Future<Output = ()> + Send;

    /// Re-emit discovery + state for every live entity plus the server
    /// liveness pair. Safe to call repeatedly; topics and payloads are
    /// deterministic so a second run overwrites with identical bytes.
    ///
    /// # Errors
    ///
    /// Returns an error only when the live set cannot be enumerated from
    /// storage; per-entity bus failures are counted, not raised.
    fn resync_all(&self) -> impl Future<Output = Result<ResyncSummary, VerdantError>> + Send;
}

impl<T: Mirror> Mirror for std::sync::Arc<T> {
    fn farm_created(&self, farm: &Farm) -> impl Future<Output = ()> + Send {
        (**self).farm_created(farm)
    }

    fn farm_updated(&self, farm: &Farm) -> impl Future<Output = ()> + Send {
        (**self).farm_updated(farm)
    }

    fn farm_deleted(&self, id: FarmId) -> impl Future<Output = ()> + Send {
        (**self).farm_deleted(id)
    }

    fn plant_created(&self, plant: &Plant) -> impl Future<Output = ()> + Send {
        (**self).plant_created(plant)
    }

    fn plant_updated(&self, plant: &Plant) -> impl Future<Output = ()> + Send {
        (**self).plant_updated(plant)
    }

    fn plant_deleted(&self, id: PlantId) -> impl Future<Output = ()> + Send {
        (**self).plant_deleted(id)
    }

    fn resync_all(&self) -> impl Future<Output = Result<ResyncSummary, VerdantError>> + Send {
        (**self).resync_all()
    }
}

/// Mirror that does nothing, for bus-less runs and handler tests.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopMirror;

impl Mirror for NoopMirror {
    async fn farm_created(&self, _farm: &Farm) {}

    async fn farm_updated(&self, _farm: &Farm) {}

    async fn farm_deleted(&self, _id: FarmId) {}

    async fn plant_created(&self, _plant: &Plant) {}

    async fn plant_updated(&self, _plant: &Plant) {}

    async fn plant_deleted(&self, _id: PlantId) {}

    async fn resync_all(&self) -> Result<ResyncSummary, VerdantError> {
        Ok(ResyncSummary::default())
    }
}
