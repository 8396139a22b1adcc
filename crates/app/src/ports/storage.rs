//! Storage port — repository traits for persistence.
//!
//! Record ids are assigned by the store on `create` (from a monotonic,
//! never-recycled sequence); any id carried by the value passed to `create`
//! is ignored and the returned value carries the assigned id.

use std::future::Future;

use verdant_domain::error::VerdantError;
use verdant_domain::farm::Farm;
use verdant_domain::floor::Floor;
use verdant_domain::harvest::Harvest;
use verdant_domain::id::{FarmId, FloorId, HarvestId, PlantId, PotId};
use verdant_domain::plant::Plant;
use verdant_domain::pot::Pot;

/// Persistence for [`Farm`] records.
pub trait FarmRepository {
    /// Insert a farm and return it with the store-assigned id.
    fn create(&self, farm: Farm) -> impl Future<Output = Result<Farm, VerdantError>> + Send;

    fn get_by_id(
        &self,
        id: FarmId,
    ) -> impl Future<Output = Result<Option<Farm>, VerdantError>> + Send;

    /// Full live set, no pagination — the mirror resync relies on this.
    fn get_all(&self) -> impl Future<Output = Result<Vec<Farm>, VerdantError>> + Send;

    fn update(&self, farm: Farm) -> impl Future<Output = Result<Farm, VerdantError>> + Send;

    fn delete(&self, id: FarmId) -> impl Future<Output = Result<(), VerdantError>> + Send;
}

/// Persistence for [`Floor`] records.
pub trait FloorRepository {
    fn create(&self, floor: Floor) -> impl Future<Output = Result<Floor, VerdantError>> + Send;

    fn get_by_id(
        &self,
        id: FloorId,
    ) -> impl Future<Output = Result<Option<Floor>, VerdantError>> + Send;

    fn get_all(&self) -> impl Future<Output = Result<Vec<Floor>, VerdantError>> + Send;

    fn delete(&self, id: FloorId) -> impl Future<Output = Result<(), VerdantError>> + Send;
}

/// Persistence for [`Pot`] records.
pub trait PotRepository {
    fn create(&self, pot: Pot) -> impl Future<Output = Result<Pot, VerdantError>> + Send;

    fn get_by_id(&self, id: PotId)
    -> impl Future<Output = Result<Option<Pot>, VerdantError>> + Send;

    fn get_all(&self) -> impl Future<Output = Result<Vec<Pot>, VerdantError>> + Send;

    fn delete(&self, id: PotId) -> impl Future<Output = Result<(), VerdantError>> + Send;
}

/// Persistence for [`Plant`] records.
pub trait PlantRepository {
    /// Insert a plant and return it with the store-assigned id.
    fn create(&self, plant: Plant) -> impl Future<Output = Result<Plant, VerdantError>> + Send;

    fn get_by_id(
        &self,
        id: PlantId,
    ) -> impl Future<Output = Result<Option<Plant>, VerdantError>> + Send;

    /// Full live set, no pagination — the mirror resync relies on this.
    fn get_all(&self) -> impl Future<Output = Result<Vec<Plant>, VerdantError>> + Send;

    /// Look up a plant by its (unique) QR code label.
    fn find_by_qr_code(
        &self,
        qr_code: &str,
    ) -> impl Future<Output = Result<Option<Plant>, VerdantError>> + Send;

    fn update(&self, plant: Plant) -> impl Future<Output = Result<Plant, VerdantError>> + Send;

    fn delete(&self, id: PlantId) -> impl Future<Output = Result<(), VerdantError>> + Send;
}

/// Persistence for [`Harvest`] records.
pub trait HarvestRepository {
    fn create(
        &self,
        harvest: Harvest,
    ) -> impl Future<Output = Result<Harvest, VerdantError>> + Send;

    fn get_by_id(
        &self,
        id: HarvestId,
    ) -> impl Future<Output = Result<Option<Harvest>, VerdantError>> + Send;

    fn get_all(&self) -> impl Future<Output = Result<Vec<Harvest>, VerdantError>> + Send;

    fn delete(&self, id: HarvestId) -> impl Future<Output = Result<(), VerdantError>> + Send;
}
