//! Shared application state for axum handlers.

use std::sync::Arc;

use verdant_app::ports::{
    FarmRepository, FloorRepository, HarvestRepository, Mirror, PlantRepository, PotRepository,
};
use verdant_app::services::farm_service::FarmService;
use verdant_app::services::floor_service::FloorService;
use verdant_app::services::harvest_service::HarvestService;
use verdant_app::services::plant_service::PlantService;
use verdant_app::services::pot_service::PotService;

/// Application state shared across all axum handlers.
///
/// Generic over the repository types and the mirror to avoid dynamic
/// dispatch. `Clone` is implemented manually so the underlying types
/// themselves do not need to be `Clone` — only the `Arc` wrappers are
/// cloned.
pub struct AppState<FR, LR, PR, PLR, HR, M> {
    /// Farm CRUD service (mirrored).
    pub farm_service: Arc<FarmService<FR, Arc<M>>>,
    /// Floor CRUD service.
    pub floor_service: Arc<FloorService<LR>>,
    /// Pot CRUD service.
    pub pot_service: Arc<PotService<PR>>,
    /// Plant CRUD service (mirrored).
    pub plant_service: Arc<PlantService<PLR, Arc<M>>>,
    /// Harvest CRUD service.
    pub harvest_service: Arc<HarvestService<HR>>,
    /// Mirror handle for the explicit resync endpoint.
    pub mirror: Arc<M>,
}

impl<FR, LR, PR, PLR, HR, M> Clone for AppState<FR, LR, PR, PLR, HR, M> {
    fn clone(&self) -> Self {
        Self {
            farm_service: Arc::clone(&self.farm_service),
            floor_service: Arc::clone(&self.floor_service),
            pot_service: Arc::clone(&self.pot_service),
            plant_service: Arc::clone(&self.plant_service),
            harvest_service: Arc::clone(&self.harvest_service),
            mirror: Arc::clone(&self.mirror),
        }
    }
}

impl<FR, LR, PR, PLR, HR, M> AppState<FR, LR, PR, PLR, HR, M>
where
    FR: FarmRepository + Send + Sync + 'static,
    LR: FloorRepository + Send + Sync + 'static,
    PR: PotRepository + Send + Sync + 'static,
    PLR: PlantRepository + Send + Sync + 'static,
    HR: HarvestRepository + Send + Sync + 'static,
    M: Mirror + 'static,
{
    /// Create a new application state, wiring the mirrored services to the
    /// given mirror handle.
    pub fn new(
        farm_repo: FR,
        floor_repo: LR,
        pot_repo: PR,
        plant_repo: PLR,
        harvest_repo: HR,
        mirror: Arc<M>,
    ) -> Self {
        Self {
            farm_service: Arc::new(FarmService::new(farm_repo, Arc::clone(&mirror))),
            floor_service: Arc::new(FloorService::new(floor_repo)),
            pot_service: Arc::new(PotService::new(pot_repo)),
            plant_service: Arc::new(PlantService::new(plant_repo, Arc::clone(&mirror))),
            harvest_service: Arc::new(HarvestService::new(harvest_repo)),
            mirror,
        }
    }
}
