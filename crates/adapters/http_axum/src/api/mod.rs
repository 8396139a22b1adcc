//! JSON REST API handler modules.

#[allow(clippy::missing_errors_doc)]
pub mod farms;
#[allow(clippy::missing_errors_doc)]
pub mod floors;
#[allow(clippy::missing_errors_doc)]
pub mod harvests;
#[allow(clippy::missing_errors_doc)]
pub mod mirror;
#[allow(clippy::missing_errors_doc)]
pub mod plants;
#[allow(clippy::missing_errors_doc)]
pub mod pots;

use axum::Router;
use axum::routing::{get, post};

use verdant_app::ports::{
    FarmRepository, FloorRepository, HarvestRepository, Mirror, PlantRepository, PotRepository,
};

use crate::state::AppState;

/// Build the `/api` sub-router.
pub fn routes<FR, LR, PR, PLR, HR, M>() -> Router<AppState<FR, LR, PR, PLR, HR, M>>
where
    FR: FarmRepository + Send + Sync + 'static,
    LR: FloorRepository + Send + Sync + 'static,
    PR: PotRepository + Send + Sync + 'static,
    PLR: PlantRepository + Send + Sync + 'static,
    HR: HarvestRepository + Send + Sync + 'static,
    M: Mirror + 'static,
{
    Router::new()
        // Farms
        .route(
            "/farms",
            get(farms::list::<FR, LR, PR, PLR, HR, M>)
                .post(farms::create::<FR, LR, PR, PLR, HR, M>),
        )
        .route(
            "/farms/{id}",
            get(farms::get::<FR, LR, PR, PLR, HR, M>)
                .put(farms::update::<FR, LR, PR, PLR, HR, M>)
                .delete(farms::delete::<FR, LR, PR, PLR, HR, M>),
        )
        // Floors
        .route(
            "/floors",
            get(floors::list::<FR, LR, PR, PLR, HR, M>)
                .post(floors::create::<FR, LR, PR, PLR, HR, M>),
        )
        .route(
            "/floors/{id}",
            get(floors::get::<FR, LR, PR, PLR, HR, M>)
                .delete(floors::delete::<FR, LR, PR, PLR, HR, M>),
        )
        // Pots
        .route(
            "/pots",
            get(pots::list::<FR, LR, PR, PLR, HR, M>).post(pots::create::<FR, LR, PR, PLR, HR, M>),
        )
        .route(
            "/pots/{id}",
            get(pots::get::<FR, LR, PR, PLR, HR, M>).delete(pots::delete::<FR, LR, PR, PLR, HR, M>),
        )
        // Plants
        .route(
            "/plants",
            get(plants::list::<FR, LR, PR, PLR, HR, M>)
                .post(plants::create::<FR, LR, PR, PLR, HR, M>),
        )
        .route(
            "/plants/{id}",
            get(plants::get::<FR, LR, PR, PLR, HR, M>)
                .put(plants::update::<FR, LR, PR, PLR, HR, M>)
                .delete(plants::delete::<FR, LR, PR, PLR, HR, M>),
        )
        .route(
            "/plants/qr/{code}",
            get(plants::get_by_qr::<FR, LR, PR, PLR, HR, M>),
        )
        // Harvests
        .route(
            "/harvests",
            get(harvests::list::<FR, LR, PR, PLR, HR, M>)
                .post(harvests::create::<FR, LR, PR, PLR, HR, M>),
        )
        .route(
            "/harvests/{id}",
            get(harvests::get::<FR, LR, PR, PLR, HR, M>)
                .delete(harvests::delete::<FR, LR, PR, PLR, HR, M>),
        )
        // Mirror
        .route(
            "/mirror/resync",
            post(mirror::resync::<FR, LR, PR, PLR, HR, M>),
        )
}
