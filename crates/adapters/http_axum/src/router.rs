//! Axum router assembly.

use axum::Router;
use axum::routing::get;
use tower_http::trace::TraceLayer;

use verdant_app::ports::{
    FarmRepository, FloorRepository, HarvestRepository, Mirror, PlantRepository, PotRepository,
};

use crate::state::AppState;

/// Build the top-level axum [`Router`].
///
/// Mounts the API routes under `/api`. Includes a [`TraceLayer`] that logs
/// each HTTP request/response at the `DEBUG` level using the `tracing`
/// ecosystem.
pub fn build<FR, LR, PR, PLR, HR, M>(state: AppState<FR, LR, PR, PLR, HR, M>) -> Router
where
    FR: FarmRepository + Send + Sync + 'static,
    LR: FloorRepository + Send + Sync + 'static,
    PR: PotRepository + Send + Sync + 'static,
    PLR: PlantRepository + Send + Sync + 'static,
    HR: HarvestRepository + Send + Sync + 'static,
    M: Mirror + 'static,
{
    Router::new()
        .route("/health", get(health_check))
        .nest("/api", crate::api::routes())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health_check() -> &'static str {
    "OK"
}
