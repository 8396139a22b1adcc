//! JSON REST handler for the explicit mirror resync.

use axum::Json;
use axum::extract::State;
use axum::response::{IntoResponse, Response};

use verdant_app::ports::{
    FarmRepository, FloorRepository, HarvestRepository, Mirror, PlantRepository, PotRepository,
    ResyncSummary,
};

use crate::error::ApiError;
use crate::state::AppState;

/// Possible responses from the resync endpoint.
pub enum ResyncResponse {
    Ok(Json<ResyncSummary>),
}

impl IntoResponse for ResyncResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
        }
    }
}

/// `POST /api/mirror/resync`
///
/// Republishes every farm and plant to the bus and returns the summary.
pub async fn resync<FR, LR, PR, PLR, HR, M>(
    State(state): State<AppState<FR, LR, PR, PLR, HR, M>>,
) -> Result<ResyncResponse, ApiError>
where
    FR: FarmRepository + Send + Sync + 'static,
    LR: FloorRepository + Send + Sync + 'static,
    PR: PotRepository + Send + Sync + 'static,
    PLR: PlantRepository + Send + Sync + 'static,
    HR: HarvestRepository + Send + Sync + 'static,
    M: Mirror + 'static,
{
    let summary = state.mirror.resync_all().await?;
    Ok(ResyncResponse::Ok(Json(summary)))
}
