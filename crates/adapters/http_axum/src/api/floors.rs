//! JSON REST handlers for floors.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Deserialize;

use verdant_app::ports::{
    FarmRepository, FloorRepository, HarvestRepository, Mirror, PlantRepository, PotRepository,
};
use verdant_domain::floor::Floor;
use verdant_domain::id::{FarmId, FloorId};

use crate::error::ApiError;
use crate::state::AppState;

/// Request body for creating a floor.
#[derive(Deserialize)]
pub struct CreateFloorRequest {
    pub farm_id: i64,
    pub name: String,
    pub level: Option<i64>,
}

/// Possible responses from the list endpoint.
pub enum ListResponse {
    Ok(Json<Vec<Floor>>),
}

impl IntoResponse for ListResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
        }
    }
}

/// Possible responses from the get endpoint.
pub enum GetResponse {
    Ok(Json<Floor>),
}

impl IntoResponse for GetResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
        }
    }
}

/// Possible responses from the create endpoint.
pub enum CreateResponse {
    Created(Json<Floor>),
}

impl IntoResponse for CreateResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Created(json) => (StatusCode::CREATED, json).into_response(),
        }
    }
}

/// Possible responses from the delete endpoint.
pub enum DeleteResponse {
    NoContent,
}

impl IntoResponse for DeleteResponse {
    fn into_response(self) -> Response {
        match self {
            Self::NoContent => StatusCode::NO_CONTENT.into_response(),
        }
    }
}

/// `GET /api/floors`
pub async fn list<FR, LR, PR, PLR, HR, M>(
    State(state): State<AppState<FR, LR, PR, PLR, HR, M>>,
) -> Result<ListResponse, ApiError>
where
    FR: FarmRepository + Send + Sync + 'static,
    LR: FloorRepository + Send + Sync + 'static,
    PR: PotRepository + Send + Sync + 'static,
    PLR: PlantRepository + Send + Sync + 'static,
    HR: HarvestRepository + Send + Sync + 'static,
    M: Mirror + 'static,
{
    let floors = state.floor_service.list_floors().await?;
    Ok(ListResponse::Ok(Json(floors)))
}

/// `GET /api/floors/{id}`
pub async fn get<FR, LR, PR, PLR, HR, M>(
    State(state): State<AppState<FR, LR, PR, PLR, HR, M>>,
    Path(id): Path<i64>,
) -> Result<GetResponse, ApiError>
where
    FR: FarmRepository + Send + Sync + 'static,
    LR: FloorRepository + Send + Sync + 'static,
    PR: PotRepository + Send + Sync + 'static,
    PLR: PlantRepository + Send + Sync + 'static,
    HR: HarvestRepository + Send + Sync + 'static,
    M: Mirror + 'static,
{
    let floor = state
        .floor_service
        .get_floor(FloorId::from_i64(id))
        .await?;
    Ok(GetResponse::Ok(Json(floor)))
}

/// `POST /api/floors`
pub async fn create<FR, LR, PR, PLR, HR, M>(
    State(state): State<AppState<FR, LR, PR, PLR, HR, M>>,
    Json(req): Json<CreateFloorRequest>,
) -> Result<CreateResponse, ApiError>
where
    FR: FarmRepository + Send + Sync + 'static,
    LR: FloorRepository + Send + Sync + 'static,
    PR: PotRepository + Send + Sync + 'static,
    PLR: PlantRepository + Send + Sync + 'static,
    HR: HarvestRepository + Send + Sync + 'static,
    M: Mirror + 'static,
{
    let mut builder = Floor::builder()
        .farm_id(FarmId::from_i64(req.farm_id))
        .name(req.name);
    if let Some(level) = req.level {
        builder = builder.level(level);
    }

    let floor = builder.build()?;
    let created = state.floor_service.create_floor(floor).await?;
    Ok(CreateResponse::Created(Json(created)))
}

/// `DELETE /api/floors/{id}`
pub async fn delete<FR, LR, PR, PLR, HR, M>(
    State(state): State<AppState<FR, LR, PR, PLR, HR, M>>,
    Path(id): Path<i64>,
) -> Result<DeleteResponse, ApiError>
where
    FR: FarmRepository + Send + Sync + 'static,
    LR: FloorRepository + Send + Sync + 'static,
    PR: PotRepository + Send + Sync + 'static,
    PLR: PlantRepository + Send + Sync + 'static,
    HR: HarvestRepository + Send + Sync + 'static,
    M: Mirror + 'static,
{
    state
        .floor_service
        .delete_floor(FloorId::from_i64(id))
        .await?;
    Ok(DeleteResponse::NoContent)
}
