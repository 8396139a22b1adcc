//! JSON REST handlers for farms.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Deserialize;

use verdant_app::ports::{
    FarmRepository, FloorRepository, HarvestRepository, Mirror, PlantRepository, PotRepository,
};
use verdant_domain::farm::Farm;
use verdant_domain::id::FarmId;

use crate::error::ApiError;
use crate::state::AppState;

/// Request body for creating a farm.
#[derive(Deserialize)]
pub struct CreateFarmRequest {
    pub name: String,
    pub location: Option<String>,
}

/// Request body for updating a farm.
#[derive(Deserialize)]
pub struct UpdateFarmRequest {
    pub name: String,
    pub location: Option<String>,
}

/// Possible responses from the list endpoint.
pub enum ListResponse {
    Ok(Json<Vec<Farm>>),
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
    Ok(Json<Farm>),
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
    Created(Json<Farm>),
}

impl IntoResponse for CreateResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Created(json) => (StatusCode::CREATED, json).into_response(),
        }
    }
}

/// Possible responses from the update endpoint.
pub enum UpdateResponse {
    Ok(Json<Farm>),
}

impl IntoResponse for UpdateResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
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

/// `GET /api/farms`
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
    let farms = state.farm_service.list_farms().await?;
    Ok(ListResponse::Ok(Json(farms)))
}

/// `GET /api/farms/{id}`
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
    let farm = state.farm_service.get_farm(FarmId::from_i64(id)).await?;
    Ok(GetResponse::Ok(Json(farm)))
}

/// `POST /api/farms`
pub async fn create<FR, LR, PR, PLR, HR, M>(
    State(state): State<AppState<FR, LR, PR, PLR, HR, M>>,
    Json(req): Json<CreateFarmRequest>,
) -> Result<CreateResponse, ApiError>
where
    FR: FarmRepository + Send + Sync + 'static,
    LR: FloorRepository + Send + Sync + 'static,
    PR: PotRepository + Send + Sync + 'static,
    PLR: PlantRepository + Send + Sync + 'static,
    HR: HarvestRepository + Send + Sync + 'static,
    M: Mirror + 'static,
{
    let mut builder = Farm::builder().name(req.name);
    if let Some(location) = req.location {
        builder = builder.location(location);
    }

    let farm = builder.build()?;
    let created = state.farm_service.create_farm(farm).await?;
    Ok(CreateResponse::Created(Json(created)))
}

/// `PUT /api/farms/{id}`
pub async fn update<FR, LR, PR, PLR, HR, M>(
    State(state): State<AppState<FR, LR, PR, PLR, HR, M>>,
    Path(id): Path<i64>,
    Json(req): Json<UpdateFarmRequest>,
) -> Result<UpdateResponse, ApiError>
where
    FR: FarmRepository + Send + Sync + 'static,
    LR: FloorRepository + Send + Sync + 'static,
    PR: PotRepository + Send + Sync + 'static,
    PLR: PlantRepository + Send + Sync + 'static,
    HR: HarvestRepository + Send + Sync + 'static,
    M: Mirror + 'static,
{
    let mut builder = Farm::builder().id(FarmId::from_i64(id)).name(req.name);
    if let Some(location) = req.location {
        builder = builder.location(location);
    }

    let farm = builder.build()?;
    let updated = state.farm_service.update_farm(farm).await?;
    Ok(UpdateResponse::Ok(Json(updated)))
}

/// `DELETE /api/farms/{id}`
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
    state.farm_service.delete_farm(FarmId::from_i64(id)).await?;
    Ok(DeleteResponse::NoContent)
}
