//! JSON REST handlers for plants.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Deserialize;

use verdant_app::ports::{
    FarmRepository, FloorRepository, HarvestRepository, Mirror, PlantRepository, PotRepository,
};
use verdant_domain::id::{PlantId, PotId};
use verdant_domain::plant::{Plant, PlantBuilder};
use verdant_domain::time::Date;

use crate::error::ApiError;
use crate::state::AppState;

/// Request body for creating or updating a plant.
#[derive(Deserialize)]
pub struct PlantRequest {
    pub pot_id: Option<i64>,
    pub qr_code: Option<String>,
    pub species: String,
    pub variety: Option<String>,
    pub germination_date: Option<Date>,
    pub planting_date: Option<Date>,
    pub active: Option<bool>,
}

fn apply(mut builder: PlantBuilder, req: PlantRequest) -> PlantBuilder {
    builder = builder.species(req.species);
    if let Some(pot_id) = req.pot_id {
        builder = builder.pot_id(PotId::from_i64(pot_id));
    }
    if let Some(qr_code) = req.qr_code {
        builder = builder.qr_code(qr_code);
    }
    if let Some(variety) = req.variety {
        builder = builder.variety(variety);
    }
    if let Some(date) = req.germination_date {
        builder = builder.germination_date(date);
    }
    if let Some(date) = req.planting_date {
        builder = builder.planting_date(date);
    }
    if let Some(active) = req.active {
        builder = builder.active(active);
    }
    builder
}

/// Possible responses from the list endpoint.
pub enum ListResponse {
    Ok(Json<Vec<Plant>>),
}

impl IntoResponse for ListResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
        }
    }
}

/// Possible responses from the get endpoints.
pub enum GetResponse {
    Ok(Json<Plant>),
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
    Created(Json<Plant>),
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
    Ok(Json<Plant>),
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

/// `GET /api/plants`
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
    let plants = state.plant_service.list_plants().await?;
    Ok(ListResponse::Ok(Json(plants)))
}

/// `GET /api/plants/{id}`
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
    let plant = state
        .plant_service
        .get_plant(PlantId::from_i64(id))
        .await?;
    Ok(GetResponse::Ok(Json(plant)))
}

/// `GET /api/plants/qr/{code}`
pub async fn get_by_qr<FR, LR, PR, PLR, HR, M>(
    State(state): State<AppState<FR, LR, PR, PLR, HR, M>>,
    Path(code): Path<String>,
) -> Result<GetResponse, ApiError>
where
    FR: FarmRepository + Send + Sync + 'static,
    LR: FloorRepository + Send + Sync + 'static,
    PR: PotRepository + Send + Sync + 'static,
    PLR: PlantRepository + Send + Sync + 'static,
    HR: HarvestRepository + Send + Sync + 'static,
    M: Mirror + 'static,
{
    let plant = state.plant_service.get_plant_by_qr(&code).await?;
    Ok(GetResponse::Ok(Json(plant)))
}

/// `POST /api/plants`
pub async fn create<FR, LR, PR, PLR, HR, M>(
    State(state): State<AppState<FR, LR, PR, PLR, HR, M>>,
    Json(req): Json<PlantRequest>,
) -> Result<CreateResponse, ApiError>
where
    FR: FarmRepository + Send + Sync + 'static,
    LR: FloorRepository + Send + Sync + 'static,
    PR: PotRepository + Send + Sync + 'static,
    PLR: PlantRepository + Send + Sync + 'static,
    HR: HarvestRepository + Send + Sync + 'static,
    M: Mirror + 'static,
{
    let plant = apply(Plant::builder(), req).build()?;
    let created = state.plant_service.create_plant(plant).await?;
    Ok(CreateResponse::Created(Json(created)))
}

/// `PUT /api/plants/{id}`
pub async fn update<FR, LR, PR, PLR, HR, M>(
    State(state): State<AppState<FR, LR, PR, PLR, HR, M>>,
    Path(id): Path<i64>,
    Json(req): Json<PlantRequest>,
) -> Result<UpdateResponse, ApiError>
where
    FR: FarmRepository + Send + Sync + 'static,
    LR: FloorRepository + Send + Sync + 'static,
    PR: PotRepository + Send + Sync + 'static,
    PLR: PlantRepository + Send + Sync + 'static,
    HR: HarvestRepository + Send + Sync + 'static,
    M: Mirror + 'static,
{
    let plant = apply(Plant::builder().id(PlantId::from_i64(id)), req).build()?;
    let updated = state.plant_service.update_plant(plant).await?;
    Ok(UpdateResponse::Ok(Json(updated)))
}

/// `DELETE /api/plants/{id}`
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
        .plant_service
        .delete_plant(PlantId::from_i64(id))
        .await?;
    Ok(DeleteResponse::NoContent)
}
