//! JSON REST handlers for harvests.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Deserialize;

use verdant_app::ports::{
    FarmRepository, FloorRepository, HarvestRepository, Mirror, PlantRepository, PotRepository,
};
use verdant_domain::harvest::Harvest;
use verdant_domain::id::{HarvestId, PlantId};
use verdant_domain::time::Date;

use crate::error::ApiError;
use crate::state::AppState;

/// Request body for recording a harvest.
#[derive(Deserialize)]
pub struct CreateHarvestRequest {
    pub plant_id: i64,
    pub harvest_date: Option<Date>,
    pub yield_weight: Option<f64>,
}

/// Possible responses from the list endpoint.
pub enum ListResponse {
    Ok(Json<Vec<Harvest>>),
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
    Ok(Json<Harvest>),
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
    Created(Json<Harvest>),
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

/// `GET /api/harvests`
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
    let harvests = state.harvest_service.list_harvests().await?;
    Ok(ListResponse::Ok(Json(harvests)))
}

/// `GET /api/harvests/{id}`
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
    let harvest = state
        .harvest_service
        .get_harvest(HarvestId::from_i64(id))
        .await?;
    Ok(GetResponse::Ok(Json(harvest)))
}

/// `POST /api/harvests`
pub async fn create<FR, LR, PR, PLR, HR, M>(
    State(state): State<AppState<FR, LR, PR, PLR, HR, M>>,
    Json(req): Json<CreateHarvestRequest>,
) -> Result<CreateResponse, ApiError>
where
    FR: FarmRepository + Send + Sync + 'static,
    LR: FloorRepository + Send + Sync + 'static,
    PR: PotRepository + Send + Sync + 'static,
    PLR: PlantRepository + Send + Sync + 'static,
    HR: HarvestRepository + Send + Sync + 'static,
    M: Mirror + 'static,
{
    let mut builder = Harvest::builder().plant_id(PlantId::from_i64(req.plant_id));
    if let Some(date) = req.harvest_date {
        builder = builder.harvest_date(date);
    }
    if let Some(weight) = req.yield_weight {
        builder = builder.yield_weight(weight);
    }

    let harvest = builder.build()?;
    let created = state.harvest_service.create_harvest(harvest).await?;
    Ok(CreateResponse::Created(Json(created)))
}

/// `DELETE /api/harvests/{id}`
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
        .harvest_service
        .delete_harvest(HarvestId::from_i64(id))
        .await?;
    Ok(DeleteResponse::NoContent)
}
