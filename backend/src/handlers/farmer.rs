//! HTTP handlers for the active farmer and dashboard persona

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use shared::{Farmer, UserType};
use uuid::Uuid;

use crate::error::AppResult;
use crate::services::FarmerService;
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct SwitchFarmerInput {
    pub farmer_id: Uuid,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct UserTypeBody {
    pub user_type: UserType,
}

/// Get the active farmer
pub async fn get_current_farmer(State(state): State<AppState>) -> AppResult<Json<Farmer>> {
    let service = FarmerService::new(state.dashboard);
    let farmer = service.current_farmer().await?;
    Ok(Json(farmer))
}

/// List known farmer profiles
pub async fn list_farmers(State(state): State<AppState>) -> Json<Vec<Farmer>> {
    let service = FarmerService::new(state.dashboard);
    Json(service.list_farmers().await)
}

/// Switch the active farmer
pub async fn switch_farmer(
    State(state): State<AppState>,
    Json(input): Json<SwitchFarmerInput>,
) -> AppResult<Json<Farmer>> {
    let service = FarmerService::new(state.dashboard);
    let farmer = service.switch_farmer(input.farmer_id).await?;
    Ok(Json(farmer))
}

pub async fn get_user_type(State(state): State<AppState>) -> Json<UserTypeBody> {
    let service = FarmerService::new(state.dashboard);
    Json(UserTypeBody {
        user_type: service.user_type().await,
    })
}

pub async fn set_user_type(
    State(state): State<AppState>,
    Json(input): Json<UserTypeBody>,
) -> Json<UserTypeBody> {
    let service = FarmerService::new(state.dashboard);
    Json(UserTypeBody {
        user_type: service.set_user_type(input.user_type).await,
    })
}
