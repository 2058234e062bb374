//! Farmer selection and dashboard persona

use shared::{Action, Farmer, UserType};
use uuid::Uuid;

use super::{dispatch, SharedDashboard};
use crate::error::{AppError, AppResult};

/// Service for the active farmer and user type
#[derive(Clone)]
pub struct FarmerService {
    dashboard: SharedDashboard,
}

impl FarmerService {
    pub fn new(dashboard: SharedDashboard) -> Self {
        Self { dashboard }
    }

    pub async fn current_farmer(&self) -> AppResult<Farmer> {
        self.dashboard
            .read()
            .await
            .current_farmer
            .clone()
            .ok_or_else(|| AppError::NotFound("Current farmer".to_string()))
    }

    pub async fn list_farmers(&self) -> Vec<Farmer> {
        self.dashboard.read().await.farmers.clone()
    }

    /// Switch the active farmer to a known profile
    pub async fn switch_farmer(&self, farmer_id: Uuid) -> AppResult<Farmer> {
        let farmer = self
            .dashboard
            .read()
            .await
            .find_farmer(farmer_id)
            .cloned()
            .ok_or_else(|| AppError::NotFound(format!("Farmer {}", farmer_id)))?;

        dispatch(&self.dashboard, Action::SetCurrentFarmer(farmer.clone())).await;
        tracing::info!(farmer_id = %farmer.id, name = %farmer.name, "Switched current farmer");
        Ok(farmer)
    }

    pub async fn user_type(&self) -> UserType {
        self.dashboard.read().await.user_type
    }

    pub async fn set_user_type(&self, user_type: UserType) -> UserType {
        dispatch(&self.dashboard, Action::SetUserType(user_type)).await;
        tracing::info!(%user_type, "Switched dashboard persona");
        user_type
    }
}
