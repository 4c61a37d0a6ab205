use std::sync::Arc;

use axum::extract::{Path, State};
use axum::routing::{patch, post};
use axum::Json;
use axum::Router;
use chrono::{Duration, Utc};
use serde::Deserialize;
use uuid::Uuid;

use crate::engine::directory::refresh_driver_gauge;
use crate::error::AppError;
use crate::models::driver::{
    Driver, DriverPreferences, DriverStatus, GeoPoint, ServiceKind, Subscription,
    SubscriptionStatus, VehicleAssociation,
};
use crate::state::AppState;

const DEFAULT_SUBSCRIPTION_RIDES: u32 = 20;
const DEFAULT_SUBSCRIPTION_DAYS: i64 = 30;

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/drivers", post(create_driver).get(list_drivers))
        .route("/drivers/:id/location", patch(update_driver_location))
        .route("/drivers/:id/status", patch(update_driver_status))
        .route("/drivers/:id/preferences", patch(update_driver_preferences))
}

#[derive(Deserialize)]
pub struct CreateDriverRequest {
    pub name: String,
    pub location: GeoPoint,
    pub vehicles: Vec<VehicleAssociation>,
    pub rating: f64,
    #[serde(default)]
    pub total_rides: u32,
    #[serde(default)]
    pub preferences: DriverPreferences,
    pub subscription: Option<Subscription>,
}

#[derive(Deserialize)]
pub struct UpdateLocationRequest {
    pub location: GeoPoint,
}

#[derive(Deserialize)]
pub struct UpdateStatusRequest {
    pub status: DriverStatus,
}

#[derive(Deserialize)]
pub struct UpdatePreferencesRequest {
    pub service_kinds: Option<Vec<ServiceKind>>,
    pub max_pickup_distance_km: Option<f64>,
}

async fn create_driver(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<CreateDriverRequest>,
) -> Result<Json<Driver>, AppError> {
    if payload.name.trim().is_empty() {
        return Err(AppError::BadRequest("name cannot be empty".to_string()));
    }

    if payload.vehicles.is_empty() {
        return Err(AppError::BadRequest(
            "driver needs at least one vehicle".to_string(),
        ));
    }

    let now = Utc::now();
    let subscription = payload.subscription.unwrap_or(Subscription {
        status: SubscriptionStatus::Active,
        rides_remaining: DEFAULT_SUBSCRIPTION_RIDES,
        expires_at: now + Duration::days(DEFAULT_SUBSCRIPTION_DAYS),
    });

    let driver = Driver {
        id: Uuid::new_v4(),
        name: payload.name,
        location: payload.location,
        status: DriverStatus::Available,
        rating: payload.rating.clamp(0.0, 5.0),
        total_rides: payload.total_rides,
        last_seen_at: now,
        vehicles: payload.vehicles,
        preferences: payload.preferences,
        subscription,
        updated_at: now,
    };

    state.drivers.insert(driver.id, driver.clone());
    refresh_driver_gauge(&state);
    Ok(Json(driver))
}

async fn list_drivers(State(state): State<Arc<AppState>>) -> Json<Vec<Driver>> {
    let drivers = state
        .drivers
        .iter()
        .map(|entry| entry.value().clone())
        .collect();
    Json(drivers)
}

/// A location update doubles as the driver's liveness ping.
async fn update_driver_location(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateLocationRequest>,
) -> Result<Json<Driver>, AppError> {
    let mut driver = state
        .drivers
        .get_mut(&id)
        .ok_or_else(|| AppError::NotFound(format!("driver {} not found", id)))?;

    driver.location = payload.location;
    driver.last_seen_at = Utc::now();
    driver.updated_at = Utc::now();

    Ok(Json(driver.clone()))
}

async fn update_driver_status(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateStatusRequest>,
) -> Result<Json<Driver>, AppError> {
    let updated = {
        let mut driver = state
            .drivers
            .get_mut(&id)
            .ok_or_else(|| AppError::NotFound(format!("driver {} not found", id)))?;

        driver.status = payload.status;
        driver.updated_at = Utc::now();
        driver.clone()
    };

    refresh_driver_gauge(&state);
    Ok(Json(updated))
}

async fn update_driver_preferences(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdatePreferencesRequest>,
) -> Result<Json<Driver>, AppError> {
    let mut driver = state
        .drivers
        .get_mut(&id)
        .ok_or_else(|| AppError::NotFound(format!("driver {} not found", id)))?;

    driver.preferences = DriverPreferences {
        service_kinds: payload.service_kinds,
        max_pickup_distance_km: payload.max_pickup_distance_km,
    };
    driver.updated_at = Utc::now();

    Ok(Json(driver.clone()))
}
