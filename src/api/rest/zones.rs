use std::collections::HashMap;
use std::sync::Arc;

use axum::extract::{Path, State};
use axum::routing::{patch, post};
use axum::Json;
use axum::Router;
use serde::Deserialize;
use uuid::Uuid;

use crate::error::AppError;
use crate::models::driver::{GeoPoint, VehicleClass};
use crate::models::zone::{Tariff, Zone};
use crate::state::AppState;

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/zones", post(create_zone).get(list_zones))
        .route("/zones/:id/surge", patch(update_surge))
}

#[derive(Deserialize)]
pub struct CreateZoneRequest {
    pub name: String,
    pub center: GeoPoint,
    pub radius_km: f64,
    pub tariffs: HashMap<VehicleClass, Tariff>,
}

#[derive(Deserialize)]
pub struct UpdateSurgeRequest {
    pub vehicle_class: VehicleClass,
    pub surge_multiplier: f64,
}

async fn create_zone(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<CreateZoneRequest>,
) -> Result<Json<Zone>, AppError> {
    if payload.name.trim().is_empty() {
        return Err(AppError::BadRequest("name cannot be empty".to_string()));
    }

    if payload.radius_km <= 0.0 {
        return Err(AppError::BadRequest("radius_km must be > 0".to_string()));
    }

    if payload.tariffs.is_empty() {
        return Err(AppError::BadRequest(
            "zone needs at least one tariff".to_string(),
        ));
    }

    for (class, tariff) in &payload.tariffs {
        if tariff.base_fare < 0 || tariff.per_km_rate < 0 {
            return Err(AppError::BadRequest(format!(
                "negative fares for {class:?} are not allowed"
            )));
        }
        if tariff.surge_multiplier <= 0.0 {
            return Err(AppError::BadRequest(format!(
                "surge multiplier for {class:?} must be > 0"
            )));
        }
    }

    let zone = Zone {
        id: Uuid::new_v4(),
        name: payload.name,
        center: payload.center,
        radius_km: payload.radius_km,
        tariffs: payload.tariffs,
    };

    state.zones.insert(zone.id, zone.clone());
    Ok(Json(zone))
}

async fn list_zones(State(state): State<Arc<AppState>>) -> Json<Vec<Zone>> {
    let zones = state
        .zones
        .iter()
        .map(|entry| entry.value().clone())
        .collect();
    Json(zones)
}

async fn update_surge(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateSurgeRequest>,
) -> Result<Json<Zone>, AppError> {
    if payload.surge_multiplier <= 0.0 {
        return Err(AppError::BadRequest(
            "surge multiplier must be > 0".to_string(),
        ));
    }

    let mut zone = state
        .zones
        .get_mut(&id)
        .ok_or_else(|| AppError::NotFound(format!("zone {} not found", id)))?;

    let tariff = zone
        .tariffs
        .get_mut(&payload.vehicle_class)
        .ok_or_else(|| {
            AppError::NotFound(format!(
                "zone {} has no tariff for {:?}",
                id, payload.vehicle_class
            ))
        })?;
    tariff.surge_multiplier = payload.surge_multiplier;

    Ok(Json(zone.clone()))
}
