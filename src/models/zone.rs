use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::driver::{GeoPoint, VehicleClass};

/// Per-class fare schedule. Fares are whole Congolese francs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tariff {
    pub base_fare: i64,
    pub per_km_rate: i64,
    pub surge_multiplier: f64,
}

/// A geofenced service area with its own pricing. Coverage is a circle
/// around `center`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Zone {
    pub id: Uuid,
    pub name: String,
    pub center: GeoPoint,
    pub radius_km: f64,
    pub tariffs: HashMap<VehicleClass, Tariff>,
}
