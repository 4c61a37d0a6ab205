use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lng: f64,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub enum DriverStatus {
    Available,
    Busy,
    Offline,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VehicleClass {
    Moto,
    Eco,
    Standard,
    Premium,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ServiceKind {
    Transport,
    Delivery,
    Food,
}

/// A vehicle registered to a driver. Only approved associations count
/// for dispatch.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VehicleAssociation {
    pub vehicle_class: VehicleClass,
    pub approved: bool,
}

/// Dispatch preferences declared by the driver. `service_kinds = None`
/// means the driver takes any service.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DriverPreferences {
    pub service_kinds: Option<Vec<ServiceKind>>,
    pub max_pickup_distance_km: Option<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum SubscriptionStatus {
    Active,
    Suspended,
    Expired,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Subscription {
    pub status: SubscriptionStatus,
    pub rides_remaining: u32,
    pub expires_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Driver {
    pub id: Uuid,
    pub name: String,
    pub location: GeoPoint,
    pub status: DriverStatus,
    pub rating: f64,
    pub total_rides: u32,
    pub last_seen_at: DateTime<Utc>,
    pub vehicles: Vec<VehicleAssociation>,
    pub preferences: DriverPreferences,
    pub subscription: Subscription,
    pub updated_at: DateTime<Utc>,
}

impl Driver {
    pub fn has_approved_vehicle(&self, class: VehicleClass) -> bool {
        self.vehicles
            .iter()
            .any(|v| v.approved && v.vehicle_class == class)
    }

    pub fn accepts_service(&self, service: ServiceKind) -> bool {
        match &self.preferences.service_kinds {
            Some(kinds) => kinds.contains(&service),
            None => true,
        }
    }
}
