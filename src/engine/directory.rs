use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::geo::haversine_km;
use crate::models::driver::{DriverStatus, GeoPoint, VehicleClass};
use crate::models::zone::{Tariff, Zone};
use crate::state::AppState;

/// Candidate produced by a nearby-driver search. Computed per dispatch
/// attempt and discarded after selection.
#[derive(Debug, Clone)]
pub struct DriverCandidate {
    pub id: Uuid,
    pub location: GeoPoint,
    pub distance_km: f64,
    pub rating: f64,
    pub total_rides: u32,
    pub last_seen_at: DateTime<Utc>,
}

/// Resolve the zone covering `point`. When geofences overlap the zone
/// whose center is closest wins, ties going to the smaller id.
pub fn detect_zone(state: &AppState, point: &GeoPoint) -> Option<Zone> {
    state
        .zones
        .iter()
        .filter_map(|entry| {
            let zone = entry.value();
            let distance = haversine_km(point, &zone.center);
            if distance <= zone.radius_km {
                Some((distance, zone.clone()))
            } else {
                None
            }
        })
        .min_by(|a, b| a.0.total_cmp(&b.0).then_with(|| a.1.id.cmp(&b.1.id)))
        .map(|(_, zone)| zone)
}

/// Available drivers inside `zone` within `radius_km` of `pickup`,
/// holding an approved vehicle of the requested class.
pub fn find_nearby_drivers(
    state: &AppState,
    zone: &Zone,
    pickup: &GeoPoint,
    radius_km: f64,
    vehicle_class: VehicleClass,
) -> Vec<DriverCandidate> {
    state
        .drivers
        .iter()
        .filter_map(|entry| {
            let driver = entry.value();
            if driver.status != DriverStatus::Available {
                return None;
            }
            if !driver.has_approved_vehicle(vehicle_class) {
                return None;
            }
            if haversine_km(&driver.location, &zone.center) > zone.radius_km {
                return None;
            }

            let distance_km = haversine_km(&driver.location, pickup);
            if distance_km > radius_km {
                return None;
            }

            Some(DriverCandidate {
                id: driver.id,
                location: driver.location,
                distance_km,
                rating: driver.rating,
                total_rides: driver.total_rides,
                last_seen_at: driver.last_seen_at,
            })
        })
        .collect()
}

pub fn dynamic_pricing(zone: &Zone, vehicle_class: VehicleClass) -> Option<Tariff> {
    zone.tariffs.get(&vehicle_class).cloned()
}

/// Conditional available→busy flip under the entry lock. Two dispatches
/// racing for the same driver cannot both observe `Available`.
pub fn claim_driver(state: &AppState, driver_id: Uuid) -> bool {
    let claimed = match state.drivers.get_mut(&driver_id) {
        Some(mut driver) => {
            if driver.status == DriverStatus::Available {
                driver.status = DriverStatus::Busy;
                driver.updated_at = Utc::now();
                true
            } else {
                false
            }
        }
        None => false,
    };

    if claimed {
        refresh_driver_gauge(state);
    }
    claimed
}

pub fn release_driver(state: &AppState, driver_id: Uuid) {
    if let Some(mut driver) = state.drivers.get_mut(&driver_id) {
        if driver.status == DriverStatus::Busy {
            driver.status = DriverStatus::Available;
            driver.updated_at = Utc::now();
        }
    }
    refresh_driver_gauge(state);
}

pub fn refresh_driver_gauge(state: &AppState) {
    let available = state
        .drivers
        .iter()
        .filter(|entry| entry.value().status == DriverStatus::Available)
        .count();
    state.metrics.drivers_available.set(available as i64);
}
