use chrono::Utc;
use tracing::info;
use uuid::Uuid;

use crate::engine::directory::{
    claim_driver, detect_zone, dynamic_pricing, find_nearby_drivers, release_driver,
};
use crate::engine::dispatch::DispatchPriority;
use crate::engine::pricing::{estimated_arrival_minutes, quote_price};
use crate::engine::scoring::select_best;
use crate::error::AppError;
use crate::geo::haversine_km;
use crate::models::assignment::{Assignment, AssignmentProposal};
use crate::models::booking::BookingStatus;
use crate::models::driver::{GeoPoint, ServiceKind, VehicleClass};
use crate::models::event::BookingEvent;
use crate::state::AppState;

#[derive(Debug, Clone)]
pub struct DispatchRequest {
    pub pickup: GeoPoint,
    pub dropoff: Option<GeoPoint>,
    pub service: ServiceKind,
    pub vehicle_class: VehicleClass,
    pub priority: DispatchPriority,
}

/// One dispatch attempt: zone resolution, candidate search, preference
/// filtering, scoring, and quote. No state is written.
pub async fn find_best_driver(
    state: &AppState,
    request: &DispatchRequest,
    radius_km: f64,
) -> Result<AssignmentProposal, AppError> {
    let zone = detect_zone(state, &request.pickup).ok_or(AppError::ZoneNotCovered)?;

    let candidates =
        find_nearby_drivers(state, &zone, &request.pickup, radius_km, request.vehicle_class);
    if candidates.is_empty() {
        return Err(AppError::NoDriversAvailable);
    }

    let compatible: Vec<_> = candidates
        .into_iter()
        .filter(|candidate| {
            let Some(driver) = state.drivers.get(&candidate.id) else {
                return false;
            };
            if !driver.accepts_service(request.service) {
                return false;
            }
            match driver.preferences.max_pickup_distance_km {
                Some(max_km) => candidate.distance_km <= max_km,
                None => true,
            }
        })
        .collect();

    if compatible.is_empty() {
        return Err(AppError::NoCompatibleDrivers);
    }

    let now = Utc::now();
    let (best, score, breakdown) = select_best(&compatible, now)
        .ok_or_else(|| AppError::Internal("failed to score candidates".to_string()))?;

    let tariff =
        dynamic_pricing(&zone, request.vehicle_class).ok_or(AppError::ZoneNotCovered)?;

    let mut total_distance_km = best.distance_km;
    if let Some(dropoff) = &request.dropoff {
        total_distance_km += haversine_km(&request.pickup, dropoff);
    }

    Ok(AssignmentProposal {
        driver_id: best.id,
        distance_km: best.distance_km,
        estimated_arrival_minutes: estimated_arrival_minutes(best.distance_km),
        estimated_price: quote_price(&tariff, total_distance_km),
        zone_id: zone.id,
        surge_multiplier: tariff.surge_multiplier,
        score,
        score_breakdown: breakdown,
    })
}

/// Confirm a proposal: claim the driver, then write the booking. The
/// claim is conditional on the driver still being available, so two
/// bookings cannot win the same driver. A failed booking write releases
/// the claim.
pub async fn assign_driver(
    state: &AppState,
    booking_id: Uuid,
    proposal: &AssignmentProposal,
) -> Result<Assignment, AppError> {
    if !claim_driver(state, proposal.driver_id) {
        return Err(AppError::AssignmentWriteFailed(format!(
            "driver {} is no longer available",
            proposal.driver_id
        )));
    }

    let write_result = match state.bookings.get_mut(&booking_id) {
        None => Err(AppError::NotFound(format!("booking {booking_id} not found"))),
        Some(mut booking) => {
            if booking.status != BookingStatus::Searching {
                Err(AppError::Conflict(format!(
                    "booking {booking_id} is no longer searching"
                )))
            } else {
                booking.status = BookingStatus::DriverAssigned;
                booking.driver_id = Some(proposal.driver_id);
                booking.quoted_price = Some(proposal.estimated_price);
                booking.zone_id = Some(proposal.zone_id);
                Ok(())
            }
        }
    };

    if let Err(err) = write_result {
        release_driver(state, proposal.driver_id);
        return Err(err);
    }

    let assignment = Assignment {
        id: Uuid::new_v4(),
        booking_id,
        driver_id: proposal.driver_id,
        score: proposal.score,
        score_breakdown: proposal.score_breakdown.clone(),
        quoted_price: proposal.estimated_price,
        assigned_at: Utc::now(),
    };
    state.assignments.insert(assignment.id, assignment.clone());

    state.publish(BookingEvent::DriverAssigned {
        booking_id,
        driver_id: proposal.driver_id,
        price: proposal.estimated_price,
        eta_minutes: proposal.estimated_arrival_minutes,
    });

    info!(
        booking_id = %booking_id,
        driver_id = %proposal.driver_id,
        score = proposal.score,
        price = proposal.estimated_price,
        "driver assigned"
    );

    Ok(assignment)
}
