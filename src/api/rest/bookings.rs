use std::sync::Arc;

use axum::extract::{Path, State};
use axum::routing::{get, post};
use axum::Json;
use axum::Router;
use chrono::{Duration, Utc};
use serde::Deserialize;
use uuid::Uuid;

use crate::engine::directory::release_driver;
use crate::engine::queue::enqueue_dispatch;
use crate::error::AppError;
use crate::models::assignment::Assignment;
use crate::models::booking::{BiddingTerms, Booking, BookingStatus};
use crate::models::driver::{GeoPoint, ServiceKind, VehicleClass};
use crate::models::event::BookingEvent;
use crate::models::offer::OfferStatus;
use crate::state::AppState;

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/bookings", post(create_booking))
        .route("/bookings/:id", get(get_booking))
        .route("/bookings/:id/cancel", post(cancel_booking))
        .route("/bookings/:id/start", post(start_booking))
        .route("/bookings/:id/complete", post(complete_booking))
        .route("/assignments", get(list_assignments))
}

#[derive(Deserialize)]
pub struct BiddingRequest {
    pub proposed_price: i64,
    pub window_secs: i64,
}

#[derive(Deserialize)]
pub struct CreateBookingRequest {
    pub rider_id: Uuid,
    pub pickup: GeoPoint,
    pub dropoff: Option<GeoPoint>,
    pub service: ServiceKind,
    pub vehicle_class: VehicleClass,
    pub bidding: Option<BiddingRequest>,
}

async fn create_booking(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<CreateBookingRequest>,
) -> Result<Json<Booking>, AppError> {
    let bidding = match &payload.bidding {
        Some(request) => {
            if request.proposed_price <= 0 {
                return Err(AppError::BadRequest(
                    "proposed price must be positive".to_string(),
                ));
            }
            if request.window_secs <= 0 {
                return Err(AppError::BadRequest(
                    "bidding window must be positive".to_string(),
                ));
            }
            Some(BiddingTerms {
                proposed_price: request.proposed_price,
                closes_at: Utc::now() + Duration::seconds(request.window_secs),
            })
        }
        None => None,
    };

    let booking = Booking {
        id: Uuid::new_v4(),
        rider_id: payload.rider_id,
        pickup: payload.pickup,
        dropoff: payload.dropoff,
        service: payload.service,
        vehicle_class: payload.vehicle_class,
        status: BookingStatus::Pending,
        driver_id: None,
        quoted_price: None,
        zone_id: None,
        bidding,
        created_at: Utc::now(),
    };

    state.bookings.insert(booking.id, booking.clone());

    // Bidding bookings wait for offers; everything else goes straight
    // to the dispatch queue.
    if booking.bidding.is_none() {
        enqueue_dispatch(&state, booking.id).await?;
    }

    Ok(Json(booking))
}

async fn get_booking(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<Booking>, AppError> {
    let booking = state
        .bookings
        .get(&id)
        .ok_or_else(|| AppError::NotFound(format!("booking {} not found", id)))?;

    Ok(Json(booking.value().clone()))
}

async fn cancel_booking(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<Booking>, AppError> {
    let (cancelled, assigned_driver) = {
        let mut booking = state
            .bookings
            .get_mut(&id)
            .ok_or_else(|| AppError::NotFound(format!("booking {} not found", id)))?;

        if booking.status.is_terminal() {
            return Err(AppError::Conflict(format!(
                "booking {} is already finished",
                id
            )));
        }
        if booking.status == BookingStatus::InProgress {
            return Err(AppError::Conflict(format!(
                "booking {} is already underway",
                id
            )));
        }

        let driver = booking.driver_id.take();
        booking.status = BookingStatus::Cancelled;
        booking.bidding = None;
        (booking.clone(), driver)
    };

    if let Some(driver_id) = assigned_driver {
        release_driver(&state, driver_id);
    }

    // Any offers still pending on a cancelled bidding booking lose.
    let orphaned: Vec<Uuid> = state
        .offers
        .iter()
        .filter(|entry| entry.booking_id == id && entry.status == OfferStatus::Pending)
        .map(|entry| entry.id)
        .collect();
    for offer_id in orphaned {
        if let Some(mut offer) = state.offers.get_mut(&offer_id) {
            offer.status = OfferStatus::Rejected;
        }
    }

    state.publish(BookingEvent::BookingCancelled { booking_id: id });

    Ok(Json(cancelled))
}

async fn start_booking(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<Booking>, AppError> {
    let mut booking = state
        .bookings
        .get_mut(&id)
        .ok_or_else(|| AppError::NotFound(format!("booking {} not found", id)))?;

    if !matches!(
        booking.status,
        BookingStatus::DriverAssigned | BookingStatus::Confirmed
    ) {
        return Err(AppError::Conflict(format!(
            "booking {} has no driver to start with",
            id
        )));
    }

    booking.status = BookingStatus::InProgress;
    Ok(Json(booking.clone()))
}

async fn complete_booking(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<Booking>, AppError> {
    let (completed, driver_id) = {
        let mut booking = state
            .bookings
            .get_mut(&id)
            .ok_or_else(|| AppError::NotFound(format!("booking {} not found", id)))?;

        if booking.status != BookingStatus::InProgress {
            return Err(AppError::Conflict(format!(
                "booking {} is not in progress",
                id
            )));
        }

        booking.status = BookingStatus::Completed;
        (booking.clone(), booking.driver_id)
    };

    if let Some(driver_id) = driver_id {
        if let Some(mut driver) = state.drivers.get_mut(&driver_id) {
            driver.total_rides += 1;
        }
        release_driver(&state, driver_id);
    }

    Ok(Json(completed))
}

async fn list_assignments(State(state): State<Arc<AppState>>) -> Json<Vec<Assignment>> {
    let assignments = state
        .assignments
        .iter()
        .map(|entry| entry.value().clone())
        .collect();

    Json(assignments)
}
