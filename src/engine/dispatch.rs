use std::sync::Arc;
use std::time::Instant;

use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;
use tokio::time::{sleep, Duration};
use tracing::{info, warn};
use uuid::Uuid;

use crate::engine::assignment::{assign_driver, find_best_driver, DispatchRequest};
use crate::error::AppError;
use crate::models::assignment::Assignment;
use crate::models::booking::BookingStatus;
use crate::models::event::BookingEvent;
use crate::state::AppState;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DispatchPriority {
    Normal,
    High,
}

#[derive(Debug, Clone, Copy)]
pub struct AttemptPlan {
    pub radius_km: f64,
    pub priority: DispatchPriority,
}

pub const MAX_ATTEMPTS: usize = 3;

const RETRY_BACKOFF_MS: u64 = 2_000;

/// Fixed escalation: widen the search and raise priority on each retry.
pub fn attempt_plan() -> [AttemptPlan; MAX_ATTEMPTS] {
    [
        AttemptPlan {
            radius_km: 5.0,
            priority: DispatchPriority::Normal,
        },
        AttemptPlan {
            radius_km: 10.0,
            priority: DispatchPriority::High,
        },
        AttemptPlan {
            radius_km: 15.0,
            priority: DispatchPriority::High,
        },
    ]
}

/// Consumes the dispatch queue. Each booking gets its own retry
/// controller task; bookings never wait on each other's backoff.
pub async fn run_dispatch_engine(state: Arc<AppState>, mut dispatch_rx: mpsc::Receiver<Uuid>) {
    info!("dispatch engine started");

    while let Some(booking_id) = dispatch_rx.recv().await {
        state.metrics.bookings_in_queue.dec();

        let state = state.clone();
        tokio::spawn(async move {
            let start = Instant::now();
            let outcome = match dispatch_with_retry(&state, booking_id).await {
                Ok(_) => "success",
                Err(err) => {
                    warn!(booking_id = %booking_id, error = %err, "dispatch failed");
                    "error"
                }
            };

            state
                .metrics
                .dispatch_latency_seconds
                .with_label_values(&[outcome])
                .observe(start.elapsed().as_secs_f64());
            state
                .metrics
                .assignments_total
                .with_label_values(&[outcome])
                .inc();
        });
    }

    warn!("dispatch engine stopped: queue channel closed");
}

/// Sequential attempts over the escalation plan. Returns on the first
/// success; after the last failure the final error surfaces unchanged.
pub async fn dispatch_with_retry(
    state: &AppState,
    booking_id: Uuid,
) -> Result<Assignment, AppError> {
    let base_request = begin_search(state, booking_id)?;

    let mut last_err: Option<AppError> = None;

    for (index, plan) in attempt_plan().iter().enumerate() {
        let attempt = index + 1;
        let request = DispatchRequest {
            priority: plan.priority,
            ..base_request.clone()
        };

        match try_once(state, booking_id, &request, plan.radius_km).await {
            Ok(assignment) => {
                state
                    .metrics
                    .dispatch_attempts_total
                    .with_label_values(&["assigned"])
                    .inc();
                info!(
                    booking_id = %booking_id,
                    attempt,
                    radius_km = plan.radius_km,
                    "dispatch attempt succeeded"
                );
                return Ok(assignment);
            }
            Err(err) => {
                state
                    .metrics
                    .dispatch_attempts_total
                    .with_label_values(&["failed"])
                    .inc();
                warn!(
                    booking_id = %booking_id,
                    attempt,
                    radius_km = plan.radius_km,
                    error = %err,
                    "dispatch attempt failed"
                );
                last_err = Some(err);
            }
        }

        if !still_searching(state, booking_id) {
            return Err(AppError::Conflict(format!(
                "booking {booking_id} left the searching state"
            )));
        }

        if attempt < MAX_ATTEMPTS {
            sleep(Duration::from_millis(RETRY_BACKOFF_MS * attempt as u64)).await;
        }
    }

    let err =
        last_err.unwrap_or_else(|| AppError::Internal("dispatch ended without attempts".into()));

    if let Some(mut booking) = state.bookings.get_mut(&booking_id) {
        if booking.status == BookingStatus::Searching {
            booking.status = BookingStatus::Pending;
        }
    }
    state.publish(BookingEvent::DispatchFailed {
        booking_id,
        reason: err.to_string(),
    });

    Err(err)
}

fn begin_search(state: &AppState, booking_id: Uuid) -> Result<DispatchRequest, AppError> {
    let mut booking = state
        .bookings
        .get_mut(&booking_id)
        .ok_or_else(|| AppError::NotFound(format!("booking {booking_id} not found")))?;

    if booking.bidding.is_some() {
        return Err(AppError::Conflict(format!(
            "booking {booking_id} is in bidding mode"
        )));
    }
    if booking.status != BookingStatus::Pending {
        return Err(AppError::Conflict(format!(
            "booking {booking_id} is not awaiting dispatch"
        )));
    }

    booking.status = BookingStatus::Searching;

    Ok(DispatchRequest {
        pickup: booking.pickup,
        dropoff: booking.dropoff,
        service: booking.service,
        vehicle_class: booking.vehicle_class,
        priority: DispatchPriority::Normal,
    })
}

async fn try_once(
    state: &AppState,
    booking_id: Uuid,
    request: &DispatchRequest,
    radius_km: f64,
) -> Result<Assignment, AppError> {
    let proposal = find_best_driver(state, request, radius_km).await?;
    assign_driver(state, booking_id, &proposal).await
}

fn still_searching(state: &AppState, booking_id: Uuid) -> bool {
    state
        .bookings
        .get(&booking_id)
        .map(|booking| booking.status == BookingStatus::Searching)
        .unwrap_or(false)
}
