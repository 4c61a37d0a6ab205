use std::sync::Arc;

use axum::extract::{Path, State};
use axum::routing::{get, post};
use axum::Json;
use axum::Router;
use serde::Deserialize;
use uuid::Uuid;

use crate::engine::bidding::{accept_offer, submit_offer, SubmitOffer};
use crate::error::AppError;
use crate::models::offer::Offer;
use crate::state::AppState;

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route(
            "/bookings/:id/offers",
            post(create_offer).get(list_offers),
        )
        .route(
            "/bookings/:id/offers/:offer_id/accept",
            post(accept_booking_offer),
        )
}

#[derive(Deserialize)]
pub struct CreateOfferRequest {
    pub driver_id: Uuid,
    pub amount: i64,
    #[serde(default)]
    pub is_counter_offer: bool,
}

async fn create_offer(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
    Json(payload): Json<CreateOfferRequest>,
) -> Result<Json<Offer>, AppError> {
    let offer = submit_offer(
        &state,
        id,
        SubmitOffer {
            driver_id: payload.driver_id,
            amount: payload.amount,
            is_counter_offer: payload.is_counter_offer,
        },
    )
    .await?;

    Ok(Json(offer))
}

async fn list_offers(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<Vec<Offer>>, AppError> {
    if !state.bookings.contains_key(&id) {
        return Err(AppError::NotFound(format!("booking {} not found", id)));
    }

    let offers = state
        .offers
        .iter()
        .filter(|entry| entry.booking_id == id)
        .map(|entry| entry.value().clone())
        .collect();

    Ok(Json(offers))
}

async fn accept_booking_offer(
    State(state): State<Arc<AppState>>,
    Path((id, offer_id)): Path<(Uuid, Uuid)>,
) -> Result<Json<Offer>, AppError> {
    let offer = accept_offer(&state, id, offer_id).await?;
    Ok(Json(offer))
}
