use std::sync::Arc;

use chrono::{DateTime, Utc};
use tokio::time::{interval, Duration};
use tracing::{info, warn};
use uuid::Uuid;

use crate::error::AppError;
use crate::models::booking::BookingStatus;
use crate::models::driver::{DriverStatus, SubscriptionStatus};
use crate::models::event::BookingEvent;
use crate::models::offer::{Offer, OfferStatus};
use crate::state::AppState;

/// Auto-resolution only considers drivers at or above this rating.
pub const RATING_FLOOR: f64 = 4.0;

/// Counter-offers above this multiple of the client's proposed price
/// are rejected outright.
pub const MAX_COUNTER_MULTIPLE: i64 = 2;

#[derive(Debug, Clone)]
pub struct SubmitOffer {
    pub driver_id: Uuid,
    pub amount: i64,
    pub is_counter_offer: bool,
}

/// Driver places a price proposal on an open bidding booking. One offer
/// per (driver, booking); the driver must hold a live subscription.
pub async fn submit_offer(
    state: &AppState,
    booking_id: Uuid,
    submit: SubmitOffer,
) -> Result<Offer, AppError> {
    if submit.amount <= 0 {
        return Err(AppError::BadRequest("offer amount must be positive".into()));
    }

    let now = Utc::now();
    let proposed_price = {
        let booking = state
            .bookings
            .get(&booking_id)
            .ok_or_else(|| AppError::NotFound(format!("booking {booking_id} not found")))?;

        let terms = booking
            .bidding
            .as_ref()
            .ok_or_else(|| AppError::Conflict(format!("booking {booking_id} is not in bidding mode")))?;

        if !booking.bidding_open() {
            return Err(AppError::Conflict(format!(
                "bidding on booking {booking_id} is already settled"
            )));
        }
        if now >= terms.closes_at {
            return Err(AppError::Conflict(format!(
                "bidding on booking {booking_id} has closed"
            )));
        }

        terms.proposed_price
    };

    check_driver_eligibility(state, submit.driver_id, now)?;

    let duplicate = state
        .offers
        .iter()
        .any(|entry| entry.booking_id == booking_id && entry.driver_id == submit.driver_id);
    if duplicate {
        return Err(AppError::DuplicateOffer);
    }

    if submit.amount > proposed_price * MAX_COUNTER_MULTIPLE {
        return Err(AppError::CounterOfferTooHigh);
    }

    let offer = Offer {
        id: Uuid::new_v4(),
        booking_id,
        driver_id: submit.driver_id,
        amount: submit.amount,
        is_counter_offer: submit.is_counter_offer,
        status: OfferStatus::Pending,
        created_at: now,
    };
    state.offers.insert(offer.id, offer.clone());

    if let Some(mut booking) = state.bookings.get_mut(&booking_id) {
        if booking.status == BookingStatus::Pending {
            booking.status = BookingStatus::OfferReceived;
        }
    }

    state
        .metrics
        .offers_total
        .with_label_values(&["submitted"])
        .inc();
    state.publish(BookingEvent::OfferSubmitted {
        booking_id,
        offer_id: offer.id,
        driver_id: offer.driver_id,
        amount: offer.amount,
    });

    info!(
        booking_id = %booking_id,
        driver_id = %offer.driver_id,
        amount = offer.amount,
        "offer submitted"
    );

    Ok(offer)
}

/// Settle the booking on the chosen offer: the winner is accepted,
/// every sibling rejected, the driver claimed and a ride consumed from
/// their subscription.
pub async fn accept_offer(
    state: &AppState,
    booking_id: Uuid,
    offer_id: Uuid,
) -> Result<Offer, AppError> {
    let (driver_id, amount) = {
        let offer = state
            .offers
            .get(&offer_id)
            .ok_or_else(|| AppError::NotFound(format!("offer {offer_id} not found")))?;
        if offer.booking_id != booking_id {
            return Err(AppError::BadRequest(format!(
                "offer {offer_id} does not belong to booking {booking_id}"
            )));
        }
        if offer.status != OfferStatus::Pending {
            return Err(AppError::Conflict(format!("offer {offer_id} is not pending")));
        }
        (offer.driver_id, offer.amount)
    };

    {
        let booking = state
            .bookings
            .get(&booking_id)
            .ok_or_else(|| AppError::NotFound(format!("booking {booking_id} not found")))?;
        if !booking.bidding_open() {
            return Err(AppError::Conflict(format!(
                "bidding on booking {booking_id} is already settled"
            )));
        }
    }

    claim_bidding_driver(state, driver_id)?;

    let sibling_ids: Vec<Uuid> = state
        .offers
        .iter()
        .filter(|entry| entry.booking_id == booking_id && entry.id != offer_id)
        .map(|entry| entry.id)
        .collect();

    let mut rejected = 0;
    for sibling_id in sibling_ids {
        if let Some(mut sibling) = state.offers.get_mut(&sibling_id) {
            sibling.status = OfferStatus::Rejected;
            rejected += 1;
        }
    }

    let accepted = match state.offers.get_mut(&offer_id) {
        Some(mut offer) => {
            offer.status = OfferStatus::Accepted;
            offer.clone()
        }
        None => {
            return Err(AppError::Internal(format!(
                "offer {offer_id} vanished during acceptance"
            )))
        }
    };

    if let Some(mut booking) = state.bookings.get_mut(&booking_id) {
        booking.status = BookingStatus::Confirmed;
        booking.driver_id = Some(driver_id);
        booking.quoted_price = Some(amount);
        booking.bidding = None;
    }

    state
        .metrics
        .offers_total
        .with_label_values(&["accepted"])
        .inc();
    state
        .metrics
        .offers_total
        .with_label_values(&["rejected"])
        .inc_by(rejected);
    state.publish(BookingEvent::OfferAccepted {
        booking_id,
        offer_id,
        driver_id,
        amount,
    });

    info!(
        booking_id = %booking_id,
        offer_id = %offer_id,
        driver_id = %driver_id,
        amount,
        "offer accepted"
    );

    Ok(accepted)
}

/// Auto-resolve every bidding booking past its deadline: cheapest offer
/// from a driver rated at or above the floor wins; with no qualifying
/// offer the booking expires and all offers are rejected.
pub async fn resolve_expired(state: &AppState, now: DateTime<Utc>) {
    let due: Vec<Uuid> = state
        .bookings
        .iter()
        .filter(|entry| {
            let booking = entry.value();
            booking.bidding_open()
                && booking
                    .bidding
                    .as_ref()
                    .map(|terms| terms.closes_at <= now)
                    .unwrap_or(false)
        })
        .map(|entry| *entry.key())
        .collect();

    for booking_id in due {
        resolve_booking(state, booking_id).await;
    }
}

async fn resolve_booking(state: &AppState, booking_id: Uuid) {
    let mut qualified: Vec<(i64, DateTime<Utc>, Uuid)> = state
        .offers
        .iter()
        .filter(|entry| entry.booking_id == booking_id && entry.status == OfferStatus::Pending)
        .filter_map(|entry| {
            let rating = state.drivers.get(&entry.driver_id)?.rating;
            if rating >= RATING_FLOOR {
                Some((entry.amount, entry.created_at, entry.id))
            } else {
                None
            }
        })
        .collect();
    qualified.sort_by(|a, b| a.0.cmp(&b.0).then_with(|| a.1.cmp(&b.1)));

    for (_, _, offer_id) in &qualified {
        match accept_offer(state, booking_id, *offer_id).await {
            Ok(offer) => {
                info!(
                    booking_id = %booking_id,
                    offer_id = %offer.id,
                    amount = offer.amount,
                    "bidding auto-resolved"
                );
                return;
            }
            Err(err) => {
                warn!(
                    booking_id = %booking_id,
                    offer_id = %offer_id,
                    error = %err,
                    "auto-resolution candidate unusable"
                );
            }
        }
    }

    expire_booking(state, booking_id);
}

fn expire_booking(state: &AppState, booking_id: Uuid) {
    let rejected_ids: Vec<Uuid> = state
        .offers
        .iter()
        .filter(|entry| entry.booking_id == booking_id && entry.status == OfferStatus::Pending)
        .map(|entry| entry.id)
        .collect();

    let mut rejected = 0;
    for offer_id in rejected_ids {
        if let Some(mut offer) = state.offers.get_mut(&offer_id) {
            offer.status = OfferStatus::Rejected;
            rejected += 1;
        }
    }

    if let Some(mut booking) = state.bookings.get_mut(&booking_id) {
        booking.status = BookingStatus::Expired;
    }

    state
        .metrics
        .offers_total
        .with_label_values(&["rejected"])
        .inc_by(rejected);
    state.publish(BookingEvent::BiddingExpired { booking_id });

    info!(booking_id = %booking_id, "bidding expired with no winner");
}

/// Periodic deadline sweep for bidding bookings.
pub async fn run_bidding_sweeper(state: Arc<AppState>, sweep_interval_ms: u64) {
    info!("bidding sweeper started");

    let mut ticker = interval(Duration::from_millis(sweep_interval_ms));
    loop {
        ticker.tick().await;
        resolve_expired(&state, Utc::now()).await;
    }
}

fn check_driver_eligibility(
    state: &AppState,
    driver_id: Uuid,
    now: DateTime<Utc>,
) -> Result<(), AppError> {
    let driver = state
        .drivers
        .get(&driver_id)
        .ok_or_else(|| AppError::NotFound(format!("driver {driver_id} not found")))?;

    let subscription = &driver.subscription;
    if subscription.status != SubscriptionStatus::Active {
        return Err(AppError::IneligibleDriver("subscription is not active".into()));
    }
    if subscription.rides_remaining == 0 {
        return Err(AppError::IneligibleDriver("no rides remaining".into()));
    }
    if subscription.expires_at <= now {
        return Err(AppError::IneligibleDriver("subscription has expired".into()));
    }

    Ok(())
}

/// Same conditional claim as dispatch, plus one subscription ride
/// consumed by the winning driver.
fn claim_bidding_driver(state: &AppState, driver_id: Uuid) -> Result<(), AppError> {
    let mut driver = state
        .drivers
        .get_mut(&driver_id)
        .ok_or_else(|| AppError::NotFound(format!("driver {driver_id} not found")))?;

    if driver.status != DriverStatus::Available {
        return Err(AppError::AssignmentWriteFailed(format!(
            "driver {driver_id} is no longer available"
        )));
    }

    driver.status = DriverStatus::Busy;
    driver.subscription.rides_remaining = driver.subscription.rides_remaining.saturating_sub(1);
    driver.updated_at = Utc::now();
    drop(driver);

    crate::engine::directory::refresh_driver_gauge(state);
    Ok(())
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, Utc};
    use uuid::Uuid;

    use super::{accept_offer, resolve_expired, submit_offer, SubmitOffer};
    use crate::error::AppError;
    use crate::models::booking::{BiddingTerms, Booking, BookingStatus};
    use crate::models::driver::{
        Driver, DriverPreferences, DriverStatus, GeoPoint, ServiceKind, Subscription,
        SubscriptionStatus, VehicleAssociation, VehicleClass,
    };
    use crate::models::offer::OfferStatus;
    use crate::state::AppState;

    const GOMBE: GeoPoint = GeoPoint {
        lat: -4.3217,
        lng: 15.3069,
    };

    fn test_state() -> AppState {
        let (state, _rx) = AppState::new(16, 16);
        state
    }

    fn seed_driver(state: &AppState, id_seed: u128, rating: f64) -> Uuid {
        let driver = Driver {
            id: Uuid::from_u128(id_seed),
            name: format!("driver-{id_seed}"),
            location: GOMBE,
            status: DriverStatus::Available,
            rating,
            total_rides: 25,
            last_seen_at: Utc::now(),
            vehicles: vec![VehicleAssociation {
                vehicle_class: VehicleClass::Eco,
                approved: true,
            }],
            preferences: DriverPreferences::default(),
            subscription: Subscription {
                status: SubscriptionStatus::Active,
                rides_remaining: 5,
                expires_at: Utc::now() + Duration::days(30),
            },
            updated_at: Utc::now(),
        };
        let id = driver.id;
        state.drivers.insert(id, driver);
        id
    }

    fn seed_bidding_booking(state: &AppState, proposed_price: i64, window_secs: i64) -> Uuid {
        let booking = Booking {
            id: Uuid::new_v4(),
            rider_id: Uuid::new_v4(),
            pickup: GOMBE,
            dropoff: None,
            service: ServiceKind::Transport,
            vehicle_class: VehicleClass::Eco,
            status: BookingStatus::Pending,
            driver_id: None,
            quoted_price: None,
            zone_id: None,
            bidding: Some(BiddingTerms {
                proposed_price,
                closes_at: Utc::now() + Duration::seconds(window_secs),
            }),
            created_at: Utc::now(),
        };
        let id = booking.id;
        state.bookings.insert(id, booking);
        id
    }

    fn offer(driver_id: Uuid, amount: i64) -> SubmitOffer {
        SubmitOffer {
            driver_id,
            amount,
            is_counter_offer: true,
        }
    }

    #[tokio::test]
    async fn duplicate_offer_is_rejected_regardless_of_price() {
        let state = test_state();
        let driver = seed_driver(&state, 1, 4.5);
        let booking = seed_bidding_booking(&state, 15000, 300);

        submit_offer(&state, booking, offer(driver, 16000))
            .await
            .unwrap();
        let err = submit_offer(&state, booking, offer(driver, 14000))
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::DuplicateOffer));
    }

    #[tokio::test]
    async fn driver_without_remaining_rides_cannot_bid() {
        let state = test_state();
        let driver = seed_driver(&state, 1, 4.5);
        state
            .drivers
            .get_mut(&driver)
            .unwrap()
            .subscription
            .rides_remaining = 0;
        let booking = seed_bidding_booking(&state, 15000, 300);

        let err = submit_offer(&state, booking, offer(driver, 14000))
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::IneligibleDriver(_)));
    }

    #[tokio::test]
    async fn driver_with_expired_subscription_cannot_bid() {
        let state = test_state();
        let driver = seed_driver(&state, 1, 4.5);
        state
            .drivers
            .get_mut(&driver)
            .unwrap()
            .subscription
            .expires_at = Utc::now() - Duration::days(1);
        let booking = seed_bidding_booking(&state, 15000, 300);

        let err = submit_offer(&state, booking, offer(driver, 14000))
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::IneligibleDriver(_)));
    }

    #[tokio::test]
    async fn counter_offer_above_twice_the_proposed_price_is_rejected() {
        let state = test_state();
        let driver = seed_driver(&state, 1, 4.5);
        let booking = seed_bidding_booking(&state, 10000, 300);

        let err = submit_offer(&state, booking, offer(driver, 20001))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::CounterOfferTooHigh));

        // Exactly twice is still allowed.
        let other = seed_driver(&state, 2, 4.5);
        submit_offer(&state, booking, offer(other, 20000))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn accepting_one_offer_rejects_every_sibling() {
        let state = test_state();
        let booking = seed_bidding_booking(&state, 15000, 300);
        let drivers: Vec<Uuid> = (1..=3).map(|i| seed_driver(&state, i, 4.5)).collect();

        let mut offers = Vec::new();
        for (i, driver) in drivers.iter().enumerate() {
            let submitted = submit_offer(&state, booking, offer(*driver, 14000 + i as i64 * 500))
                .await
                .unwrap();
            offers.push(submitted);
        }

        let winner = accept_offer(&state, booking, offers[1].id).await.unwrap();
        assert_eq!(winner.status, OfferStatus::Accepted);

        let accepted = state
            .offers
            .iter()
            .filter(|o| o.booking_id == booking && o.status == OfferStatus::Accepted)
            .count();
        let rejected = state
            .offers
            .iter()
            .filter(|o| o.booking_id == booking && o.status == OfferStatus::Rejected)
            .count();
        assert_eq!(accepted, 1);
        assert_eq!(rejected, 2);

        let settled = state.bookings.get(&booking).unwrap();
        assert_eq!(settled.status, BookingStatus::Confirmed);
        assert_eq!(settled.driver_id, Some(drivers[1]));
        assert_eq!(settled.quoted_price, Some(winner.amount));
        assert!(settled.bidding.is_none());

        let winning_driver = state.drivers.get(&drivers[1]).unwrap();
        assert_eq!(winning_driver.status, DriverStatus::Busy);
        assert_eq!(winning_driver.subscription.rides_remaining, 4);
    }

    #[tokio::test]
    async fn second_acceptance_is_rejected() {
        let state = test_state();
        let booking = seed_bidding_booking(&state, 15000, 300);
        let first = seed_driver(&state, 1, 4.5);
        let second = seed_driver(&state, 2, 4.5);

        let offer_a = submit_offer(&state, booking, offer(first, 14000)).await.unwrap();
        let offer_b = submit_offer(&state, booking, offer(second, 14500)).await.unwrap();

        accept_offer(&state, booking, offer_a.id).await.unwrap();
        let err = accept_offer(&state, booking, offer_b.id).await.unwrap_err();

        assert!(matches!(err, AppError::Conflict(_)));
    }

    #[tokio::test]
    async fn timeout_selects_cheapest_offer_above_the_rating_floor() {
        let state = test_state();
        let booking = seed_bidding_booking(&state, 15000, 300);

        let rated_45 = seed_driver(&state, 1, 4.5);
        let rated_48 = seed_driver(&state, 2, 4.8);
        let rated_42 = seed_driver(&state, 3, 4.2);

        submit_offer(&state, booking, offer(rated_45, 18000)).await.unwrap();
        let expected = submit_offer(&state, booking, offer(rated_48, 16000))
            .await
            .unwrap();
        submit_offer(&state, booking, offer(rated_42, 17000)).await.unwrap();

        // Push the deadline into the past, then sweep.
        state
            .bookings
            .get_mut(&booking)
            .unwrap()
            .bidding
            .as_mut()
            .unwrap()
            .closes_at = Utc::now() - Duration::seconds(1);
        resolve_expired(&state, Utc::now()).await;

        let settled = state.bookings.get(&booking).unwrap();
        assert_eq!(settled.status, BookingStatus::Confirmed);
        assert_eq!(settled.driver_id, Some(rated_48));
        assert_eq!(settled.quoted_price, Some(16000));

        let winner = state.offers.get(&expected.id).unwrap();
        assert_eq!(winner.status, OfferStatus::Accepted);
    }

    #[tokio::test]
    async fn low_rated_offer_is_ignored_at_timeout() {
        let state = test_state();
        let booking = seed_bidding_booking(&state, 15000, 300);

        let low_rated = seed_driver(&state, 1, 3.5);
        let high_rated = seed_driver(&state, 2, 4.1);

        // Cheapest offer comes from the low-rated driver.
        submit_offer(&state, booking, offer(low_rated, 12000)).await.unwrap();
        submit_offer(&state, booking, offer(high_rated, 14000)).await.unwrap();

        state
            .bookings
            .get_mut(&booking)
            .unwrap()
            .bidding
            .as_mut()
            .unwrap()
            .closes_at = Utc::now() - Duration::seconds(1);
        resolve_expired(&state, Utc::now()).await;

        let settled = state.bookings.get(&booking).unwrap();
        assert_eq!(settled.driver_id, Some(high_rated));
    }

    #[tokio::test]
    async fn timeout_without_qualified_offers_expires_the_booking() {
        let state = test_state();
        let booking = seed_bidding_booking(&state, 15000, 300);

        let low_rated = seed_driver(&state, 1, 3.0);
        let submitted = submit_offer(&state, booking, offer(low_rated, 12000))
            .await
            .unwrap();

        state
            .bookings
            .get_mut(&booking)
            .unwrap()
            .bidding
            .as_mut()
            .unwrap()
            .closes_at = Utc::now() - Duration::seconds(1);
        resolve_expired(&state, Utc::now()).await;

        let settled = state.bookings.get(&booking).unwrap();
        assert_eq!(settled.status, BookingStatus::Expired);
        assert!(settled.driver_id.is_none());

        let rejected = state.offers.get(&submitted.id).unwrap();
        assert_eq!(rejected.status, OfferStatus::Rejected);
    }

    #[tokio::test]
    async fn offers_after_the_deadline_are_rejected() {
        let state = test_state();
        let driver = seed_driver(&state, 1, 4.5);
        let booking = seed_bidding_booking(&state, 15000, 300);
        state
            .bookings
            .get_mut(&booking)
            .unwrap()
            .bidding
            .as_mut()
            .unwrap()
            .closes_at = Utc::now() - Duration::seconds(1);

        let err = submit_offer(&state, booking, offer(driver, 14000))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Conflict(_)));
    }
}
