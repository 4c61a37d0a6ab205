use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Realtime booking notifications, published on the broadcast bus and
/// delivered over WebSocket and gRPC streams. Delivery is at-most-once:
/// lagging subscribers drop events and re-fetch the booking.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum BookingEvent {
    DriverAssigned {
        booking_id: Uuid,
        driver_id: Uuid,
        price: i64,
        eta_minutes: u32,
    },
    DispatchFailed {
        booking_id: Uuid,
        reason: String,
    },
    OfferSubmitted {
        booking_id: Uuid,
        offer_id: Uuid,
        driver_id: Uuid,
        amount: i64,
    },
    OfferAccepted {
        booking_id: Uuid,
        offer_id: Uuid,
        driver_id: Uuid,
        amount: i64,
    },
    BiddingExpired {
        booking_id: Uuid,
    },
    BookingCancelled {
        booking_id: Uuid,
    },
}

impl BookingEvent {
    pub fn booking_id(&self) -> Uuid {
        match self {
            BookingEvent::DriverAssigned { booking_id, .. }
            | BookingEvent::DispatchFailed { booking_id, .. }
            | BookingEvent::OfferSubmitted { booking_id, .. }
            | BookingEvent::OfferAccepted { booking_id, .. }
            | BookingEvent::BiddingExpired { booking_id }
            | BookingEvent::BookingCancelled { booking_id } => *booking_id,
        }
    }
}
