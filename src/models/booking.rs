use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::driver::{GeoPoint, ServiceKind, VehicleClass};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub enum BookingStatus {
    Pending,
    Searching,
    OfferReceived,
    DriverAssigned,
    Confirmed,
    InProgress,
    Completed,
    Cancelled,
    Expired,
}

impl BookingStatus {
    pub fn is_terminal(self) -> bool {
        matches!(
            self,
            BookingStatus::Completed | BookingStatus::Cancelled | BookingStatus::Expired
        )
    }
}

/// Price negotiation terms. Present only while the booking is in
/// bidding mode; cleared once an offer wins.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BiddingTerms {
    pub proposed_price: i64,
    pub closes_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Booking {
    pub id: Uuid,
    pub rider_id: Uuid,
    pub pickup: GeoPoint,
    pub dropoff: Option<GeoPoint>,
    pub service: ServiceKind,
    pub vehicle_class: VehicleClass,
    pub status: BookingStatus,
    pub driver_id: Option<Uuid>,
    pub quoted_price: Option<i64>,
    pub zone_id: Option<Uuid>,
    pub bidding: Option<BiddingTerms>,
    pub created_at: DateTime<Utc>,
}

impl Booking {
    /// A bidding booking still open for offers or acceptance.
    pub fn bidding_open(&self) -> bool {
        self.bidding.is_some()
            && matches!(
                self.status,
                BookingStatus::Pending | BookingStatus::OfferReceived
            )
    }
}
