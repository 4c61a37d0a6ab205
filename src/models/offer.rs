use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub enum OfferStatus {
    Pending,
    Accepted,
    Rejected,
}

/// A driver's price proposal on a bidding booking. Amounts are whole
/// Congolese francs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Offer {
    pub id: Uuid,
    pub booking_id: Uuid,
    pub driver_id: Uuid,
    pub amount: i64,
    pub is_counter_offer: bool,
    pub status: OfferStatus,
    pub created_at: DateTime<Utc>,
}
