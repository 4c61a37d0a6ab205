use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub proximity_score: f64,
    pub rating_score: f64,
    pub experience_score: f64,
    pub activity_score: f64,
}

/// Orchestrator output: the winning candidate plus the quote, before
/// any state is written.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssignmentProposal {
    pub driver_id: Uuid,
    pub distance_km: f64,
    pub estimated_arrival_minutes: u32,
    pub estimated_price: i64,
    pub zone_id: Uuid,
    pub surge_multiplier: f64,
    pub score: f64,
    pub score_breakdown: ScoreBreakdown,
}

/// Audit record written once a driver is assigned to a booking.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Assignment {
    pub id: Uuid,
    pub booking_id: Uuid,
    pub driver_id: Uuid,
    pub score: f64,
    pub score_breakdown: ScoreBreakdown,
    pub quoted_price: i64,
    pub assigned_at: DateTime<Utc>,
}
