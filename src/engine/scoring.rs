use chrono::{DateTime, Utc};

use crate::engine::directory::DriverCandidate;
use crate::models::assignment::ScoreBreakdown;

const PROXIMITY_WEIGHT: f64 = 0.40;
const RATING_WEIGHT: f64 = 0.30;
const EXPERIENCE_WEIGHT: f64 = 0.20;
const ACTIVITY_WEIGHT: f64 = 0.10;

/// Composite driver score on a 0..~100 scale. Pure; `now` is passed in
/// so the activity component is reproducible.
pub fn compute_score(candidate: &DriverCandidate, now: DateTime<Utc>) -> (f64, ScoreBreakdown) {
    let breakdown = ScoreBreakdown {
        proximity_score: proximity_score(candidate.distance_km),
        rating_score: rating_score(candidate.rating),
        experience_score: experience_score(candidate.total_rides),
        activity_score: activity_score(candidate.last_seen_at, now),
    };

    let score = weighted_score(&breakdown);
    (score, breakdown)
}

pub fn weighted_score(breakdown: &ScoreBreakdown) -> f64 {
    (breakdown.proximity_score * PROXIMITY_WEIGHT)
        + (breakdown.rating_score * RATING_WEIGHT)
        + (breakdown.experience_score * EXPERIENCE_WEIGHT)
        + (breakdown.activity_score * ACTIVITY_WEIGHT)
}

/// Highest-scoring candidate; equal scores go to the smaller driver id
/// so selection is deterministic regardless of iteration order.
pub fn select_best(
    candidates: &[DriverCandidate],
    now: DateTime<Utc>,
) -> Option<(DriverCandidate, f64, ScoreBreakdown)> {
    candidates
        .iter()
        .map(|candidate| {
            let (score, breakdown) = compute_score(candidate, now);
            (candidate.clone(), score, breakdown)
        })
        .max_by(|a, b| a.1.total_cmp(&b.1).then_with(|| b.0.id.cmp(&a.0.id)))
}

/// Zero beyond 10 km.
fn proximity_score(distance_km: f64) -> f64 {
    (100.0 - distance_km * 10.0).max(0.0)
}

fn rating_score(rating: f64) -> f64 {
    (rating / 5.0) * 100.0
}

/// Saturates at 50 rides.
fn experience_score(total_rides: u32) -> f64 {
    (total_rides as f64 * 2.0).min(100.0)
}

/// Decays to zero after 100 minutes without a location ping.
fn activity_score(last_seen_at: DateTime<Utc>, now: DateTime<Utc>) -> f64 {
    let minutes = (now - last_seen_at).num_milliseconds() as f64 / 60_000.0;
    (100.0 - minutes).max(0.0)
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, Utc};
    use uuid::Uuid;

    use super::{compute_score, select_best};
    use crate::engine::directory::DriverCandidate;
    use crate::models::driver::GeoPoint;

    fn candidate(id_seed: u128, distance_km: f64, rating: f64, total_rides: u32) -> DriverCandidate {
        DriverCandidate {
            id: Uuid::from_u128(id_seed),
            location: GeoPoint {
                lat: -4.3217,
                lng: 15.3069,
            },
            distance_km,
            rating,
            total_rides,
            last_seen_at: Utc::now(),
        }
    }

    #[test]
    fn closer_candidate_scores_higher_when_other_factors_match() {
        let now = Utc::now();
        let near = candidate(1, 1.0, 4.5, 20);
        let far = candidate(2, 6.0, 4.5, 20);

        let (near_score, _) = compute_score(&near, now);
        let (far_score, _) = compute_score(&far, now);

        assert!(near_score > far_score);
    }

    #[test]
    fn known_fixture_scores() {
        // Eco request at Gombe: A is farther but experienced and better
        // rated, B is close but green. A should win 84 to 66.
        let now = Utc::now();
        let a = candidate(1, 2.5, 4.0, 50);
        let b = candidate(2, 1.0, 3.0, 5);

        let (score_a, breakdown_a) = compute_score(&a, now);
        let (score_b, _) = compute_score(&b, now);

        assert!((breakdown_a.proximity_score - 75.0).abs() < 1e-6);
        assert!((breakdown_a.rating_score - 80.0).abs() < 1e-6);
        assert!((breakdown_a.experience_score - 100.0).abs() < 1e-6);
        assert!((score_a - 84.0).abs() < 1e-3);
        assert!((score_b - 66.0).abs() < 1e-3);
        assert!(score_a > score_b);

        let (best, _, _) = select_best(&[a, b], now).unwrap();
        assert_eq!(best.id, Uuid::from_u128(1));
    }

    #[test]
    fn experience_saturates_at_fifty_rides() {
        let now = Utc::now();
        let fifty = candidate(1, 2.0, 4.0, 50);
        let five_hundred = candidate(2, 2.0, 4.0, 500);

        let (_, breakdown_fifty) = compute_score(&fifty, now);
        let (_, breakdown_many) = compute_score(&five_hundred, now);

        assert!((breakdown_fifty.experience_score - 100.0).abs() < 1e-6);
        assert!((breakdown_many.experience_score - 100.0).abs() < 1e-6);
    }

    #[test]
    fn activity_decays_to_zero_after_100_minutes() {
        let now = Utc::now();
        let mut stale = candidate(1, 2.0, 4.0, 20);
        stale.last_seen_at = now - Duration::minutes(180);

        let (_, breakdown) = compute_score(&stale, now);
        assert_eq!(breakdown.activity_score, 0.0);

        let mut recent = candidate(2, 2.0, 4.0, 20);
        recent.last_seen_at = now - Duration::minutes(30);
        let (_, breakdown) = compute_score(&recent, now);
        assert!((breakdown.activity_score - 70.0).abs() < 0.1);
    }

    #[test]
    fn equal_scores_break_ties_on_smaller_id() {
        let now = Utc::now();
        let first = candidate(7, 3.0, 4.0, 10);
        let second = candidate(3, 3.0, 4.0, 10);

        let (best, _, _) = select_best(&[first, second], now).unwrap();
        assert_eq!(best.id, Uuid::from_u128(3));
    }

    #[test]
    fn empty_pool_selects_nothing() {
        assert!(select_best(&[], Utc::now()).is_none());
    }
}
