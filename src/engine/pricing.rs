use crate::models::zone::Tariff;

/// `(base + km * rate) * surge`, rounded to whole francs.
pub fn quote_price(tariff: &Tariff, total_distance_km: f64) -> i64 {
    let raw = (tariff.base_fare as f64 + total_distance_km * tariff.per_km_rate as f64)
        * tariff.surge_multiplier;
    raw.round() as i64
}

/// Pickup ETA heuristic: two minutes per kilometre, rounded up.
pub fn estimated_arrival_minutes(distance_km: f64) -> u32 {
    (distance_km * 2.0).ceil() as u32
}

#[cfg(test)]
mod tests {
    use super::{estimated_arrival_minutes, quote_price};
    use crate::models::zone::Tariff;

    #[test]
    fn quote_applies_surge_to_base_and_distance() {
        let tariff = Tariff {
            base_fare: 2000,
            per_km_rate: 500,
            surge_multiplier: 1.5,
        };

        assert_eq!(quote_price(&tariff, 10.0), 10500);
    }

    #[test]
    fn quote_without_surge_is_base_plus_distance() {
        let tariff = Tariff {
            base_fare: 1500,
            per_km_rate: 400,
            surge_multiplier: 1.0,
        };

        assert_eq!(quote_price(&tariff, 2.5), 2500);
    }

    #[test]
    fn eta_rounds_up() {
        assert_eq!(estimated_arrival_minutes(2.5), 5);
        assert_eq!(estimated_arrival_minutes(2.6), 6);
        assert_eq!(estimated_arrival_minutes(0.0), 0);
    }
}
