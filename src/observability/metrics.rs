use prometheus::{Encoder, HistogramVec, IntCounterVec, IntGauge, Opts, Registry, TextEncoder};

#[derive(Clone)]
pub struct Metrics {
    registry: Registry,
    pub assignments_total: IntCounterVec,
    pub dispatch_attempts_total: IntCounterVec,
    pub bookings_in_queue: IntGauge,
    pub dispatch_latency_seconds: HistogramVec,
    pub offers_total: IntCounterVec,
    pub drivers_available: IntGauge,
}

impl Metrics {
    pub fn new() -> Self {
        let registry = Registry::new();

        let assignments_total = IntCounterVec::new(
            Opts::new("assignments_total", "Completed dispatches by outcome"),
            &["outcome"],
        )
        .expect("valid assignments_total metric");

        let dispatch_attempts_total = IntCounterVec::new(
            Opts::new(
                "dispatch_attempts_total",
                "Individual dispatch attempts by outcome",
            ),
            &["outcome"],
        )
        .expect("valid dispatch_attempts_total metric");

        let bookings_in_queue = IntGauge::new(
            "bookings_in_queue",
            "Current number of bookings awaiting dispatch",
        )
        .expect("valid bookings_in_queue metric");

        let dispatch_latency_seconds = HistogramVec::new(
            prometheus::HistogramOpts::new(
                "dispatch_latency_seconds",
                "Latency from dequeue to assignment or final failure in seconds",
            ),
            &["outcome"],
        )
        .expect("valid dispatch_latency_seconds metric");

        let offers_total = IntCounterVec::new(
            Opts::new("offers_total", "Bidding offers by outcome"),
            &["outcome"],
        )
        .expect("valid offers_total metric");

        let drivers_available = IntGauge::new(
            "drivers_available",
            "Drivers currently available for dispatch",
        )
        .expect("valid drivers_available metric");

        registry
            .register(Box::new(assignments_total.clone()))
            .expect("register assignments_total");
        registry
            .register(Box::new(dispatch_attempts_total.clone()))
            .expect("register dispatch_attempts_total");
        registry
            .register(Box::new(bookings_in_queue.clone()))
            .expect("register bookings_in_queue");
        registry
            .register(Box::new(dispatch_latency_seconds.clone()))
            .expect("register dispatch_latency_seconds");
        registry
            .register(Box::new(offers_total.clone()))
            .expect("register offers_total");
        registry
            .register(Box::new(drivers_available.clone()))
            .expect("register drivers_available");

        Self {
            registry,
            assignments_total,
            dispatch_attempts_total,
            bookings_in_queue,
            dispatch_latency_seconds,
            offers_total,
            drivers_available,
        }
    }

    pub fn encode(&self) -> Result<String, String> {
        let metric_families = self.registry.gather();
        let mut buffer = Vec::new();

        TextEncoder::new()
            .encode(&metric_families, &mut buffer)
            .map_err(|err| format!("failed to encode metrics: {err}"))?;

        String::from_utf8(buffer).map_err(|err| format!("metrics are not valid utf8: {err}"))
    }
}
