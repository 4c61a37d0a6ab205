use dashmap::DashMap;
use tokio::sync::{broadcast, mpsc};
use uuid::Uuid;

use crate::models::assignment::Assignment;
use crate::models::booking::Booking;
use crate::models::driver::Driver;
use crate::models::event::BookingEvent;
use crate::models::offer::Offer;
use crate::models::zone::Zone;
use crate::observability::metrics::Metrics;

pub struct AppState {
    pub drivers: DashMap<Uuid, Driver>,
    pub bookings: DashMap<Uuid, Booking>,
    pub offers: DashMap<Uuid, Offer>,
    pub zones: DashMap<Uuid, Zone>,
    pub assignments: DashMap<Uuid, Assignment>,
    pub dispatch_tx: mpsc::Sender<Uuid>,
    pub booking_events_tx: broadcast::Sender<BookingEvent>,
    pub metrics: Metrics,
}

impl AppState {
    pub fn new(
        dispatch_queue_size: usize,
        event_buffer_size: usize,
    ) -> (Self, mpsc::Receiver<Uuid>) {
        let (dispatch_tx, dispatch_rx) = mpsc::channel(dispatch_queue_size);
        let (booking_events_tx, _unused_rx) = broadcast::channel(event_buffer_size);

        (
            Self {
                drivers: DashMap::new(),
                bookings: DashMap::new(),
                offers: DashMap::new(),
                zones: DashMap::new(),
                assignments: DashMap::new(),
                dispatch_tx,
                booking_events_tx,
                metrics: Metrics::new(),
            },
            dispatch_rx,
        )
    }

    /// Best-effort event publish. A send error only means nobody is
    /// listening right now.
    pub fn publish(&self, event: BookingEvent) {
        if self.booking_events_tx.send(event).is_err() {
            tracing::debug!("booking event dropped: no subscribers");
        }
    }
}
