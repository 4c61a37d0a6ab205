use std::pin::Pin;
use std::sync::Arc;

use chrono::{Duration, Utc};
use tokio_stream::wrappers::BroadcastStream;
use tokio_stream::Stream;
use tokio_stream::StreamExt;
use tonic::{Request, Response, Status};
use uuid::Uuid;

use crate::engine::directory::refresh_driver_gauge;
use crate::engine::queue::enqueue_dispatch;
use crate::models::booking::{Booking, BookingStatus};
use crate::models::driver::{
    Driver, DriverPreferences, DriverStatus, ServiceKind, Subscription, SubscriptionStatus,
    VehicleAssociation, VehicleClass,
};
use crate::models::event;
use crate::state::AppState;

pub mod pb {
    tonic::include_proto!("dispatch");
}

use pb::dispatch_service_server::DispatchService;
use pb::{
    BookingEvent, BookingResponse, CreateBookingRequest, CreateDriverRequest, DriverResponse,
    GeoPoint, GetBookingRequest, GetDriversRequest, GetDriversResponse, WatchBookingEventsRequest,
};

pub struct GrpcDispatchService {
    state: Arc<AppState>,
}

impl GrpcDispatchService {
    pub fn new(state: Arc<AppState>) -> Self {
        Self { state }
    }
}

fn driver_to_proto(d: &Driver) -> DriverResponse {
    DriverResponse {
        id: d.id.to_string(),
        name: d.name.clone(),
        location: Some(GeoPoint {
            lat: d.location.lat,
            lng: d.location.lng,
        }),
        status: format!("{:?}", d.status),
        rating: d.rating,
        total_rides: d.total_rides,
    }
}

fn booking_to_proto(b: &Booking) -> BookingResponse {
    BookingResponse {
        id: b.id.to_string(),
        status: format!("{:?}", b.status),
        driver_id: b.driver_id.map(|id| id.to_string()).unwrap_or_default(),
        quoted_price: b.quoted_price.unwrap_or_default(),
        zone_id: b.zone_id.map(|id| id.to_string()).unwrap_or_default(),
    }
}

fn event_to_proto(e: &event::BookingEvent) -> BookingEvent {
    let (kind, driver_id, offer_id, price) = match e {
        event::BookingEvent::DriverAssigned {
            driver_id, price, ..
        } => ("driver_assigned", Some(*driver_id), None, *price),
        event::BookingEvent::DispatchFailed { .. } => ("dispatch_failed", None, None, 0),
        event::BookingEvent::OfferSubmitted {
            offer_id,
            driver_id,
            amount,
            ..
        } => ("offer_submitted", Some(*driver_id), Some(*offer_id), *amount),
        event::BookingEvent::OfferAccepted {
            offer_id,
            driver_id,
            amount,
            ..
        } => ("offer_accepted", Some(*driver_id), Some(*offer_id), *amount),
        event::BookingEvent::BiddingExpired { .. } => ("bidding_expired", None, None, 0),
        event::BookingEvent::BookingCancelled { .. } => ("booking_cancelled", None, None, 0),
    };

    BookingEvent {
        booking_id: e.booking_id().to_string(),
        kind: kind.to_string(),
        driver_id: driver_id.map(|id| id.to_string()).unwrap_or_default(),
        offer_id: offer_id.map(|id| id.to_string()).unwrap_or_default(),
        price,
    }
}

fn parse_vehicle_class(s: &str) -> Result<VehicleClass, Status> {
    match s {
        "Moto" => Ok(VehicleClass::Moto),
        "Eco" => Ok(VehicleClass::Eco),
        "Standard" => Ok(VehicleClass::Standard),
        "Premium" => Ok(VehicleClass::Premium),
        other => Err(Status::invalid_argument(format!(
            "unknown vehicle class: {other}, expected Moto/Eco/Standard/Premium"
        ))),
    }
}

fn parse_service(s: &str) -> Result<ServiceKind, Status> {
    match s {
        "Transport" => Ok(ServiceKind::Transport),
        "Delivery" => Ok(ServiceKind::Delivery),
        "Food" => Ok(ServiceKind::Food),
        other => Err(Status::invalid_argument(format!(
            "unknown service: {other}, expected Transport/Delivery/Food"
        ))),
    }
}

fn parse_uuid(s: &str, field: &str) -> Result<Uuid, Status> {
    s.parse::<Uuid>()
        .map_err(|_| Status::invalid_argument(format!("{field} is not a valid uuid")))
}

#[tonic::async_trait]
impl DispatchService for GrpcDispatchService {
    async fn create_driver(
        &self,
        request: Request<CreateDriverRequest>,
    ) -> Result<Response<DriverResponse>, Status> {
        let req = request.into_inner();

        if req.name.trim().is_empty() {
            return Err(Status::invalid_argument("name cannot be empty"));
        }
        if req.vehicle_classes.is_empty() {
            return Err(Status::invalid_argument(
                "driver needs at least one vehicle class",
            ));
        }

        let location = req
            .location
            .ok_or_else(|| Status::invalid_argument("location is required"))?;

        let vehicles = req
            .vehicle_classes
            .iter()
            .map(|raw| {
                parse_vehicle_class(raw).map(|vehicle_class| VehicleAssociation {
                    vehicle_class,
                    approved: true,
                })
            })
            .collect::<Result<Vec<_>, Status>>()?;

        let now = Utc::now();
        let driver = Driver {
            id: Uuid::new_v4(),
            name: req.name,
            location: crate::models::driver::GeoPoint {
                lat: location.lat,
                lng: location.lng,
            },
            status: DriverStatus::Available,
            rating: req.rating.clamp(0.0, 5.0),
            total_rides: 0,
            last_seen_at: now,
            vehicles,
            preferences: DriverPreferences::default(),
            subscription: Subscription {
                status: SubscriptionStatus::Active,
                rides_remaining: 20,
                expires_at: now + Duration::days(30),
            },
            updated_at: now,
        };

        self.state.drivers.insert(driver.id, driver.clone());
        refresh_driver_gauge(&self.state);
        Ok(Response::new(driver_to_proto(&driver)))
    }

    async fn get_drivers(
        &self,
        _request: Request<GetDriversRequest>,
    ) -> Result<Response<GetDriversResponse>, Status> {
        let drivers: Vec<DriverResponse> = self
            .state
            .drivers
            .iter()
            .map(|entry| driver_to_proto(entry.value()))
            .collect();

        Ok(Response::new(GetDriversResponse { drivers }))
    }

    async fn create_booking(
        &self,
        request: Request<CreateBookingRequest>,
    ) -> Result<Response<BookingResponse>, Status> {
        let req = request.into_inner();

        let rider_id = parse_uuid(&req.rider_id, "rider_id")?;
        let pickup = req
            .pickup
            .ok_or_else(|| Status::invalid_argument("pickup is required"))?;

        let service = parse_service(&req.service)?;
        let vehicle_class = parse_vehicle_class(&req.vehicle_class)?;

        let booking = Booking {
            id: Uuid::new_v4(),
            rider_id,
            pickup: crate::models::driver::GeoPoint {
                lat: pickup.lat,
                lng: pickup.lng,
            },
            dropoff: req.dropoff.map(|d| crate::models::driver::GeoPoint {
                lat: d.lat,
                lng: d.lng,
            }),
            service,
            vehicle_class,
            status: BookingStatus::Pending,
            driver_id: None,
            quoted_price: None,
            zone_id: None,
            bidding: None,
            created_at: Utc::now(),
        };

        self.state.bookings.insert(booking.id, booking.clone());
        enqueue_dispatch(&self.state, booking.id)
            .await
            .map_err(|err| Status::internal(format!("enqueue failed: {err}")))?;

        Ok(Response::new(booking_to_proto(&booking)))
    }

    async fn get_booking(
        &self,
        request: Request<GetBookingRequest>,
    ) -> Result<Response<BookingResponse>, Status> {
        let req = request.into_inner();
        let id = parse_uuid(&req.id, "id")?;

        let booking = self
            .state
            .bookings
            .get(&id)
            .ok_or_else(|| Status::not_found(format!("booking {id} not found")))?;

        Ok(Response::new(booking_to_proto(booking.value())))
    }

    type WatchBookingEventsStream =
        Pin<Box<dyn Stream<Item = Result<BookingEvent, Status>> + Send>>;

    async fn watch_booking_events(
        &self,
        request: Request<WatchBookingEventsRequest>,
    ) -> Result<Response<Self::WatchBookingEventsStream>, Status> {
        let req = request.into_inner();
        let filter = if req.booking_id.is_empty() {
            None
        } else {
            Some(parse_uuid(&req.booking_id, "booking_id")?)
        };

        let rx = self.state.booking_events_tx.subscribe();
        let stream = BroadcastStream::new(rx).filter_map(move |result| match result {
            Ok(event) => match filter {
                Some(id) if event.booking_id() != id => None,
                _ => Some(Ok(event_to_proto(&event))),
            },
            Err(_) => None,
        });

        Ok(Response::new(Box::pin(stream)))
    }
}
