use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use kwenda_dispatch::api::rest::router;
use kwenda_dispatch::state::AppState;
use serde_json::{json, Value};
use tower::ServiceExt;
use uuid::Uuid;

fn json_request(method: &str, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_string(&body).unwrap()))
        .unwrap()
}

fn get_request(uri: &str) -> Request<Body> {
    Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

fn post_request(uri: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

async fn create_driver(app: &axum::Router, name: &str, rating: f64) -> String {
    let res = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/drivers",
            json!({
                "name": name,
                "location": { "lat": -4.3217, "lng": 15.3069 },
                "vehicles": [ { "vehicle_class": "Eco", "approved": true } ],
                "rating": rating
            }),
        ))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let driver = body_json(res).await;
    driver["id"].as_str().unwrap().to_string()
}

async fn create_bidding_booking(app: &axum::Router, proposed_price: i64) -> String {
    let res = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/bookings",
            json!({
                "rider_id": Uuid::new_v4(),
                "pickup": { "lat": -4.3217, "lng": 15.3069 },
                "dropoff": { "lat": -4.3857, "lng": 15.4446 },
                "service": "Transport",
                "vehicle_class": "Eco",
                "bidding": { "proposed_price": proposed_price, "window_secs": 300 }
            }),
        ))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let booking = body_json(res).await;
    assert_eq!(booking["status"], "Pending");
    assert!(booking["bidding"]["closes_at"].is_string());
    booking["id"].as_str().unwrap().to_string()
}

async fn submit_offer(
    app: &axum::Router,
    booking_id: &str,
    driver_id: &str,
    amount: i64,
) -> axum::response::Response {
    app.clone()
        .oneshot(json_request(
            "POST",
            &format!("/bookings/{booking_id}/offers"),
            json!({
                "driver_id": driver_id,
                "amount": amount,
                "is_counter_offer": true
            }),
        ))
        .await
        .unwrap()
}

#[tokio::test]
async fn bidding_booking_is_not_auto_dispatched() {
    let (state, mut rx) = AppState::new(16, 16);
    let app = router(Arc::new(state));

    create_bidding_booking(&app, 15000).await;

    assert!(rx.try_recv().is_err());
}

#[tokio::test]
async fn full_bidding_flow() {
    let (state, _rx) = AppState::new(1024, 1024);
    let shared = Arc::new(state);
    let app = router(shared.clone());

    let booking_id = create_bidding_booking(&app, 15000).await;
    let first = create_driver(&app, "Blaise", 4.5).await;
    let second = create_driver(&app, "Merveille", 4.8).await;
    let third = create_driver(&app, "Espoir", 4.2).await;

    let res = submit_offer(&app, &booking_id, &first, 18000).await;
    assert_eq!(res.status(), StatusCode::OK);
    let res = submit_offer(&app, &booking_id, &second, 16000).await;
    assert_eq!(res.status(), StatusCode::OK);
    let winning_offer = body_json(res).await;
    let winning_offer_id = winning_offer["id"].as_str().unwrap().to_string();
    let res = submit_offer(&app, &booking_id, &third, 17000).await;
    assert_eq!(res.status(), StatusCode::OK);

    // Offers moved the booking into the offer_received state.
    let res = app
        .clone()
        .oneshot(get_request(&format!("/bookings/{booking_id}")))
        .await
        .unwrap();
    let booking = body_json(res).await;
    assert_eq!(booking["status"], "OfferReceived");

    let res = app
        .clone()
        .oneshot(post_request(&format!(
            "/bookings/{booking_id}/offers/{winning_offer_id}/accept"
        )))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let accepted = body_json(res).await;
    assert_eq!(accepted["status"], "Accepted");

    let res = app
        .clone()
        .oneshot(get_request(&format!("/bookings/{booking_id}/offers")))
        .await
        .unwrap();
    let offers = body_json(res).await;
    let list = offers.as_array().unwrap();
    assert_eq!(list.len(), 3);
    let accepted_count = list.iter().filter(|o| o["status"] == "Accepted").count();
    let rejected_count = list.iter().filter(|o| o["status"] == "Rejected").count();
    assert_eq!(accepted_count, 1);
    assert_eq!(rejected_count, 2);

    let res = app
        .clone()
        .oneshot(get_request(&format!("/bookings/{booking_id}")))
        .await
        .unwrap();
    let booking = body_json(res).await;
    assert_eq!(booking["status"], "Confirmed");
    assert_eq!(booking["driver_id"], second);
    assert_eq!(booking["quoted_price"], 16000);
    assert!(booking["bidding"].is_null());

    let res = app.clone().oneshot(get_request("/drivers")).await.unwrap();
    let drivers = body_json(res).await;
    let winner = drivers
        .as_array()
        .unwrap()
        .iter()
        .find(|d| d["id"] == second)
        .unwrap();
    assert_eq!(winner["status"], "Busy");

    // A second acceptance attempt conflicts.
    let res = app
        .oneshot(post_request(&format!(
            "/bookings/{booking_id}/offers/{winning_offer_id}/accept"
        )))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn duplicate_offer_returns_409() {
    let (state, _rx) = AppState::new(1024, 1024);
    let app = router(Arc::new(state));

    let booking_id = create_bidding_booking(&app, 15000).await;
    let driver = create_driver(&app, "Blaise", 4.5).await;

    let res = submit_offer(&app, &booking_id, &driver, 16000).await;
    assert_eq!(res.status(), StatusCode::OK);

    let res = submit_offer(&app, &booking_id, &driver, 14000).await;
    assert_eq!(res.status(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn ineligible_driver_returns_403() {
    let (state, _rx) = AppState::new(1024, 1024);
    let app = router(Arc::new(state));

    let booking_id = create_bidding_booking(&app, 15000).await;

    let res = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/drivers",
            json!({
                "name": "Lapsed",
                "location": { "lat": -4.3217, "lng": 15.3069 },
                "vehicles": [ { "vehicle_class": "Eco", "approved": true } ],
                "rating": 4.9,
                "subscription": {
                    "status": "Active",
                    "rides_remaining": 0,
                    "expires_at": "2099-01-01T00:00:00Z"
                }
            }),
        ))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let driver = body_json(res).await;
    let driver_id = driver["id"].as_str().unwrap().to_string();

    let res = submit_offer(&app, &booking_id, &driver_id, 14000).await;
    assert_eq!(res.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn excessive_counter_offer_returns_400() {
    let (state, _rx) = AppState::new(1024, 1024);
    let app = router(Arc::new(state));

    let booking_id = create_bidding_booking(&app, 10000).await;
    let driver = create_driver(&app, "Blaise", 4.5).await;

    let res = submit_offer(&app, &booking_id, &driver, 20001).await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn offers_on_dispatch_booking_return_409() {
    let (state, _rx) = AppState::new(1024, 1024);
    let app = router(Arc::new(state));

    let res = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/bookings",
            json!({
                "rider_id": Uuid::new_v4(),
                "pickup": { "lat": -4.3217, "lng": 15.3069 },
                "service": "Transport",
                "vehicle_class": "Eco"
            }),
        ))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let booking = body_json(res).await;
    let booking_id = booking["id"].as_str().unwrap().to_string();
    let driver = create_driver(&app, "Blaise", 4.5).await;

    let res = submit_offer(&app, &booking_id, &driver, 14000).await;
    assert_eq!(res.status(), StatusCode::CONFLICT);
}
