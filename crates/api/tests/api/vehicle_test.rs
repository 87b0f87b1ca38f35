use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use serde_json::{Value, json};
use uuid::Uuid;

use crate::test_utils::{booking, test_server};

#[tokio::test]
async fn test_create_and_fetch_vehicle() {
    let server = test_server();

    let created = server
        .post("/api/vehicles")
        .json(&json!({
            "nome": "Civic",
            "marca": "Honda",
            "placa": " ABC1234 ",
            "cor": "Prata"
        }))
        .await;
    created.assert_status(StatusCode::CREATED);
    let vehicle: Value = created.json();
    assert_eq!(vehicle["plate"], "ABC1234");
    assert_eq!(vehicle["brand"], "Honda");

    let path = format!("/api/vehicles/{}", vehicle["id"].as_str().unwrap());
    server.get(&path).await.assert_json(&vehicle);
}

#[tokio::test]
async fn test_duplicate_plate_is_rejected() {
    let server = test_server();
    server
        .post("/api/vehicles")
        .json(&json!({ "plate": "ABC1234" }))
        .await
        .assert_status(StatusCode::CREATED);

    let response = server
        .post("/api/vehicles")
        .json(&json!({ "plate": "abc1234" }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_plate_rules() {
    let server = test_server();

    let blank = server.post("/api/vehicles").json(&json!({ "plate": "" })).await;
    blank.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(blank.json::<Value>()["error"], "Required fields: plate.");

    let long = server
        .post("/api/vehicles")
        .json(&json!({ "plate": "ABCDEFGHIJK" }))
        .await;
    long.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(
        long.json::<Value>()["error"],
        "Validation error: Plate must be at most 10 characters"
    );
}

#[tokio::test]
async fn test_booking_registers_vehicle() {
    let server = test_server();

    server
        .post("/api/appointments")
        .json(&booking("NEW0001", "10/05/2024", "09:00", "10:00"))
        .await
        .assert_status(StatusCode::CREATED);

    let vehicles: Vec<Value> = server.get("/api/vehicles").await.json();
    assert_eq!(vehicles.len(), 1);
    assert_eq!(vehicles[0]["plate"], "NEW0001");
    assert_eq!(vehicles[0]["name"], "");
}

#[tokio::test]
async fn test_unknown_vehicle() {
    let server = test_server();

    server
        .get(&format!("/api/vehicles/{}", Uuid::new_v4()))
        .await
        .assert_status(StatusCode::NOT_FOUND);
}
