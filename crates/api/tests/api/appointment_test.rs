use axum::http::StatusCode;
use lavagem_core::scheduler::{SchedulerConfig, UpdatePolicy};
use pretty_assertions::assert_eq;
use rstest::rstest;
use serde_json::{Value, json};
use uuid::Uuid;

use crate::test_utils::{booking, test_server, test_server_with};

#[test_log::test(tokio::test)]
async fn test_booking_scenario() {
    let server = test_server();

    let first = server
        .post("/api/appointments")
        .json(&booking("ABC1234", "10/05/2024", "09:00", "10:00"))
        .await;
    first.assert_status(StatusCode::CREATED);
    let created: Value = first.json();
    assert_eq!(created["vehicle"], "ABC1234");
    assert_eq!(created["date"], "10/05/2024");
    assert_eq!(created["start_time"], "09:00");
    assert_eq!(created["end_time"], "10:00");
    assert_eq!(created["wash_type"], "basic");

    let overlapping = server
        .post("/api/appointments")
        .json(&booking("ABC1234", "10/05/2024", "09:30", "10:30"))
        .await;
    overlapping.assert_status(StatusCode::CONFLICT);
    let body: Value = overlapping.json();
    assert_eq!(body["error"], "Time slot is already booked for this vehicle.");
    assert_eq!(body["free_slots"], json!(["08:00 - 09:00", "10:00 - 18:00"]));
    assert_eq!(
        body["messages"],
        json!([
            "Time slot is already booked for this vehicle.",
            "Free slots: 08:00 - 09:00, 10:00 - 18:00."
        ])
    );

    let adjacent = server
        .post("/api/appointments")
        .json(&booking("ABC1234", "10/05/2024", "10:00", "11:00"))
        .await;
    adjacent.assert_status(StatusCode::CREATED);
}

#[tokio::test]
async fn test_legacy_field_names() {
    let server = test_server();

    let response = server
        .post("/api/appointments")
        .json(&json!({
            "veiculo": "XYZ9876",
            "tipo_lavagem": "completa",
            "data": "01/02/2025",
            "hora_inicio": "14:00:59",
            "hora_fim": "15:30:00",
            "observacao": "Interior only"
        }))
        .await;

    response.assert_status(StatusCode::CREATED);
    let body: Value = response.json();
    assert_eq!(body["wash_type"], "full");
    assert_eq!(body["start_time"], "14:00");
    assert_eq!(body["end_time"], "15:30");
    assert_eq!(body["note"], "Interior only");
}

#[rstest]
#[case(json!({}), "Required fields: vehicle, date, start_time, end_time.")]
#[case(
    json!({"vehicle": "ABC1234", "date": " ", "start_time": "09:00", "end_time": "10:00"}),
    "Required fields: date."
)]
#[case(
    booking("ABC1234", "2024-05-10", "09:00", "10:00"),
    "Invalid date format: '2024-05-10'. Use DD/MM/YYYY."
)]
#[case(
    booking("ABC1234", "10/05/2024", "9h", "10:00"),
    "Invalid time format: '9h'. Use HH:MM or HH:MM:SS."
)]
#[case(
    booking("ABC1234", "10/05/2024", "10:00", "09:00"),
    "Start time 10:00 must be before end time 09:00."
)]
#[case(
    booking("ABC1234", "10/05/2024", "07:00", "09:00"),
    "Appointments must be scheduled between 08:00 - 18:00."
)]
#[case(
    json!({"vehicle": "ABC1234", "date": "10/05/2024", "start_time": "09:00", "end_time": "10:00"}),
    "Required fields: wash_type."
)]
#[tokio::test]
async fn test_rejected_requests(#[case] payload: Value, #[case] expected: &str) {
    let server = test_server();

    let response = server.post("/api/appointments").json(&payload).await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["error"], expected);
    assert_eq!(body["messages"], json!([expected]));
    assert_eq!(body["free_slots"], json!([]));
}

#[tokio::test]
async fn test_malformed_body_uses_error_format() {
    let server = test_server();

    let response = server
        .post("/api/appointments")
        .json(&json!({"vehicle": "ABC1234", "employees": "everyone"}))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert!(body["error"].as_str().unwrap().starts_with("Validation error:"));
}

#[tokio::test]
async fn test_unknown_wash_type_does_not_hide_date_error() {
    let server = test_server();

    let response = server
        .post("/api/appointments")
        .json(&json!({
            "veiculo": "ABC1234",
            "tipo_lavagem": "x",
            "data": "bad",
            "hora_inicio": "09:00",
            "hora_fim": "10:00"
        }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(
        response.json::<Value>()["error"],
        "Invalid date format: 'bad'. Use DD/MM/YYYY."
    );

    let mut request = booking("ABC1234", "10/05/2024", "09:00", "10:00");
    request["wash_type"] = json!("deluxe");
    let response = server.post("/api/appointments").json(&request).await;
    response.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(
        response.json::<Value>()["error"],
        "Validation error: Unknown wash type 'deluxe'. Use basic, full or special."
    );
}

#[tokio::test]
async fn test_overlong_plate_is_a_client_error() {
    let server = test_server();

    let response = server
        .post("/api/appointments")
        .json(&booking("ABCDEFGHIJKLMNOP", "10/05/2024", "09:00", "10:00"))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(
        response.json::<Value>()["error"],
        "Validation error: Plate must be at most 10 characters"
    );
}

#[tokio::test]
async fn test_get_update_delete() {
    let server = test_server();

    let created: Value = server
        .post("/api/appointments")
        .json(&booking("ABC1234", "10/05/2024", "09:00", "10:00"))
        .await
        .json();
    let path = format!("/api/appointments/{}", created["id"].as_str().unwrap());

    let fetched = server.get(&path).await;
    fetched.assert_status_ok();
    assert_eq!(fetched.json::<Value>(), created);

    let updated = server
        .put(&path)
        .json(&booking("ABC1234", "10/05/2024", "09:30", "10:30"))
        .await;
    updated.assert_status_ok();
    assert_eq!(updated.json::<Value>()["start_time"], "09:30");

    server.delete(&path).await.assert_status(StatusCode::NO_CONTENT);
    server.get(&path).await.assert_status(StatusCode::NOT_FOUND);
    server.delete(&path).await.assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_unknown_appointment() {
    let server = test_server();
    let path = format!("/api/appointments/{}", Uuid::new_v4());

    let response = server.get(&path).await;
    response.assert_status(StatusCode::NOT_FOUND);

    let response = server
        .put(&path)
        .json(&booking("ABC1234", "10/05/2024", "09:00", "10:00"))
        .await;
    response.assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_update_conflict_respects_policy() {
    for (policy, expected) in [
        (UpdatePolicy::RecheckOverlap, StatusCode::CONFLICT),
        (UpdatePolicy::SkipOverlap, StatusCode::OK),
    ] {
        let server = test_server_with(SchedulerConfig {
            update_policy: policy,
            ..SchedulerConfig::default()
        });

        server
            .post("/api/appointments")
            .json(&booking("ABC1234", "10/05/2024", "11:00", "12:00"))
            .await
            .assert_status(StatusCode::CREATED);
        let morning: Value = server
            .post("/api/appointments")
            .json(&booking("ABC1234", "10/05/2024", "09:00", "10:00"))
            .await
            .json();

        let response = server
            .put(&format!("/api/appointments/{}", morning["id"].as_str().unwrap()))
            .json(&booking("ABC1234", "10/05/2024", "10:30", "11:30"))
            .await;
        response.assert_status(expected);
    }
}

#[tokio::test]
async fn test_list_filters_and_ordering() {
    let server = test_server();
    for (plate, date, start, end) in [
        ("ABC1234", "10/05/2024", "14:00", "15:00"),
        ("ABC1234", "10/05/2024", "09:00", "10:00"),
        ("ABC1234", "11/05/2024", "08:00", "09:00"),
        ("XYZ9876", "10/05/2024", "09:00", "10:00"),
    ] {
        server
            .post("/api/appointments")
            .json(&booking(plate, date, start, end))
            .await
            .assert_status(StatusCode::CREATED);
    }

    let listed: Vec<Value> = server
        .get("/api/appointments")
        .add_query_param("vehicle", "abc1234")
        .add_query_param("date", "10/05/2024")
        .await
        .json();
    let starts: Vec<&str> = listed
        .iter()
        .map(|a| a["start_time"].as_str().unwrap())
        .collect();
    assert_eq!(starts, vec!["09:00", "14:00"]);

    let listed: Vec<Value> = server
        .get("/api/appointments")
        .add_query_param("vehicle", "ABC1234")
        .add_query_param("ordering", "-date,-start_time")
        .await
        .json();
    let keys: Vec<(&str, &str)> = listed
        .iter()
        .map(|a| (a["date"].as_str().unwrap(), a["start_time"].as_str().unwrap()))
        .collect();
    assert_eq!(
        keys,
        vec![
            ("11/05/2024", "08:00"),
            ("10/05/2024", "14:00"),
            ("10/05/2024", "09:00"),
        ]
    );

    let all: Vec<Value> = server
        .get("/api/appointments")
        .add_query_param("wash_type", "simples")
        .await
        .json();
    assert_eq!(all.len(), 4);
}

#[rstest]
#[case("ordering", "price")]
#[case("wash_type", "deluxe")]
#[case("date", "2024-05-10")]
#[tokio::test]
async fn test_list_rejects_bad_parameters(#[case] name: &str, #[case] value: &str) {
    let server = test_server();

    let response = server
        .get("/api/appointments")
        .add_query_param(name, value)
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_free_slots_endpoint() {
    let server = test_server();
    for (start, end) in [("09:00", "10:00"), ("14:00", "15:00")] {
        server
            .post("/api/appointments")
            .json(&booking("ABC1234", "10/05/2024", start, end))
            .await
            .assert_status(StatusCode::CREATED);
    }

    let response = server
        .get("/api/appointments/free-slots")
        .add_query_param("vehicle", "ABC1234")
        .add_query_param("date", "10/05/2024")
        .await;

    response.assert_status_ok();
    assert_eq!(
        response.json::<Value>(),
        json!({
            "vehicle": "ABC1234",
            "date": "10/05/2024",
            "free_slots": ["08:00 - 09:00", "10:00 - 14:00", "15:00 - 18:00"]
        })
    );
}

#[tokio::test]
async fn test_free_slots_requires_parameters() {
    let server = test_server();

    let response = server
        .get("/api/appointments/free-slots")
        .add_query_param("vehicle", "ABC1234")
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(response.json::<Value>()["error"], "Required fields: date.");
}
