use axum::body::to_bytes;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use lavagem_api::middleware::error_handling::AppError;
use lavagem_core::errors::ScheduleError;
use lavagem_core::hours::BusinessHours;
use lavagem_core::interval::Interval;
use lavagem_core::time::parse_time;
use pretty_assertions::assert_eq;
use rstest::rstest;
use serde_json::{Value, json};

fn respond(error: ScheduleError) -> Response {
    AppError(error).into_response()
}

async fn body(response: Response) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[rstest]
#[case(ScheduleError::MissingField(vec!["vehicle"]), StatusCode::BAD_REQUEST)]
#[case(ScheduleError::InvalidDateFormat("x".into()), StatusCode::BAD_REQUEST)]
#[case(ScheduleError::InvalidTimeFormat("x".into()), StatusCode::BAD_REQUEST)]
#[case(
    ScheduleError::InvalidOrdering { start: "10:00".into(), end: "09:00".into() },
    StatusCode::BAD_REQUEST
)]
#[case(
    ScheduleError::OutOfHours { window: BusinessHours::default().window() },
    StatusCode::BAD_REQUEST
)]
#[case(ScheduleError::Validation("x".into()), StatusCode::BAD_REQUEST)]
#[case(ScheduleError::NotFound("x".into()), StatusCode::NOT_FOUND)]
#[case(ScheduleError::SlotConflict { free_slots: vec![] }, StatusCode::CONFLICT)]
#[case(ScheduleError::UniquenessViolation, StatusCode::CONFLICT)]
#[case(ScheduleError::Database(eyre::eyre!("boom")), StatusCode::INTERNAL_SERVER_ERROR)]
fn test_status_mapping(#[case] error: ScheduleError, #[case] expected: StatusCode) {
    assert_eq!(AppError(error).status(), expected);
}

#[tokio::test]
async fn test_conflict_body_lists_free_slots() {
    let slot = Interval::new(parse_time("10:00").unwrap(), parse_time("18:00").unwrap()).unwrap();
    let response = respond(ScheduleError::SlotConflict {
        free_slots: vec![slot],
    });

    assert_eq!(
        body(response).await,
        json!({
            "error": "Time slot is already booked for this vehicle.",
            "messages": [
                "Time slot is already booked for this vehicle.",
                "Free slots: 10:00 - 18:00."
            ],
            "free_slots": ["10:00 - 18:00"]
        })
    );
}

#[tokio::test]
async fn test_full_day_conflict_body() {
    let response = respond(ScheduleError::SlotConflict { free_slots: vec![] });

    let body = body(response).await;
    assert_eq!(body["messages"][1], "No free slots remain on this date.");
    assert_eq!(body["free_slots"], json!([]));
}

#[tokio::test]
async fn test_database_errors_are_hidden() {
    let response = respond(ScheduleError::Database(eyre::eyre!(
        "connection refused at 10.0.0.5"
    )));

    let body = body(response).await;
    assert_eq!(body["error"], "Internal server error");
    assert!(!body.to_string().contains("10.0.0.5"));
}
