use axum::http::StatusCode;
use fake::Fake;
use fake::faker::name::en::Name;
use pretty_assertions::assert_eq;
use serde_json::{Value, json};
use uuid::Uuid;

use crate::test_utils::{booking, test_server};

#[tokio::test]
async fn test_employee_lifecycle() {
    let server = test_server();
    let name: String = Name().fake();

    let created = server.post("/api/employees").json(&json!({ "name": name })).await;
    created.assert_status(StatusCode::CREATED);
    let employee: Value = created.json();
    assert_eq!(employee["name"], name);
    let path = format!("/api/employees/{}", employee["id"].as_str().unwrap());

    server.get(&path).await.assert_json(&employee);

    let renamed = server.put(&path).json(&json!({ "nome": "Joana" })).await;
    renamed.assert_status_ok();
    assert_eq!(renamed.json::<Value>()["name"], "Joana");

    let listed: Vec<Value> = server.get("/api/employees").await.json();
    assert_eq!(listed.len(), 1);

    server.delete(&path).await.assert_status(StatusCode::NO_CONTENT);
    server.get(&path).await.assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_employee_requires_name() {
    let server = test_server();

    let response = server.post("/api/employees").json(&json!({ "name": "  " })).await;

    response.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(response.json::<Value>()["error"], "Required fields: name.");
}

#[tokio::test]
async fn test_unknown_employee() {
    let server = test_server();
    let path = format!("/api/employees/{}", Uuid::new_v4());

    server
        .put(&path)
        .json(&json!({ "name": "Joana" }))
        .await
        .assert_status(StatusCode::NOT_FOUND);
    server.delete(&path).await.assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_appointment_with_employees() {
    let server = test_server();
    let employee: Value = server
        .post("/api/employees")
        .json(&json!({ "name": Name().fake::<String>() }))
        .await
        .json();
    let id = employee["id"].clone();

    let mut request = booking("ABC1234", "10/05/2024", "09:00", "10:00");
    request["funcionarios"] = json!([id, id]);
    let created = server.post("/api/appointments").json(&request).await;
    created.assert_status(StatusCode::CREATED);
    assert_eq!(created.json::<Value>()["employees"], json!([id]));

    let mut request = booking("ABC1234", "10/05/2024", "11:00", "12:00");
    request["employees"] = json!([Uuid::new_v4()]);
    let rejected = server.post("/api/appointments").json(&request).await;
    rejected.assert_status(StatusCode::BAD_REQUEST);
}
