use std::sync::Arc;

use axum_test::TestServer;
use lavagem_api::{ApiState, build_router};
use lavagem_core::repository::Repository;
use lavagem_core::scheduler::{Scheduler, SchedulerConfig};
use lavagem_db::InMemoryRepository;
use serde_json::{Value, json};

/// A server backed by a fresh in-memory store.
pub fn test_server() -> TestServer {
    test_server_with(SchedulerConfig::default())
}

pub fn test_server_with(config: SchedulerConfig) -> TestServer {
    let repository: Arc<dyn Repository> = Arc::new(InMemoryRepository::new());
    let state = Arc::new(ApiState {
        scheduler: Scheduler::new(repository.clone(), config),
        repository,
    });

    TestServer::new(build_router(state)).unwrap()
}

pub fn booking(plate: &str, date: &str, start: &str, end: &str) -> Value {
    json!({
        "vehicle": plate,
        "wash_type": "basic",
        "date": date,
        "start_time": start,
        "end_time": end,
    })
}
