use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::{ScheduleError, ScheduleResult};

/// Plates are stored in a `VARCHAR(10)` column.
pub const MAX_PLATE_LEN: usize = 10;

/// Trims a plate and checks it fits the stored column.
pub fn validate_plate(plate: &str) -> ScheduleResult<&str> {
    let plate = plate.trim();
    if plate.is_empty() {
        return Err(ScheduleError::MissingField(vec!["plate"]));
    }
    if plate.chars().count() > MAX_PLATE_LEN {
        return Err(ScheduleError::Validation(format!(
            "Plate must be at most {MAX_PLATE_LEN} characters"
        )));
    }
    Ok(plate)
}

/// Plate identity: surrounding whitespace and letter case are ignored,
/// for any alphabet, matching `LOWER(plate)` in Postgres.
pub fn same_plate(a: &str, b: &str) -> bool {
    a.trim().to_lowercase() == b.trim().to_lowercase()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vehicle {
    pub id: Uuid,
    pub name: String,
    pub brand: String,
    pub plate: String,
    pub color: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateVehicleRequest {
    #[serde(default, alias = "nome")]
    pub name: String,
    #[serde(default, alias = "marca")]
    pub brand: String,
    #[serde(alias = "placa")]
    pub plate: String,
    #[serde(default, alias = "cor")]
    pub color: String,
}

impl CreateVehicleRequest {
    /// The record `find_or_create_by_plate` inserts for an unknown plate:
    /// empty name, brand and color, plate trimmed but otherwise kept as given.
    pub fn placeholder(plate: &str) -> Self {
        Self {
            plate: plate.trim().to_string(),
            ..Self::default()
        }
    }
}
