use crate::models::DbVehicle;
use eyre::Result;
use lavagem_core::models::vehicle::CreateVehicleRequest;
use sqlx::{Pool, Postgres};
use uuid::Uuid;

pub async fn create_vehicle(pool: &Pool<Postgres>, vehicle: &CreateVehicleRequest) -> Result<DbVehicle> {
    let id = Uuid::new_v4();

    tracing::debug!("Creating vehicle: id={}, plate={}", id, vehicle.plate);

    let row = sqlx::query_as::<_, DbVehicle>(
        r#"
        INSERT INTO vehicles (id, name, brand, plate, color)
        VALUES ($1, $2, $3, $4, $5)
        RETURNING id, name, brand, plate, color
        "#,
    )
    .bind(id)
    .bind(&vehicle.name)
    .bind(&vehicle.brand)
    .bind(vehicle.plate.trim())
    .bind(&vehicle.color)
    .fetch_one(pool)
    .await?;

    Ok(row)
}

/// Inserts a placeholder vehicle unless the plate already exists, then
/// returns the stored record. Safe under concurrent calls for one plate.
pub async fn find_or_create_vehicle_by_plate(pool: &Pool<Postgres>, plate: &str) -> Result<DbVehicle> {
    let placeholder = CreateVehicleRequest::placeholder(plate);

    sqlx::query(
        r#"
        INSERT INTO vehicles (id, name, brand, plate, color)
        VALUES ($1, $2, $3, $4, $5)
        ON CONFLICT ((LOWER(plate))) DO NOTHING
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(&placeholder.name)
    .bind(&placeholder.brand)
    .bind(&placeholder.plate)
    .bind(&placeholder.color)
    .execute(pool)
    .await?;

    let row = sqlx::query_as::<_, DbVehicle>(
        r#"
        SELECT id, name, brand, plate, color
        FROM vehicles
        WHERE LOWER(plate) = LOWER($1)
        "#,
    )
    .bind(&placeholder.plate)
    .fetch_one(pool)
    .await?;

    Ok(row)
}

pub async fn get_vehicle_by_id(pool: &Pool<Postgres>, id: Uuid) -> Result<Option<DbVehicle>> {
    let row = sqlx::query_as::<_, DbVehicle>(
        r#"
        SELECT id, name, brand, plate, color
        FROM vehicles
        WHERE id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(row)
}

pub async fn list_vehicles(pool: &Pool<Postgres>) -> Result<Vec<DbVehicle>> {
    let rows = sqlx::query_as::<_, DbVehicle>(
        r#"
        SELECT id, name, brand, plate, color
        FROM vehicles
        ORDER BY plate ASC
        "#,
    )
    .fetch_all(pool)
    .await?;

    Ok(rows)
}
