use eyre::Result;
use sqlx::{Pool, Postgres};
use tracing::info;

pub async fn initialize_database(pool: &Pool<Postgres>) -> Result<()> {
    info!("Initializing database schema...");

    // Create vehicles table
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS vehicles (
            id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
            name VARCHAR(255) NOT NULL DEFAULT '',
            brand VARCHAR(255) NOT NULL DEFAULT '',
            plate VARCHAR(10) NOT NULL,
            color VARCHAR(50) NOT NULL DEFAULT ''
        );
        "#,
    )
    .execute(pool)
    .await?;

    // Create employees table
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS employees (
            id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
            name VARCHAR(255) NOT NULL
        );
        "#,
    )
    .execute(pool)
    .await?;

    // Create appointments table
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS appointments (
            id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
            vehicle_id UUID NOT NULL REFERENCES vehicles(id) ON DELETE CASCADE,
            wash_type VARCHAR(20) NOT NULL,
            date DATE NOT NULL,
            start_time TIME NOT NULL,
            end_time TIME NOT NULL,
            note TEXT NULL,
            created_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW(),
            CONSTRAINT valid_time_range CHECK (end_time > start_time),
            CONSTRAINT valid_wash_type CHECK (wash_type IN ('basic', 'full', 'special'))
        );
        "#,
    )
    .execute(pool)
    .await?;

    // Create appointment_employees table
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS appointment_employees (
            appointment_id UUID NOT NULL REFERENCES appointments(id) ON DELETE CASCADE,
            employee_id UUID NOT NULL REFERENCES employees(id) ON DELETE CASCADE,
            PRIMARY KEY (appointment_id, employee_id)
        );
        "#,
    )
    .execute(pool)
    .await?;

    // Create indexes, one statement per query
    let indexes = [
        "CREATE UNIQUE INDEX IF NOT EXISTS idx_vehicles_plate_lower ON vehicles(LOWER(plate))",
        "CREATE UNIQUE INDEX IF NOT EXISTS idx_appointments_unique_slot ON appointments(vehicle_id, date, start_time, end_time)",
        "CREATE INDEX IF NOT EXISTS idx_appointments_vehicle_date ON appointments(vehicle_id, date)",
        "CREATE INDEX IF NOT EXISTS idx_appointments_date_start ON appointments(date, start_time)",
        "CREATE INDEX IF NOT EXISTS idx_appointment_employees_employee_id ON appointment_employees(employee_id)",
    ];
    for statement in indexes {
        sqlx::query(statement).execute(pool).await?;
    }

    info!("Database schema initialized successfully.");
    Ok(())
}
