use crate::models::{DbAppointment, DbAppointmentEmployee};
use chrono::{NaiveDate, NaiveTime};
use eyre::Result;
use lavagem_core::models::appointment::{AppointmentFilter, NewAppointment, SortField};
use sqlx::{PgConnection, PgExecutor, Pool, Postgres, QueryBuilder};
use uuid::Uuid;

const SELECT_APPOINTMENT: &str = r#"
    SELECT a.id, a.vehicle_id, v.plate, a.wash_type, a.date, a.start_time, a.end_time,
           a.note, a.created_at
    FROM appointments a
    JOIN vehicles v ON v.id = a.vehicle_id
"#;

pub async fn get_appointments_by_vehicle_and_date<'e, E>(
    executor: E,
    plate: &str,
    date: NaiveDate,
) -> Result<Vec<DbAppointment>>
where
    E: PgExecutor<'e>,
{
    tracing::debug!("Getting appointments: plate={}, date={}", plate, date);

    let appointments = sqlx::query_as::<_, DbAppointment>(&format!(
        "{SELECT_APPOINTMENT} WHERE LOWER(v.plate) = LOWER($1) AND a.date = $2 ORDER BY a.start_time ASC"
    ))
    .bind(plate.trim())
    .bind(date)
    .fetch_all(executor)
    .await?;

    Ok(appointments)
}

pub async fn get_appointment_by_id(
    pool: &Pool<Postgres>,
    id: Uuid,
) -> Result<Option<DbAppointment>> {
    let appointment = sqlx::query_as::<_, DbAppointment>(&format!(
        "{SELECT_APPOINTMENT} WHERE a.id = $1"
    ))
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(appointment)
}

pub async fn list_appointments(
    pool: &Pool<Postgres>,
    filter: &AppointmentFilter,
) -> Result<Vec<DbAppointment>> {
    let mut builder = QueryBuilder::<Postgres>::new(SELECT_APPOINTMENT);
    builder.push(" WHERE TRUE");

    if let Some(plate) = &filter.vehicle {
        builder
            .push(" AND LOWER(v.plate) = LOWER(")
            .push_bind(plate.trim().to_string())
            .push(")");
    }
    if let Some(wash_type) = filter.wash_type {
        builder.push(" AND a.wash_type = ").push_bind(wash_type.as_str());
    }
    if let Some(date) = filter.date {
        builder.push(" AND a.date = ").push_bind(date.as_naive());
    }

    // Column names come from a closed enum, never from the request.
    builder.push(" ORDER BY ");
    for key in &filter.ordering {
        let column = match key.field {
            SortField::Date => "a.date",
            SortField::StartTime => "a.start_time",
            SortField::EndTime => "a.end_time",
        };
        builder.push(column);
        builder.push(if key.descending { " DESC, " } else { " ASC, " });
    }
    builder.push("a.created_at ASC");

    let appointments = builder
        .build_query_as::<DbAppointment>()
        .fetch_all(pool)
        .await?;

    Ok(appointments)
}

pub async fn get_employee_ids<'e, E>(executor: E, appointment_ids: &[Uuid]) -> Result<Vec<DbAppointmentEmployee>>
where
    E: PgExecutor<'e>,
{
    let rows = sqlx::query_as::<_, DbAppointmentEmployee>(
        r#"
        SELECT appointment_id, employee_id
        FROM appointment_employees
        WHERE appointment_id = ANY($1)
        ORDER BY employee_id
        "#,
    )
    .bind(appointment_ids)
    .fetch_all(executor)
    .await?;

    Ok(rows)
}

/// Serializes writers for one vehicle and day until the transaction ends.
pub async fn lock_vehicle_day(conn: &mut PgConnection, vehicle_id: Uuid, date: NaiveDate) -> Result<()> {
    sqlx::query("SELECT pg_advisory_xact_lock(hashtext($1))")
        .bind(format!("{vehicle_id}:{date}"))
        .execute(conn)
        .await?;

    Ok(())
}

/// True when another booking of the vehicle on `date` overlaps the range.
pub async fn has_overlapping_appointment(
    conn: &mut PgConnection,
    vehicle_id: Uuid,
    date: NaiveDate,
    start_time: NaiveTime,
    end_time: NaiveTime,
    exclude: Option<Uuid>,
) -> Result<bool> {
    let exists = sqlx::query_scalar::<_, bool>(
        r#"
        SELECT EXISTS (
            SELECT 1
            FROM appointments
            WHERE vehicle_id = $1
              AND date = $2
              AND ($5::uuid IS NULL OR id <> $5)
              AND NOT (end_time <= $3 OR start_time >= $4)
        )
        "#,
    )
    .bind(vehicle_id)
    .bind(date)
    .bind(start_time)
    .bind(end_time)
    .bind(exclude)
    .fetch_one(conn)
    .await?;

    Ok(exists)
}

pub async fn insert_appointment(
    conn: &mut PgConnection,
    appointment: &NewAppointment,
) -> Result<DbAppointment> {
    let id = Uuid::new_v4();

    tracing::debug!(
        "Creating appointment: id={}, plate={}, date={}, slot={}",
        id, appointment.vehicle, appointment.date, appointment.slot
    );

    let row = sqlx::query_as::<_, DbAppointment>(
        r#"
        WITH inserted AS (
            INSERT INTO appointments (id, vehicle_id, wash_type, date, start_time, end_time, note, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, NOW())
            RETURNING *
        )
        SELECT i.id, i.vehicle_id, v.plate, i.wash_type, i.date, i.start_time, i.end_time,
               i.note, i.created_at
        FROM inserted i
        JOIN vehicles v ON v.id = i.vehicle_id
        "#,
    )
    .bind(id)
    .bind(appointment.vehicle_id)
    .bind(appointment.wash_type.as_str())
    .bind(appointment.date.as_naive())
    .bind(appointment.slot.start().as_naive())
    .bind(appointment.slot.end().as_naive())
    .bind(appointment.note.as_deref())
    .fetch_one(conn)
    .await?;

    Ok(row)
}

/// Returns `None` when no appointment has the given id.
pub async fn update_appointment(
    conn: &mut PgConnection,
    id: Uuid,
    appointment: &NewAppointment,
) -> Result<Option<DbAppointment>> {
    let row = sqlx::query_as::<_, DbAppointment>(
        r#"
        WITH updated AS (
            UPDATE appointments
            SET vehicle_id = $2, wash_type = $3, date = $4, start_time = $5, end_time = $6, note = $7
            WHERE id = $1
            RETURNING *
        )
        SELECT u.id, u.vehicle_id, v.plate, u.wash_type, u.date, u.start_time, u.end_time,
               u.note, u.created_at
        FROM updated u
        JOIN vehicles v ON v.id = u.vehicle_id
        "#,
    )
    .bind(id)
    .bind(appointment.vehicle_id)
    .bind(appointment.wash_type.as_str())
    .bind(appointment.date.as_naive())
    .bind(appointment.slot.start().as_naive())
    .bind(appointment.slot.end().as_naive())
    .bind(appointment.note.as_deref())
    .fetch_optional(conn)
    .await?;

    Ok(row)
}

pub async fn replace_employees(
    conn: &mut PgConnection,
    appointment_id: Uuid,
    employee_ids: &[Uuid],
) -> Result<()> {
    sqlx::query("DELETE FROM appointment_employees WHERE appointment_id = $1")
        .bind(appointment_id)
        .execute(&mut *conn)
        .await?;

    if !employee_ids.is_empty() {
        sqlx::query(
            r#"
            INSERT INTO appointment_employees (appointment_id, employee_id)
            SELECT $1, UNNEST($2::uuid[])
            "#,
        )
        .bind(appointment_id)
        .bind(employee_ids)
        .execute(&mut *conn)
        .await?;
    }

    Ok(())
}

/// Returns false when no appointment had the given id.
pub async fn delete_appointment(pool: &Pool<Postgres>, id: Uuid) -> Result<bool> {
    let result = sqlx::query("DELETE FROM appointments WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}
