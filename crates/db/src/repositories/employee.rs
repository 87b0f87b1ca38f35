use crate::models::DbEmployee;
use eyre::Result;
use sqlx::{Pool, Postgres};
use uuid::Uuid;

pub async fn create_employee(pool: &Pool<Postgres>, name: &str) -> Result<DbEmployee> {
    let id = Uuid::new_v4();

    let employee = sqlx::query_as::<_, DbEmployee>(
        r#"
        INSERT INTO employees (id, name)
        VALUES ($1, $2)
        RETURNING id, name
        "#,
    )
    .bind(id)
    .bind(name)
    .fetch_one(pool)
    .await?;

    Ok(employee)
}

pub async fn get_employee_by_id(pool: &Pool<Postgres>, id: Uuid) -> Result<Option<DbEmployee>> {
    let employee = sqlx::query_as::<_, DbEmployee>(
        r#"
        SELECT id, name
        FROM employees
        WHERE id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(employee)
}

pub async fn list_employees(pool: &Pool<Postgres>) -> Result<Vec<DbEmployee>> {
    let employees = sqlx::query_as::<_, DbEmployee>(
        r#"
        SELECT id, name
        FROM employees
        ORDER BY name ASC
        "#,
    )
    .fetch_all(pool)
    .await?;

    Ok(employees)
}

pub async fn update_employee(
    pool: &Pool<Postgres>,
    id: Uuid,
    name: &str,
) -> Result<Option<DbEmployee>> {
    let employee = sqlx::query_as::<_, DbEmployee>(
        r#"
        UPDATE employees
        SET name = $2
        WHERE id = $1
        RETURNING id, name
        "#,
    )
    .bind(id)
    .bind(name)
    .fetch_optional(pool)
    .await?;

    Ok(employee)
}

pub async fn delete_employee(pool: &Pool<Postgres>, id: Uuid) -> Result<bool> {
    let result = sqlx::query("DELETE FROM employees WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}
