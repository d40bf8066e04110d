//! PostgreSQL access for the `accounts` table.

use sqlx::PgPool;
use uuid::Uuid;

use super::model::{Account, AccountRow, Registration, Role};

fn into_account(row: AccountRow) -> Result<Account, sqlx::Error> {
    Account::try_from(row).map_err(|e| sqlx::Error::Decode(e.into()))
}

/// Insert a new account. Returns `None` when the email is already taken.
pub async fn insert_account(
    pool: &PgPool,
    registration: &Registration,
    password_hash: &str,
    role: Role,
) -> Result<Option<Account>, sqlx::Error> {
    let result = sqlx::query_as::<_, AccountRow>(
        r#"
        INSERT INTO accounts (id, name, email, phone, property_name, role, password_hash)
        VALUES ($1, $2, $3, $4, $5, $6, $7)
        RETURNING *
        "#,
    )
    .bind(Uuid::now_v7())
    .bind(&registration.name)
    .bind(&registration.email)
    .bind(&registration.phone)
    .bind(&registration.property_name)
    .bind(role.as_str())
    .bind(password_hash)
    .fetch_one(pool)
    .await;

    match result {
        Ok(row) => into_account(row).map(Some),
        Err(sqlx::Error::Database(e)) if e.is_unique_violation() => Ok(None),
        Err(e) => Err(e),
    }
}

/// Look up an account row, hash included, by normalized email.
pub async fn find_by_email(pool: &PgPool, email: &str) -> Result<Option<AccountRow>, sqlx::Error> {
    sqlx::query_as::<_, AccountRow>("SELECT * FROM accounts WHERE email = $1")
        .bind(email)
        .fetch_optional(pool)
        .await
}

pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<Account>, sqlx::Error> {
    sqlx::query_as::<_, AccountRow>("SELECT * FROM accounts WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await?
        .map(into_account)
        .transpose()
}
