//! Per-account favorite listings.

use sqlx::PgPool;
use uuid::Uuid;

use crate::property::model::{Property, PropertyRow};

/// Favorite listings of an account, most recently favorited first.
pub async fn list_favorites(pool: &PgPool, account_id: Uuid) -> Result<Vec<Property>, sqlx::Error> {
    let rows = sqlx::query_as::<_, PropertyRow>(
        r#"
        SELECT p.*
        FROM favorites f
        JOIN properties p ON p.id = f.property_id
        WHERE f.account_id = $1
        ORDER BY f.created_at DESC
        "#,
    )
    .bind(account_id)
    .fetch_all(pool)
    .await?;

    rows.into_iter()
        .map(|row| Property::try_from(row).map_err(|e| sqlx::Error::Decode(Box::new(e))))
        .collect()
}

/// Flip the favorite flag. Returns `Some(true)` if the listing is now a
/// favorite and `None` if the listing does not exist.
pub async fn toggle_favorite(
    pool: &PgPool,
    account_id: Uuid,
    property_id: Uuid,
) -> Result<Option<bool>, sqlx::Error> {
    let mut tx = pool.begin().await?;

    let removed = sqlx::query("DELETE FROM favorites WHERE account_id = $1 AND property_id = $2")
        .bind(account_id)
        .bind(property_id)
        .execute(&mut *tx)
        .await?
        .rows_affected()
        > 0;

    if !removed {
        let inserted = sqlx::query(
            "INSERT INTO favorites (account_id, property_id) VALUES ($1, $2) ON CONFLICT DO NOTHING",
        )
        .bind(account_id)
        .bind(property_id)
        .execute(&mut *tx)
        .await;

        match inserted {
            Ok(_) => {}
            Err(e) if is_missing_reference(&e) => return Ok(None),
            Err(e) => return Err(e),
        }
    }

    tx.commit().await?;
    Ok(Some(!removed))
}

fn is_missing_reference(err: &sqlx::Error) -> bool {
    matches!(err, sqlx::Error::Database(e) if e.is_foreign_key_violation())
}

/// Remove a favorite. Returns `false` when it was not set.
pub async fn remove_favorite(
    pool: &PgPool,
    account_id: Uuid,
    property_id: Uuid,
) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM favorites WHERE account_id = $1 AND property_id = $2")
        .bind(account_id)
        .bind(property_id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}
