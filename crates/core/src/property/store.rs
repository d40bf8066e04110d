//! PostgreSQL access for the `properties` table.

use sqlx::PgPool;
use uuid::Uuid;

use super::model::{NewProperty, Property, PropertyRow};
use super::stats::ManagerStats;

fn into_property(row: PropertyRow) -> Result<Property, sqlx::Error> {
    Property::try_from(row).map_err(|e| sqlx::Error::Decode(Box::new(e)))
}

fn into_properties(rows: Vec<PropertyRow>) -> Result<Vec<Property>, sqlx::Error> {
    rows.into_iter().map(into_property).collect()
}

/// All listings, newest first.
pub async fn list_properties(pool: &PgPool) -> Result<Vec<Property>, sqlx::Error> {
    let rows = sqlx::query_as::<_, PropertyRow>(
        "SELECT * FROM properties ORDER BY created_at DESC",
    )
    .fetch_all(pool)
    .await?;
    into_properties(rows)
}

/// Listings owned by one manager, newest first.
pub async fn list_by_manager(pool: &PgPool, manager_id: Uuid) -> Result<Vec<Property>, sqlx::Error> {
    let rows = sqlx::query_as::<_, PropertyRow>(
        "SELECT * FROM properties WHERE manager_id = $1 ORDER BY created_at DESC",
    )
    .bind(manager_id)
    .fetch_all(pool)
    .await?;
    into_properties(rows)
}

pub async fn get_property(pool: &PgPool, id: Uuid) -> Result<Option<Property>, sqlx::Error> {
    sqlx::query_as::<_, PropertyRow>("SELECT * FROM properties WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await?
        .map(into_property)
        .transpose()
}

pub async fn insert_property(
    pool: &PgPool,
    manager_id: Uuid,
    input: &NewProperty,
) -> Result<Property, sqlx::Error> {
    let row = sqlx::query_as::<_, PropertyRow>(
        r#"
        INSERT INTO properties (
            id, title, description, type, city, state, address, lat, lng,
            price, max_guests, whatsapp, amenities, images, manager_id
        )
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15)
        RETURNING *
        "#,
    )
    .bind(Uuid::now_v7())
    .bind(&input.title)
    .bind(&input.description)
    .bind(input.property_type.as_str())
    .bind(&input.location.city)
    .bind(&input.location.state)
    .bind(&input.location.address)
    .bind(input.location.lat)
    .bind(input.location.lng)
    .bind(input.price)
    .bind(input.max_guests)
    .bind(&input.whatsapp)
    .bind(&input.amenities)
    .bind(&input.images)
    .bind(manager_id)
    .fetch_one(pool)
    .await?;

    into_property(row)
}

/// Persist every mutable column of an already-patched listing.
/// Returns `None` if the listing disappeared in the meantime.
pub async fn update_property(pool: &PgPool, property: &Property) -> Result<Option<Property>, sqlx::Error> {
    sqlx::query_as::<_, PropertyRow>(
        r#"
        UPDATE properties SET
            title = $2, description = $3, type = $4, city = $5, state = $6,
            address = $7, lat = $8, lng = $9, price = $10, max_guests = $11,
            whatsapp = $12, amenities = $13, images = $14, updated_at = $15
        WHERE id = $1
        RETURNING *
        "#,
    )
    .bind(property.id)
    .bind(&property.title)
    .bind(&property.description)
    .bind(property.property_type.as_str())
    .bind(&property.location.city)
    .bind(&property.location.state)
    .bind(&property.location.address)
    .bind(property.location.lat)
    .bind(property.location.lng)
    .bind(property.price)
    .bind(property.max_guests)
    .bind(&property.whatsapp)
    .bind(&property.amenities)
    .bind(&property.images)
    .bind(property.updated_at)
    .fetch_optional(pool)
    .await?
    .map(into_property)
    .transpose()
}

/// Delete a listing. Returns `false` when nothing matched.
pub async fn delete_property(pool: &PgPool, id: Uuid) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM properties WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}

pub async fn record_view(pool: &PgPool, id: Uuid) -> Result<(), sqlx::Error> {
    sqlx::query("UPDATE properties SET view_count = view_count + 1 WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(())
}

pub async fn record_whatsapp_click(pool: &PgPool, id: Uuid) -> Result<(), sqlx::Error> {
    sqlx::query("UPDATE properties SET whatsapp_clicks = whatsapp_clicks + 1 WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(())
}

/// Aggregate dashboard numbers across a manager's listings.
pub async fn manager_stats(pool: &PgPool, manager_id: Uuid) -> Result<ManagerStats, sqlx::Error> {
    let (views, clicks, active): (i64, i64, i64) = sqlx::query_as(
        r#"
        SELECT
            COALESCE(SUM(view_count), 0)::BIGINT,
            COALESCE(SUM(whatsapp_clicks), 0)::BIGINT,
            COUNT(*)
        FROM properties
        WHERE manager_id = $1
        "#,
    )
    .bind(manager_id)
    .fetch_one(pool)
    .await?;

    Ok(ManagerStats::new(views, clicks, active))
}
