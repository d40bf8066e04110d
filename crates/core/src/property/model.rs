use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use reservas_search::Listing;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::validate::ValidationError;

/// Kind of rural lodging a listing offers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PropertyType {
    Pousada,
    Sitio,
    Fazenda,
}

impl PropertyType {
    pub fn as_str(&self) -> &'static str {
        match self {
            PropertyType::Pousada => "pousada",
            PropertyType::Sitio => "sitio",
            PropertyType::Fazenda => "fazenda",
        }
    }

    /// Human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            PropertyType::Pousada => "Pousada",
            PropertyType::Sitio => "Sítio",
            PropertyType::Fazenda => "Fazenda",
        }
    }
}

impl FromStr for PropertyType {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pousada" => Ok(PropertyType::Pousada),
            "sitio" => Ok(PropertyType::Sitio),
            "fazenda" => Ok(PropertyType::Fazenda),
            other => Err(ValidationError::UnknownType(other.to_string())),
        }
    }
}

impl fmt::Display for PropertyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub city: String,
    pub state: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lat: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lng: Option<f64>,
}

/// A rental listing as served to clients.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Property {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub location: Location,
    /// Nightly price in BRL.
    pub price: f64,
    #[serde(rename = "type")]
    pub property_type: PropertyType,
    pub max_guests: i32,
    pub whatsapp: String,
    pub images: Vec<String>,
    pub amenities: Vec<String>,
    pub manager_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Database row representation of a listing.
/// Maps to the `properties` PostgreSQL table.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct PropertyRow {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    #[sqlx(rename = "type")]
    pub property_type: String,
    pub city: String,
    pub state: String,
    pub address: Option<String>,
    pub lat: Option<f64>,
    pub lng: Option<f64>,
    pub price: f64,
    pub max_guests: i32,
    pub whatsapp: String,
    pub amenities: Vec<String>,
    pub images: Vec<String>,
    pub manager_id: Uuid,
    pub view_count: i64,
    pub whatsapp_clicks: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl TryFrom<PropertyRow> for Property {
    type Error = ValidationError;

    fn try_from(row: PropertyRow) -> Result<Self, Self::Error> {
        Ok(Property {
            id: row.id,
            title: row.title,
            description: row.description,
            location: Location {
                city: row.city,
                state: row.state,
                address: row.address.filter(|a| !a.is_empty()),
                lat: row.lat,
                lng: row.lng,
            },
            price: row.price,
            property_type: row.property_type.parse()?,
            max_guests: row.max_guests,
            whatsapp: row.whatsapp,
            images: row.images,
            amenities: row.amenities,
            manager_id: row.manager_id,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

/// Input for creating a listing. Identity, ownership and timestamps are
/// assigned by the server.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewProperty {
    pub title: String,
    pub description: String,
    pub location: Location,
    pub price: f64,
    #[serde(rename = "type")]
    pub property_type: PropertyType,
    pub max_guests: i32,
    pub whatsapp: String,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default)]
    pub amenities: Vec<String>,
}

impl Property {
    /// Whether `account_id` may edit or delete this listing.
    pub fn is_managed_by(&self, account_id: Uuid) -> bool {
        self.manager_id == account_id
    }
}

impl Listing for Property {
    fn city(&self) -> &str {
        &self.location.city
    }

    fn max_guests(&self) -> i32 {
        self.max_guests
    }

    fn listing_type(&self) -> &str {
        self.property_type.as_str()
    }

    fn price(&self) -> f64 {
        self.price
    }

    fn amenities(&self) -> &[String] {
        &self.amenities
    }
}
