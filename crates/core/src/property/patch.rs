use chrono::{DateTime, Utc};
use serde::Deserialize;

use super::model::{Property, PropertyType};
use super::validate::dedup_amenities;

/// Partial update of a listing. Absent fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    #[serde(rename = "type")]
    pub property_type: Option<PropertyType>,
    pub location: Option<LocationPatch>,
    pub price: Option<f64>,
    pub max_guests: Option<i32>,
    pub whatsapp: Option<String>,
    pub amenities: Option<Vec<String>>,
    pub images: Option<Vec<String>>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct LocationPatch {
    pub city: Option<String>,
    pub state: Option<String>,
    pub address: Option<String>,
    pub lat: Option<f64>,
    pub lng: Option<f64>,
}

impl PropertyPatch {
    pub fn is_empty(&self) -> bool {
        self == &PropertyPatch::default()
    }
}

impl Property {
    /// Overwrite exactly the fields present in `patch` and stamp `updated_at`.
    pub fn apply(&mut self, patch: PropertyPatch, now: DateTime<Utc>) {
        if let Some(title) = patch.title {
            self.title = title.trim().to_string();
        }
        if let Some(description) = patch.description {
            self.description = description.trim().to_string();
        }
        if let Some(property_type) = patch.property_type {
            self.property_type = property_type;
        }
        if let Some(location) = patch.location {
            if let Some(city) = location.city {
                self.location.city = city.trim().to_string();
            }
            if let Some(state) = location.state {
                self.location.state = state.trim().to_string();
            }
            if let Some(address) = location.address {
                let address = address.trim().to_string();
                self.location.address = (!address.is_empty()).then_some(address);
            }
            if location.lat.is_some() {
                self.location.lat = location.lat;
            }
            if location.lng.is_some() {
                self.location.lng = location.lng;
            }
        }
        if let Some(price) = patch.price {
            self.price = price;
        }
        if let Some(max_guests) = patch.max_guests {
            self.max_guests = max_guests;
        }
        if let Some(whatsapp) = patch.whatsapp {
            self.whatsapp = whatsapp.trim().to_string();
        }
        if let Some(amenities) = patch.amenities {
            self.amenities = dedup_amenities(amenities);
        }
        if let Some(images) = patch.images {
            self.images = images;
        }
        self.updated_at = now;
    }
}
