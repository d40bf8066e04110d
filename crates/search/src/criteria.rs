use serde::Deserialize;

use crate::category::Category;
use crate::filter::Listing;
use crate::number::parse_leading_int;

/// Search parameters exactly as they arrive on the query string.
///
/// `checkIn`/`checkOut` are accepted so links from the home page search bar
/// deserialize, but availability is not tracked and they never filter.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawQuery {
    pub location: Option<String>,
    pub guests: Option<String>,
    #[serde(rename = "type")]
    pub listing_type: Option<String>,
    pub min_price: Option<String>,
    pub max_price: Option<String>,
    /// Comma-separated amenity labels.
    pub amenities: Option<String>,
    pub category: Option<String>,
    pub check_in: Option<String>,
    pub check_out: Option<String>,
}

/// Parsed search criteria. Every `None`/empty field is simply not applied.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchCriteria {
    pub location: Option<String>,
    pub guests: Option<i64>,
    pub listing_type: Option<String>,
    pub min_price: Option<i64>,
    pub max_price: Option<i64>,
    pub amenities: Vec<String>,
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

impl SearchCriteria {
    pub fn from_query(raw: &RawQuery) -> Self {
        let mut criteria = SearchCriteria {
            location: non_empty(&raw.location).map(str::to_string),
            guests: non_empty(&raw.guests).and_then(parse_leading_int),
            listing_type: non_empty(&raw.listing_type).map(str::to_string),
            min_price: non_empty(&raw.min_price).and_then(parse_leading_int),
            max_price: non_empty(&raw.max_price).and_then(parse_leading_int),
            amenities: non_empty(&raw.amenities)
                .map(|list| {
                    list.split(',')
                        .map(str::trim)
                        .filter(|a| !a.is_empty())
                        .map(str::to_string)
                        .collect()
                })
                .unwrap_or_default(),
        };

        if let Some(id) = non_empty(&raw.category) {
            match id.parse::<Category>() {
                Ok(category) => criteria.apply_category(category),
                Err(e) => tracing::debug!("ignoring category: {e}"),
            }
        }

        criteria
    }

    /// Narrow by a browse category. An explicit `type` takes precedence.
    pub fn apply_category(&mut self, category: Category) {
        if self.listing_type.is_none() {
            self.listing_type = category.listing_type().map(str::to_string);
        }
        if let Some(amenity) = category.required_amenity() {
            if !self.amenities.iter().any(|a| a == amenity) {
                self.amenities.push(amenity.to_string());
            }
        }
    }

    pub fn is_empty(&self) -> bool {
        self == &SearchCriteria::default()
    }

    /// True when the listing satisfies every supplied criterion.
    pub fn matches<L: Listing + ?Sized>(&self, listing: &L) -> bool {
        if let Some(location) = &self.location {
            if !listing
                .city()
                .to_lowercase()
                .contains(&location.to_lowercase())
            {
                return false;
            }
        }

        if let Some(guests) = self.guests {
            if i64::from(listing.max_guests()) < guests {
                return false;
            }
        }

        if let Some(listing_type) = &self.listing_type {
            if listing.listing_type() != listing_type {
                return false;
            }
        }

        if let Some(min) = self.min_price {
            if listing.price() < min as f64 {
                return false;
            }
        }
        if let Some(max) = self.max_price {
            if listing.price() > max as f64 {
                return false;
            }
        }

        self.amenities
            .iter()
            .all(|wanted| listing.amenities().iter().any(|a| a == wanted))
    }
}
