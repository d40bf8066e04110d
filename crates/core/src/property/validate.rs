/// Listing and account validation.
use thiserror::Error;

use super::model::{Location, NewProperty};
use super::patch::{LocationPatch, PropertyPatch};

/// Minimum digits a contact number needs to be dialable.
const MIN_PHONE_DIGITS: usize = 8;

#[derive(Debug, Error, PartialEq)]
pub enum ValidationError {
    #[error("{0} cannot be empty")]
    Blank(&'static str),
    #[error("unknown property type: {0}")]
    UnknownType(String),
    #[error("price must be a non-negative number")]
    InvalidPrice,
    #[error("a listing must host at least one guest")]
    TooFewGuests,
    #[error("latitude must be between -90 and 90")]
    LatitudeOutOfRange,
    #[error("longitude must be between -180 and 180")]
    LongitudeOutOfRange,
    #[error("image URLs cannot be empty")]
    BlankImageUrl,
    #[error("whatsapp number must have at least 8 digits")]
    InvalidWhatsapp,
    #[error("email address is invalid")]
    InvalidEmail,
    #[error("password must have at least {0} characters")]
    PasswordTooShort(usize),
    #[error("passwords do not match")]
    PasswordMismatch,
    #[error("update contains no fields")]
    EmptyPatch,
}

pub(crate) fn require_text(field: &'static str, value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::Blank(field));
    }
    Ok(())
}

fn check_price(price: f64) -> Result<(), ValidationError> {
    if !price.is_finite() || price < 0.0 {
        return Err(ValidationError::InvalidPrice);
    }
    Ok(())
}

fn check_guests(max_guests: i32) -> Result<(), ValidationError> {
    if max_guests < 1 {
        return Err(ValidationError::TooFewGuests);
    }
    Ok(())
}

fn check_coordinates(lat: Option<f64>, lng: Option<f64>) -> Result<(), ValidationError> {
    if let Some(lat) = lat {
        if !(-90.0..=90.0).contains(&lat) {
            return Err(ValidationError::LatitudeOutOfRange);
        }
    }
    if let Some(lng) = lng {
        if !(-180.0..=180.0).contains(&lng) {
            return Err(ValidationError::LongitudeOutOfRange);
        }
    }
    Ok(())
}

fn check_whatsapp(phone: &str) -> Result<(), ValidationError> {
    require_text("whatsapp", phone)?;
    if phone.chars().filter(|c| c.is_ascii_digit()).count() < MIN_PHONE_DIGITS {
        return Err(ValidationError::InvalidWhatsapp);
    }
    Ok(())
}

fn check_images(images: &[String]) -> Result<(), ValidationError> {
    if images.iter().any(|url| url.trim().is_empty()) {
        return Err(ValidationError::BlankImageUrl);
    }
    Ok(())
}

fn check_location(location: &Location) -> Result<(), ValidationError> {
    require_text("city", &location.city)?;
    require_text("state", &location.state)?;
    check_coordinates(location.lat, location.lng)
}

/// Validate a listing about to be created.
pub fn validate_new(input: &NewProperty) -> Result<(), ValidationError> {
    require_text("title", &input.title)?;
    require_text("description", &input.description)?;
    check_location(&input.location)?;
    check_price(input.price)?;
    check_guests(input.max_guests)?;
    check_whatsapp(&input.whatsapp)?;
    check_images(&input.images)
}

/// Validate the fields present in a partial update.
pub fn validate_patch(patch: &PropertyPatch) -> Result<(), ValidationError> {
    if patch.is_empty() {
        return Err(ValidationError::EmptyPatch);
    }
    if let Some(title) = &patch.title {
        require_text("title", title)?;
    }
    if let Some(description) = &patch.description {
        require_text("description", description)?;
    }
    if let Some(LocationPatch {
        city,
        state,
        lat,
        lng,
        ..
    }) = &patch.location
    {
        if let Some(city) = city {
            require_text("city", city)?;
        }
        if let Some(state) = state {
            require_text("state", state)?;
        }
        check_coordinates(*lat, *lng)?;
    }
    if let Some(price) = patch.price {
        check_price(price)?;
    }
    if let Some(max_guests) = patch.max_guests {
        check_guests(max_guests)?;
    }
    if let Some(whatsapp) = &patch.whatsapp {
        check_whatsapp(whatsapp)?;
    }
    if let Some(images) = &patch.images {
        check_images(images)?;
    }
    Ok(())
}

/// Trim free-text fields and collapse repeated amenity labels.
pub fn normalize_new(mut input: NewProperty) -> NewProperty {
    input.title = input.title.trim().to_string();
    input.description = input.description.trim().to_string();
    input.whatsapp = input.whatsapp.trim().to_string();
    input.location.city = input.location.city.trim().to_string();
    input.location.state = input.location.state.trim().to_string();
    input.location.address = input
        .location
        .address
        .map(|a| a.trim().to_string())
        .filter(|a| !a.is_empty());
    input.amenities = dedup_amenities(input.amenities);
    input
}

pub fn dedup_amenities(amenities: Vec<String>) -> Vec<String> {
    let mut seen: Vec<String> = Vec::with_capacity(amenities.len());
    for amenity in amenities {
        let amenity = amenity.trim().to_string();
        if !amenity.is_empty() && !seen.contains(&amenity) {
            seen.push(amenity);
        }
    }
    seen
}
