//! Bearer-token authentication extractor.

use axum::{extract::FromRequestParts, http::request::Parts};
use axum_extra::{
    headers::{authorization::Bearer, Authorization},
    TypedHeader,
};
use reservas_core::account::{token::verify_token, Claims, Role};
use reservas_core::property::Property;
use uuid::Uuid;

use crate::error::ApiError;
use crate::state::AppState;

/// Authenticated account extracted from the `Authorization: Bearer` header.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub claims: Claims,
}

impl AuthUser {
    pub fn id(&self) -> Uuid {
        self.claims.sub
    }

    pub fn role(&self) -> Role {
        self.claims.role
    }

    /// Only managers and admins may publish listings.
    pub fn require_manager(&self) -> Result<(), ApiError> {
        if self.role().can_manage_listings() {
            Ok(())
        } else {
            Err(ApiError::Forbidden("manager account required".to_string()))
        }
    }

    /// Owners edit their own listings; admins edit any.
    pub fn require_owner(&self, property: &Property) -> Result<(), ApiError> {
        if self.role() == Role::Admin || property.is_managed_by(self.id()) {
            Ok(())
        } else {
            tracing::warn!(account = %self.id(), listing = %property.id, "edit of foreign listing refused");
            Err(ApiError::Forbidden("listing belongs to another manager".to_string()))
        }
    }
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let TypedHeader(Authorization(bearer)) =
            TypedHeader::<Authorization<Bearer>>::from_request_parts(parts, state)
                .await
                .map_err(|e| {
                    if e.is_missing() {
                        ApiError::Unauthorized("Authentication required".to_string())
                    } else {
                        ApiError::Unauthorized(format!("invalid authorization header: {e}"))
                    }
                })?;

        let claims = verify_token(&state.config().jwt_secret, bearer.token())?;
        Ok(AuthUser { claims })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use reservas_core::property::{Location, PropertyType};

    fn user(role: Role) -> AuthUser {
        let now = Utc::now().timestamp();
        AuthUser {
            claims: Claims {
                sub: Uuid::now_v7(),
                email: "gestor@example.com".into(),
                role,
                iat: now,
                exp: now + 3600,
                iss: "portal-reservas".into(),
            },
        }
    }

    fn listing(manager_id: Uuid) -> Property {
        Property {
            id: Uuid::now_v7(),
            title: "Sítio".into(),
            description: "x".into(),
            location: Location {
                city: "Cunha".into(),
                state: "SP".into(),
                address: None,
                lat: None,
                lng: None,
            },
            price: 100.0,
            property_type: PropertyType::Sitio,
            max_guests: 4,
            whatsapp: "5512999990000".into(),
            images: vec![],
            amenities: vec![],
            manager_id,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn owner_and_admin_may_edit() {
        let manager = user(Role::Manager);
        assert!(manager.require_owner(&listing(manager.id())).is_ok());
        assert!(matches!(
            manager.require_owner(&listing(Uuid::now_v7())),
            Err(ApiError::Forbidden(_))
        ));
        assert!(user(Role::Admin).require_owner(&listing(Uuid::now_v7())).is_ok());
    }

    #[test]
    fn plain_users_cannot_publish() {
        assert!(user(Role::Manager).require_manager().is_ok());
        assert!(user(Role::Admin).require_manager().is_ok());
        assert!(matches!(
            user(Role::User).require_manager(),
            Err(ApiError::Forbidden(_))
        ));
    }
}
