pub mod model;
pub mod password;
pub mod store;
pub mod token;

pub use model::{Account, AccountRow, Credentials, Registration, Role};
pub use token::Claims;

#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("invalid email or password")]
    InvalidCredentials,
    #[error("invalid token: {0}")]
    InvalidToken(String),
    #[error("password hashing failed: {0}")]
    Hash(String),
    #[error("stored account is invalid: {0}")]
    InvalidAccount(String),
    #[error("token encoding failed: {0}")]
    Token(#[source] jsonwebtoken::errors::Error),
}

/// Check login credentials against the account row found for the email.
/// A missing row is rejected only after a dummy password verification.
pub fn authenticate(row: Option<AccountRow>, password: &str) -> Result<Account, AuthError> {
    let Some(row) = row else {
        password::verify_against_dummy(password);
        return Err(AuthError::InvalidCredentials);
    };
    if !password::verify_password(password, &row.password_hash)? {
        return Err(AuthError::InvalidCredentials);
    }
    Account::try_from(row).map_err(AuthError::InvalidAccount)
}
