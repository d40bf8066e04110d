//! Domain model and persistence for the rural lodging marketplace.

pub mod account;
pub mod contact;
pub mod favorites;
pub mod property;
pub mod storage;
