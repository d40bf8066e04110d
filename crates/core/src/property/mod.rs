pub mod amenity;
pub mod model;
pub mod patch;
pub mod stats;
pub mod store;
pub mod validate;

pub use model::{Location, NewProperty, Property, PropertyType};
pub use patch::{LocationPatch, PropertyPatch};
pub use stats::ManagerStats;
pub use validate::ValidationError;
