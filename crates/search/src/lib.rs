//! Listing search: query-string criteria and the in-memory filter applied
//! to the browse results.

pub mod category;
pub mod criteria;
pub mod filter;
pub mod number;

pub use category::Category;
pub use criteria::{RawQuery, SearchCriteria};
pub use filter::{filter, Listing};
