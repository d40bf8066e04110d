use crate::criteria::SearchCriteria;

/// The fields of a listing that search looks at.
pub trait Listing {
    fn city(&self) -> &str;
    fn max_guests(&self) -> i32;
    /// Lowercase type id: `pousada`, `sitio` or `fazenda`.
    fn listing_type(&self) -> &str;
    fn price(&self) -> f64;
    fn amenities(&self) -> &[String];
}

/// Keep the listings that satisfy every criterion, preserving input order.
pub fn filter<L: Listing>(items: Vec<L>, criteria: &SearchCriteria) -> Vec<L> {
    if criteria.is_empty() {
        return items;
    }
    items.into_iter().filter(|l| criteria.matches(l)).collect()
}
