//! Sort stages
//!
//! Both sorts are stable, so ties keep their relative order. When price
//! and name ordering are both requested, name runs second and decides the
//! final order, with price order surviving only among equal names.

use super::models::SortOrder;
use crate::products::Product;
use std::cmp::Ordering;

pub fn by_price(mut products: Vec<Product>, order: Option<SortOrder>) -> Vec<Product> {
    if let Some(order) = order {
        products.sort_by(|a, b| directed(a.price.cmp(&b.price), order));
    }
    products
}

pub fn by_name(mut products: Vec<Product>, order: Option<SortOrder>) -> Vec<Product> {
    if let Some(order) = order {
        products.sort_by(|a, b| directed(a.name.cmp(&b.name), order));
    }
    products
}

// Flip the comparison rather than reversing the vector so that equal
// elements stay in place for descending orders too.
fn directed(ordering: Ordering, order: SortOrder) -> Ordering {
    match order {
        SortOrder::Ascending => ordering,
        SortOrder::Descending => ordering.reverse(),
    }
}
