//! Pagination stage

use crate::error::ValidationError;
use crate::products::Product;

/// Check page and page size before any work is done
pub fn validate_page(page: i64, page_size: i64) -> Result<(), ValidationError> {
    if page < 0 {
        return Err(ValidationError::NegativePage(page));
    }
    if page_size < 1 {
        return Err(ValidationError::PageSizeTooSmall(page_size));
    }
    Ok(())
}

/// Slice out page `page` of `page_size` products.
///
/// A page starting exactly at the end of the list is an empty page, so
/// page 0 of an empty result succeeds. Starting past the end is an error.
pub fn paginate(
    products: Vec<Product>,
    page: i64,
    page_size: i64,
) -> Result<Vec<Product>, ValidationError> {
    validate_page(page, page_size)?;

    let available = products.len();
    let start = page.saturating_mul(page_size);
    if start > available as i64 {
        return Err(ValidationError::PageOutOfRange {
            page,
            start,
            available,
        });
    }

    // start <= available, so both casts are lossless
    let start = start as usize;
    let end = start.saturating_add(page_size as usize).min(available);

    Ok(products.into_iter().skip(start).take(end - start).collect())
}
