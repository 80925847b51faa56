//! Error types for the search pipeline

use std::sync::Arc;
use thiserror::Error;

/// A rejected filter or pagination parameter.
///
/// Always the caller's fault; reported back as a client error.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("Lowest price value cannot be lower than zero. Provided {0}")]
    NegativeLowPrice(i64),

    #[error("Highest price value cannot be lower than zero. Provided {0}")]
    NegativeHighPrice(i64),

    #[error("Lowest price cannot be greater than highest price value. Provided {low} > {high}")]
    InvertedPriceRange { low: i64, high: i64 },

    #[error("Rating filter must be in range [0, 5]. Provided: {0}")]
    RatingOutOfRange(f32),

    #[error("Page cannot be lower than 0. Provided {0}")]
    NegativePage(i64),

    #[error("Page size cannot be lower than 1. Provided {0}")]
    PageSizeTooSmall(i64),

    #[error("Page {page} doesn't exist. It starts with element {start} when only {available} exist")]
    PageOutOfRange {
        page: i64,
        start: i64,
        available: usize,
    },
}

impl ValidationError {
    /// Pipeline stage that rejected the request
    pub fn stage(&self) -> &'static str {
        match self {
            Self::NegativeLowPrice(_)
            | Self::NegativeHighPrice(_)
            | Self::InvertedPriceRange { .. }
            | Self::RatingOutOfRange(_) => "filters",
            Self::NegativePage(_) | Self::PageSizeTooSmall(_) | Self::PageOutOfRange { .. } => {
                "pagination"
            }
        }
    }
}

/// Failure of a single search request
#[derive(Debug, Clone, Error)]
pub enum SearchError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The upstream provider failed; shared because concurrent callers
    /// waiting on the same fetch all receive the same error
    #[error("Product provider failed: {0:#}")]
    Provider(Arc<anyhow::Error>),
}

impl SearchError {
    pub fn is_client_error(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}

impl From<anyhow::Error> for SearchError {
    fn from(err: anyhow::Error) -> Self {
        Self::Provider(Arc::new(err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_price_range_message() {
        let err = ValidationError::InvertedPriceRange { low: 100, high: 50 };
        assert_eq!(
            err.to_string(),
            "Lowest price cannot be greater than highest price value. Provided 100 > 50"
        );
        assert_eq!(err.stage(), "filters");
    }

    #[test]
    fn test_page_out_of_range_message() {
        let err = ValidationError::PageOutOfRange {
            page: 3,
            start: 30,
            available: 5,
        };
        assert!(err.to_string().contains("Page 3 doesn't exist"));
        assert_eq!(err.stage(), "pagination");
    }

    #[test]
    fn test_provider_error_keeps_context() {
        let err: SearchError = anyhow::anyhow!("connection refused")
            .context("citilink request failed")
            .into();
        assert!(!err.is_client_error());
        assert_eq!(
            err.to_string(),
            "Product provider failed: citilink request failed: connection refused"
        );
    }
}
