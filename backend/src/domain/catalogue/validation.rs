//! Field checks shared by the catalogue drafts.

use super::{COUNT_MAX, CatalogueValidationError};
use crate::domain::{Price, PriceError};

pub(super) fn required_text(
    value: &str,
    field: &'static str,
    max: usize,
) -> Result<String, CatalogueValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(CatalogueValidationError::Blank { field });
    }
    optional_text(trimmed, field, max)
}

pub(super) fn optional_text(
    value: &str,
    field: &'static str,
    max: usize,
) -> Result<String, CatalogueValidationError> {
    let trimmed = value.trim();
    if trimmed.chars().count() > max {
        return Err(CatalogueValidationError::TooLong { field, max });
    }
    Ok(trimmed.to_owned())
}

pub(super) fn price(value: f64, field: &'static str) -> Result<Price, CatalogueValidationError> {
    Price::new(value).map_err(|err| match err {
        PriceError::NotFinite => CatalogueValidationError::NotFinite { field },
        PriceError::Negative => CatalogueValidationError::Negative { field },
    })
}

/// Counts are stored in 32-bit signed columns, so the ceiling is `i32::MAX`.
pub(super) fn count(value: i64, field: &'static str) -> Result<u32, CatalogueValidationError> {
    if value < 0 {
        return Err(CatalogueValidationError::Negative { field });
    }
    if value > i64::from(COUNT_MAX) {
        return Err(CatalogueValidationError::TooLarge {
            field,
            max: COUNT_MAX,
        });
    }
    u32::try_from(value).map_err(|_| CatalogueValidationError::TooLarge {
        field,
        max: COUNT_MAX,
    })
}
