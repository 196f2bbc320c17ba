//! Catalogue entities: categories, subcategories, and products.
//!
//! Administrators submit drafts of raw values; `validate` turns a draft into
//! the `*Details` payload that repositories persist. Reads hand back the
//! stored entity plus `*View` wrappers carrying the parent summaries clients
//! render alongside each record.

mod category;
mod listing;
mod product;
mod subcategory;
mod validation;

pub use category::{Category, CategoryDetails, CategoryDraft, CategorySummary};
pub use listing::{
    ADMIN_PAGE_SIZE, FEATURED_LIMIT, MAX_PAGE_SIZE, Page, PageRequest, PageRequestError,
    ProductFilter, ProductListQuery, ProductSort, STOREFRONT_PAGE_SIZE,
};
pub use product::{Product, ProductDetails, ProductDraft, ProductSummary, ProductView};
pub use subcategory::{
    Subcategory, SubcategoryDetails, SubcategoryDraft, SubcategorySummary, SubcategoryView,
};

/// Longest accepted display name for any catalogue record.
pub const NAME_MAX: usize = 200;
/// Longest accepted free-text description.
pub const DESCRIPTION_MAX: usize = 5_000;
/// Longest accepted image URL.
pub const URL_MAX: usize = 2_048;
/// Largest stock or review count; matches a signed 32-bit column.
pub const COUNT_MAX: u32 = 2_147_483_647;

/// Why a catalogue draft was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum CatalogueValidationError {
    #[error("{field} must not be blank")]
    Blank { field: &'static str },
    #[error("{field} must be at most {max} characters")]
    TooLong { field: &'static str, max: usize },
    #[error("{field} must not be negative")]
    Negative { field: &'static str },
    #[error("{field} must be at most {max}")]
    TooLarge { field: &'static str, max: u32 },
    #[error("{field} must be a finite number")]
    NotFinite { field: &'static str },
    #[error("rating must be between 0 and 5")]
    RatingOutOfRange,
}

impl CatalogueValidationError {
    /// Payload field the failure refers to.
    pub fn field(&self) -> &'static str {
        match self {
            Self::Blank { field }
            | Self::TooLong { field, .. }
            | Self::Negative { field }
            | Self::TooLarge { field, .. }
            | Self::NotFinite { field } => field,
            Self::RatingOutOfRange => "rating",
        }
    }

    /// Stable machine-readable reason.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Blank { .. } => "missing",
            Self::TooLong { .. } => "too_long",
            Self::Negative { .. } => "negative",
            Self::TooLarge { .. } => "too_large",
            Self::NotFinite { .. } => "not_finite",
            Self::RatingOutOfRange => "out_of_range",
        }
    }
}
