use chrono::{DateTime, Utc};
use serde::Serialize;

use super::validation::{optional_text, required_text};
use super::{CatalogueValidationError, CategorySummary, DESCRIPTION_MAX, NAME_MAX, URL_MAX};
use crate::domain::{CategoryId, SubcategoryId};

/// Raw subcategory fields from an administrator.
#[derive(Debug, Clone)]
pub struct SubcategoryDraft {
    pub name: String,
    pub description: String,
    pub category_id: CategoryId,
    pub image: String,
    pub is_active: bool,
    pub sort_order: i32,
}

impl SubcategoryDraft {
    /// Check field shapes. Whether `category_id` exists is the service's job.
    pub fn validate(self) -> Result<SubcategoryDetails, CatalogueValidationError> {
        Ok(SubcategoryDetails {
            name: required_text(&self.name, "name", NAME_MAX)?,
            description: optional_text(&self.description, "description", DESCRIPTION_MAX)?,
            category_id: self.category_id,
            image: optional_text(&self.image, "image", URL_MAX)?,
            is_active: self.is_active,
            sort_order: self.sort_order,
        })
    }
}

/// Editable subcategory fields. `(name, category_id)` is unique.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubcategoryDetails {
    pub name: String,
    pub description: String,
    pub category_id: CategoryId,
    pub image: String,
    pub is_active: bool,
    pub sort_order: i32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Subcategory {
    pub id: SubcategoryId,
    pub details: SubcategoryDetails,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Subcategory {
    pub fn summary(&self) -> SubcategorySummary {
        SubcategorySummary {
            id: self.id,
            name: self.details.name.clone(),
        }
    }

    pub fn display_order(a: &Self, b: &Self) -> std::cmp::Ordering {
        a.details
            .sort_order
            .cmp(&b.details.sort_order)
            .then_with(|| a.details.name.cmp(&b.details.name))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, utoipa::ToSchema)]
pub struct SubcategorySummary {
    pub id: SubcategoryId,
    pub name: String,
}

/// A subcategory with its parent category resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubcategoryView {
    pub subcategory: Subcategory,
    pub category: Option<CategorySummary>,
}
