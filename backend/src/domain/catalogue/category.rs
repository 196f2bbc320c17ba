use chrono::{DateTime, Utc};
use serde::Serialize;

use super::validation::{optional_text, required_text};
use super::{CatalogueValidationError, DESCRIPTION_MAX, NAME_MAX, URL_MAX};
use crate::domain::CategoryId;

/// Raw category fields from an administrator.
#[derive(Debug, Clone)]
pub struct CategoryDraft {
    pub name: String,
    pub description: String,
    pub image: String,
    pub is_active: bool,
    pub sort_order: i32,
}

impl Default for CategoryDraft {
    fn default() -> Self {
        Self {
            name: String::new(),
            description: String::new(),
            image: String::new(),
            is_active: true,
            sort_order: 0,
        }
    }
}

impl CategoryDraft {
    pub fn validate(self) -> Result<CategoryDetails, CatalogueValidationError> {
        Ok(CategoryDetails {
            name: required_text(&self.name, "name", NAME_MAX)?,
            description: optional_text(&self.description, "description", DESCRIPTION_MAX)?,
            image: optional_text(&self.image, "image", URL_MAX)?,
            is_active: self.is_active,
            sort_order: self.sort_order,
        })
    }
}

/// Editable category fields after validation. `name` is trimmed and unique.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryDetails {
    pub name: String,
    pub description: String,
    pub image: String,
    pub is_active: bool,
    pub sort_order: i32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Category {
    pub id: CategoryId,
    pub details: CategoryDetails,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Category {
    pub fn summary(&self) -> CategorySummary {
        CategorySummary {
            id: self.id,
            name: self.details.name.clone(),
        }
    }

    /// Display order used by every category listing.
    pub fn display_order(a: &Self, b: &Self) -> std::cmp::Ordering {
        a.details
            .sort_order
            .cmp(&b.details.sort_order)
            .then_with(|| a.details.name.cmp(&b.details.name))
    }
}

/// Identifier and name embedded in product and subcategory responses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, utoipa::ToSchema)]
pub struct CategorySummary {
    pub id: CategoryId,
    pub name: String,
}
